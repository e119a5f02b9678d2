//! Static seed catalog for the three account trees.
//!
//! The catalog is the fixed configuration of the selection model: it
//! declares structure, labels, and leaf-level initial states. Ancestor
//! checked/indeterminate/disabled values are NOT trusted from the seed;
//! [`crate::AccountSelection::new`] derives them before the store is
//! exposed.

use ssoam_tree::{Node, NodeStore, TreeError};

/// A declarative seed node. Ids and labels are static: the trees never
/// change shape after startup.
struct Seed {
    id: &'static str,
    label: &'static str,
    checked: bool,
    disabled: bool,
    children: Vec<Seed>,
}

impl Seed {
    /// A terminal permission with default (unchecked, enabled) state.
    fn leaf(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            checked: false,
            disabled: false,
            children: Vec::new(),
        }
    }

    fn branch(id: &'static str, label: &'static str, children: Vec<Seed>) -> Self {
        Self {
            children,
            ..Self::leaf(id, label)
        }
    }

    fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Standard accounts: departmental permissions.
fn standard_accounts() -> Vec<Seed> {
    vec![
        Seed::branch(
            "finance",
            "Finance",
            vec![
                Seed::branch(
                    "finance-read",
                    "Read Access",
                    vec![
                        Seed::leaf("finance-read-reports", "Financial Reports"),
                        Seed::leaf("finance-read-budgets", "Department Budgets"),
                    ],
                ),
                Seed::branch(
                    "finance-edit",
                    "Edit Access",
                    vec![
                        Seed::leaf("finance-edit-payroll", "Payroll").disabled(),
                        Seed::leaf("finance-edit-invoices", "Invoices"),
                    ],
                ),
            ],
        ),
        Seed::branch(
            "hr",
            "Human Resources",
            vec![
                Seed::branch(
                    "hr-view",
                    "View Access",
                    vec![Seed::leaf("hr-view-profiles", "Employee Profiles")],
                ),
                Seed::branch(
                    "hr-edit",
                    "Edit Access",
                    vec![Seed::leaf("hr-edit-onboarding", "Onboarding").checked()],
                )
                .checked(),
            ],
        )
        .checked(),
    ]
}

/// Unix accounts: server access levels.
fn unix_accounts() -> Vec<Seed> {
    vec![
        Seed::branch(
            "linux-servers",
            "Linux Servers",
            vec![
                Seed::branch(
                    "linux-admin",
                    "Administrator",
                    vec![
                        Seed::leaf("linux-admin-prod", "Production Servers").checked(),
                        Seed::leaf("linux-admin-dev", "Development Servers").disabled(),
                    ],
                )
                .checked(),
                Seed::branch(
                    "linux-user",
                    "Standard User",
                    vec![Seed::leaf("linux-user-all", "All Servers")],
                ),
            ],
        )
        .checked(),
        Seed::branch(
            "aix-servers",
            "AIX Servers",
            vec![
                Seed::branch(
                    "aix-readonly",
                    "Read-Only",
                    vec![Seed::leaf("aix-readonly-prod", "Production").disabled()],
                )
                .disabled(),
            ],
        ),
    ]
}

/// Database security accounts: per-engine access levels.
fn dbsec_accounts() -> Vec<Seed> {
    vec![
        Seed::branch(
            "sql-db",
            "SQL Databases",
            vec![
                Seed::branch(
                    "sql-query",
                    "Query Access",
                    vec![
                        Seed::leaf("sql-query-customer", "Customer Database"),
                        Seed::leaf("sql-query-product", "Product Database"),
                    ],
                ),
                Seed::branch(
                    "sql-admin",
                    "Admin Access",
                    vec![
                        Seed::leaf("sql-admin-test", "Test Database"),
                        Seed::leaf("sql-admin-prod", "Production Database").disabled(),
                    ],
                ),
            ],
        ),
        Seed::branch(
            "nosql-db",
            "NoSQL Databases",
            vec![Seed::branch(
                "nosql-readonly",
                "Read-Only",
                vec![Seed::leaf("nosql-readonly-analytics", "Analytics Store")],
            )],
        ),
    ]
}

/// The compiled catalog: one flat store shared by all three trees, plus
/// each tree's ordered root list.
pub struct Catalog {
    pub store: NodeStore,
    pub standard: Vec<String>,
    pub unix: Vec<String>,
    pub dbsec: Vec<String>,
}

/// Compile the seed trees into a validated flat store.
pub fn build() -> Result<Catalog, TreeError> {
    let mut store = NodeStore::new();

    let standard = flatten(standard_accounts(), None, 1, &mut store)?;
    let unix = flatten(unix_accounts(), None, 1, &mut store)?;
    let dbsec = flatten(dbsec_accounts(), None, 1, &mut store)?;

    let all_roots: Vec<String> = standard
        .iter()
        .chain(&unix)
        .chain(&dbsec)
        .cloned()
        .collect();
    store.validate(&all_roots)?;

    Ok(Catalog {
        store,
        standard,
        unix,
        dbsec,
    })
}

fn flatten(
    seeds: Vec<Seed>,
    parent: Option<&str>,
    level: u8,
    store: &mut NodeStore,
) -> Result<Vec<String>, TreeError> {
    let mut ids = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let id = seed.id.to_string();
        let child_ids: Vec<String> = seed.children.iter().map(|c| c.id.to_string()).collect();
        store.insert(Node {
            id: id.clone(),
            label: seed.label.to_string(),
            checked: seed.checked,
            indeterminate: false,
            disabled: seed.disabled,
            children: if child_ids.is_empty() {
                None
            } else {
                Some(child_ids)
            },
            parent: parent.map(str::to_string),
            level,
        })?;
        flatten(seed.children, Some(seed.id), level + 1, store)?;
        ids.push(id);
    }
    Ok(ids)
}

/// Why a disabled entry cannot be granted right now. Shown as a tooltip
/// next to disabled leaf checkboxes.
pub fn restriction_reason(id: &str) -> &'static str {
    match id {
        "finance-edit-payroll" => "This access requires additional approval",
        "linux-admin-dev" => "Access currently restricted",
        "aix-readonly-prod" => "System upgrade in progress",
        "sql-admin-prod" => "Requires security clearance",
        _ => "Access is restricted",
    }
}
