use thiserror::Error;

/// Structural validation errors for a node store.
///
/// These only occur when compiling seed data into a store. Runtime
/// traversal never fails: a dangling reference is skipped and logged
/// at debug level instead.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("node '{parent}' references unknown child '{child}'")]
    UnknownChild { parent: String, child: String },

    #[error("node '{node}' references unknown parent '{parent}'")]
    UnknownParent { node: String, parent: String },

    #[error("node '{child}' declares parent '{declared:?}' but is listed under '{actual}'")]
    ParentMismatch {
        child: String,
        declared: Option<String>,
        actual: String,
    },

    #[error("node '{0}' is reachable from more than one root")]
    NodeInMultipleTrees(String),

    #[error("node '{0}' is not reachable from any root")]
    UnreachableNode(String),
}
