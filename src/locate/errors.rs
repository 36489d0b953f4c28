use crate::tree::TreePath;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("path `{path}` does not exist in the tree")]
    PathNotFound { path: TreePath },
}
