use crate::tree::node::RenderKey;
use crate::tree::path::TreePath;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no child `{key}` under {}{}", describe_parent(.parent), did_you_mean(.suggestion))]
    KeyNotFound {
        parent: TreePath,
        key: RenderKey,
        suggestion: Option<String>,
    },

    #[error("field `{key}` appears more than once in a `{kind}` node")]
    DuplicateField { kind: String, key: String },

    #[error("invalid path '{input}': {message}")]
    InvalidPath { input: String, message: String },
}

fn describe_parent(parent: &TreePath) -> String {
    if parent.is_root() {
        "the root".to_string()
    } else {
        format!("`{parent}`")
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}
