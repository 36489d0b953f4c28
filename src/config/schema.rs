use crate::tree::TreePath;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// A batch of queries to run against one tree.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct QueryConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub queries: Vec<QueryDefinition>,
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.queries.is_empty() {
            issues.push(ValidationIssue::EmptyQueryList);
        }

        let mut seen_ids = HashSet::new();

        for query in &self.queries {
            if query.id.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    query_id: None,
                    field: "id",
                });
            } else if !seen_ids.insert(query.id.as_str()) {
                issues.push(ValidationIssue::DuplicateId {
                    query_id: query.id.clone(),
                });
            }

            let query_id = Some(query.id.clone());

            match &query.target {
                Target::Position { line, column } => {
                    if *line < 1 || *column < 1 {
                        issues.push(ValidationIssue::InvalidCombo {
                            query_id: query_id.clone(),
                            message: format!(
                                "position {line}:{column} is out of range, lines and columns start at 1"
                            ),
                        });
                    }
                }
                Target::BoundingBox { path } => {
                    if let Some(path) = path {
                        if let Err(err) = TreePath::parse(path) {
                            issues.push(ValidationIssue::InvalidPath {
                                query_id: query_id.clone(),
                                message: err.to_string(),
                            });
                        }
                    }
                }
            }

            if let Some(expect) = &query.expect {
                if let Some(path) = &expect.path {
                    if let Err(err) = TreePath::parse(path) {
                        issues.push(ValidationIssue::InvalidPath {
                            query_id: query_id.clone(),
                            message: err.to_string(),
                        });
                    }
                }
                if let Err(message) = expect.validate_for(&query.target) {
                    issues.push(ValidationIssue::InvalidCombo { query_id, message });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryDefinition {
    pub id: String,
    pub target: Target,
    #[serde(default)]
    pub expect: Option<Expect>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Target {
    /// Node under a cursor
    Position { line: i64, column: i64 },
    /// Span of the node at a path; the whole tree when `path` is absent
    BoundingBox {
        #[serde(default)]
        path: Option<String>,
    },
}

/// Expected result of a query. Every field is optional; only the ones given
/// are checked.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Expect {
    /// Path the position should resolve to
    #[serde(default)]
    pub path: Option<String>,
    /// Kind of the node the position should resolve to
    #[serde(default)]
    pub kind: Option<String>,
    /// The position should resolve to nothing
    #[serde(default)]
    pub none: bool,
    #[serde(default)]
    pub top_left: Option<[i64; 2]>,
    #[serde(default)]
    pub bottom_right: Option<[i64; 2]>,
}

impl Expect {
    pub fn validate_for(&self, target: &Target) -> Result<(), String> {
        match target {
            Target::Position { .. } => {
                if self.top_left.is_some() || self.bottom_right.is_some() {
                    return Err("top_left/bottom_right only apply to bounding-box queries".into());
                }
                if self.none && (self.path.is_some() || self.kind.is_some()) {
                    return Err("expect.none cannot be combined with path or kind".into());
                }
            }
            Target::BoundingBox { .. } => {
                if self.path.is_some() || self.kind.is_some() || self.none {
                    return Err("path/kind/none only apply to position queries".into());
                }
            }
        }
        Ok(())
    }
}

/// Every problem found in a query file.
#[derive(Error, Debug, Clone)]
#[error("{}", list_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn list_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Debug, Clone)]
pub enum ValidationIssue {
    #[error("query config contains no queries")]
    EmptyQueryList,

    #[error("{}missing required field '{field}'", describe_query(.query_id))]
    MissingField {
        query_id: Option<String>,
        field: &'static str,
    },

    #[error("query id '{query_id}' is used more than once")]
    DuplicateId { query_id: String },

    #[error("{}has an invalid path: {message}", describe_query(.query_id))]
    InvalidPath {
        query_id: Option<String>,
        message: String,
    },

    #[error("{}has invalid configuration: {message}", describe_query(.query_id))]
    InvalidCombo {
        query_id: Option<String>,
        message: String,
    },
}

fn describe_query(query_id: &Option<String>) -> String {
    match query_id {
        Some(id) => format!("query '{id}' "),
        None => "query ".to_string(),
    }
}
