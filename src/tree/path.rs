use crate::tree::errors::TreeError;
use crate::tree::node::RenderKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence of render keys leading from the tree root to a node.
///
/// The empty path is the root itself. Paths are written as dotted strings:
/// `body.0.value`. Unquoted all-digit segments are list indices; quote a
/// segment (`"0"`, `"a.b"`) to force a field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath {
    keys: Vec<RenderKey>,
}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(keys: Vec<RenderKey>) -> Self {
        Self { keys }
    }

    pub fn parse(input: &str) -> Result<Self, TreeError> {
        parse_dotted_path(input).map(Self::new)
    }

    pub fn keys(&self) -> &[RenderKey] {
        &self.keys
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn push(&mut self, key: RenderKey) {
        self.keys.push(key);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderKey> {
        self.keys.iter()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.keys.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            match key {
                RenderKey::Index(i) => write!(f, "{i}")?,
                RenderKey::Name(name) if needs_quotes(name) => write!(f, "{}", quote(name))?,
                RenderKey::Name(name) => f.write_str(name)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<RenderKey>> for TreePath {
    fn from(keys: Vec<RenderKey>) -> Self {
        Self::new(keys)
    }
}

impl FromIterator<RenderKey> for TreePath {
    fn from_iter<I: IntoIterator<Item = RenderKey>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TreePath {
    type Item = &'a RenderKey;
    type IntoIter = std::slice::Iter<'a, RenderKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name.bytes().all(|b| b.is_ascii_digit())
        || name
            .chars()
            .any(|ch| ch == '.' || ch == '"' || ch == '\'' || ch == '\\' || ch.is_whitespace())
}

fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn parse_dotted_path(input: &str) -> Result<Vec<RenderKey>, TreeError> {
    let invalid = |message: &str| TreeError::InvalidPath {
        input: input.to_string(),
        message: message.to_string(),
    };

    let mut keys = Vec::new();
    if input.is_empty() {
        return Ok(keys);
    }

    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut quote_char = '\0';
    let mut chars = input.chars();

    let finish = |current: &mut String, quoted: bool| -> RenderKey {
        let segment = std::mem::take(current);
        if !quoted {
            if let Ok(index) = segment.parse::<usize>() {
                return RenderKey::Index(index);
            }
        }
        RenderKey::Name(segment)
    };

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == quote_char {
                in_quotes = false;
                continue;
            }

            if quote_char == '"' && ch == '\\' {
                if let Some(next) = chars.next() {
                    let escaped = match next {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    };
                    current.push(escaped);
                    continue;
                }
            }

            current.push(ch);
            continue;
        }

        match ch {
            '.' => {
                if current.is_empty() && !quoted {
                    return Err(invalid("empty path segment"));
                }
                keys.push(finish(&mut current, quoted));
                quoted = false;
            }
            '"' | '\'' => {
                if !current.is_empty() || quoted {
                    return Err(invalid("unexpected quote inside key"));
                }
                in_quotes = true;
                quoted = true;
                quote_char = ch;
            }
            ch if ch.is_whitespace() => {
                return Err(invalid("whitespace not allowed in unquoted key"));
            }
            other => {
                if quoted {
                    return Err(invalid("text after closing quote"));
                }
                current.push(other);
            }
        }
    }

    if in_quotes {
        return Err(invalid("unterminated quoted key"));
    }

    if current.is_empty() && !quoted {
        return Err(invalid("empty path segment"));
    }
    keys.push(finish(&mut current, quoted));

    Ok(keys)
}
