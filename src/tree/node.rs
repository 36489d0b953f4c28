use crate::tree::errors::TreeError;
use crate::tree::path::TreePath;
use crate::tree::walker::{walk, RenderVisitor, Walk};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Minimum normalized similarity for a field name to be offered as a
/// suggestion when a path key does not exist.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// A node of a lossless syntax tree.
///
/// Rendering a tree concatenates every constant in source order and gives
/// back the exact text the tree was built from.
///
/// In JSON a string is a constant, an array is a list and an object with a
/// `type` is a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A leaf text chunk.
    Constant(String),
    /// Ordered elements, addressed by index.
    List(Vec<Node>),
    /// A typed node with anonymous text and named fields.
    Composite(Composite),
}

/// A typed node made of ordered slots.
///
/// Field keys are unique within a composite, so every field has a path of
/// its own. Both the builder and deserialisation reject a repeated key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawComposite")]
pub struct Composite {
    #[serde(rename = "type")]
    pub kind: String,
    children: Vec<Slot>,
}

#[derive(Deserialize)]
struct RawComposite {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    children: Vec<Slot>,
}

impl TryFrom<RawComposite> for Composite {
    type Error = TreeError;

    fn try_from(raw: RawComposite) -> Result<Self, Self::Error> {
        Composite::from_slots(raw.kind, raw.children)
    }
}

/// One rendered piece of a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    /// Text that belongs to the composite itself (keywords, punctuation,
    /// whitespace). It has no render key and adds no path segment.
    Text(String),
    /// A child node reachable under `key`.
    Field { key: String, value: Node },
}

/// Owned selector of a child: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderKey {
    Index(usize),
    Name(String),
}

/// Borrowed [`RenderKey`] handed out during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRef<'t> {
    Index(usize),
    Name(&'t str),
}

impl RenderKey {
    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            RenderKey::Index(i) => KeyRef::Index(*i),
            RenderKey::Name(name) => KeyRef::Name(name),
        }
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderKey::Index(i) => write!(f, "{i}"),
            RenderKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for RenderKey {
    fn from(index: usize) -> Self {
        RenderKey::Index(index)
    }
}

impl From<&str> for RenderKey {
    fn from(name: &str) -> Self {
        RenderKey::Name(name.to_string())
    }
}

impl From<String> for RenderKey {
    fn from(name: String) -> Self {
        RenderKey::Name(name)
    }
}

impl KeyRef<'_> {
    pub fn to_render_key(self) -> RenderKey {
        match self {
            KeyRef::Index(i) => RenderKey::Index(i),
            KeyRef::Name(name) => RenderKey::Name(name.to_string()),
        }
    }
}

impl PartialEq<RenderKey> for KeyRef<'_> {
    fn eq(&self, other: &RenderKey) -> bool {
        *self == other.as_key_ref()
    }
}

impl Node {
    pub fn constant(text: impl Into<String>) -> Self {
        Node::Constant(text.into())
    }

    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Node::List(items.into_iter().collect())
    }

    /// Parse a tree from its JSON form.
    pub fn from_json_str(input: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Short description of the node: `constant`, `list` or the composite type.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Constant(_) => "constant",
            Node::List(_) => "list",
            Node::Composite(composite) => &composite.kind,
        }
    }

    /// The child reachable from this node under `key`.
    pub fn child(&self, key: KeyRef<'_>) -> Option<&Node> {
        match (self, key) {
            (Node::List(items), KeyRef::Index(i)) => items.get(i),
            (Node::Composite(composite), KeyRef::Name(name)) => composite.field_value(name),
            _ => None,
        }
    }

    /// Follow `path` from this node.
    pub fn descend(&self, path: &TreePath) -> Result<&Node, TreeError> {
        let mut node = self;

        for (depth, key) in path.iter().enumerate() {
            node = match node.child(key.as_key_ref()) {
                Some(child) => child,
                None => {
                    return Err(TreeError::KeyNotFound {
                        parent: path.keys()[..depth].iter().cloned().collect(),
                        key: key.clone(),
                        suggestion: suggest_field(node, key),
                    })
                }
            };
        }

        Ok(node)
    }

    /// The exact source text this tree renders to.
    pub fn render(&self) -> String {
        let mut renderer = Renderer::default();
        let _ = walk(self, &mut renderer);
        renderer.out
    }
}

impl From<Composite> for Node {
    fn from(composite: Composite) -> Self {
        Node::Composite(composite)
    }
}

impl Composite {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Append anonymous text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Slot::Text(text.into()));
        self
    }

    /// Composite with the given slots, in render order.
    pub fn from_slots(
        kind: impl Into<String>,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Result<Self, TreeError> {
        slots
            .into_iter()
            .try_fold(Self::new(kind), |composite, slot| match slot {
                Slot::Text(text) => Ok(composite.text(text)),
                Slot::Field { key, value } => composite.field(key, value),
            })
    }

    /// Append a named child. Fails if a field named `key` already exists.
    pub fn field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Node>,
    ) -> Result<Self, TreeError> {
        let key = key.into();
        if self.field_value(&key).is_some() {
            return Err(TreeError::DuplicateField {
                kind: self.kind,
                key,
            });
        }
        self.children.push(Slot::Field {
            key,
            value: value.into(),
        });
        Ok(self)
    }

    pub fn children(&self) -> &[Slot] {
        &self.children
    }

    /// The field named `name`.
    pub fn field_value(&self, name: &str) -> Option<&Node> {
        self.fields()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().filter_map(|slot| match slot {
            Slot::Field { key, value } => Some((key.as_str(), value)),
            Slot::Text(_) => None,
        })
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::constant(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Constant(text)
    }
}

/// Look up the child of `node` reachable under `key`.
pub fn child_by_key<'t>(node: &'t Node, key: &RenderKey) -> Option<&'t Node> {
    node.child(key.as_key_ref())
}

/// Load a tree from a JSON file.
pub fn load_tree(path: impl AsRef<Path>) -> Result<Node, TreeError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Node::from_json_str(&contents)
}

fn suggest_field(node: &Node, key: &RenderKey) -> Option<String> {
    let (Node::Composite(composite), RenderKey::Name(wanted)) = (node, key) else {
        return None;
    };

    composite
        .fields()
        .map(|(name, _)| (name, strsim::normalized_levenshtein(name, wanted)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.to_string())
}

#[derive(Default)]
struct Renderer {
    out: String,
}

impl<'t> RenderVisitor<'t> for Renderer {
    fn before_leaf(&mut self, text: &'t str, _key: Option<KeyRef<'t>>) -> Walk {
        self.out.push_str(text);
        Walk::Continue
    }
}
