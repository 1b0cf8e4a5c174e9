//! Graph nodes.

use super::TermError;
use smol_str::SmolStr;
use std::fmt;

/// A graph node: a hierarchical kind plus an id, written `/kind<id>`.
///
/// Kinds may be hierarchical (`/person/employee<bob>`); the segments are
/// stored without the leading slash. Blank nodes use the reserved kind `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    kind: SmolStr,
    id: SmolStr,
}

impl Node {
    /// Creates a node from an already validated kind and id.
    pub fn new(kind: impl Into<SmolStr>, id: impl Into<SmolStr>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Parses the canonical text form `/kind<id>`.
    pub fn parse(text: &str) -> Result<Self, TermError> {
        let malformed = || TermError::MalformedNode(SmolStr::new(text));

        let rest = text.strip_prefix('/').ok_or_else(malformed)?;
        let (kind, rest) = rest.split_once('<').ok_or_else(malformed)?;
        let id = rest.strip_suffix('>').ok_or_else(malformed)?;

        if kind.is_empty() || id.is_empty() || id.contains(['<', '>']) {
            return Err(malformed());
        }
        for segment in kind.split('/') {
            if segment.is_empty()
                || !segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            {
                return Err(malformed());
            }
        }

        Ok(Self::new(kind, id))
    }

    /// Returns the kind without the leading slash, e.g. `person/employee`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true for blank nodes (`/_<...>`).
    pub fn is_blank(&self) -> bool {
        self.kind == "_"
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}<{}>", self.kind, self.id)
    }
}
