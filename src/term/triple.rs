//! Immutable triples: the unit of data carried by mutation statements.

use super::{Literal, Node, Predicate};
use std::fmt;

/// The object position of a triple.
///
/// Objects may reference another node, a predicate (reification), or carry
/// a literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Node(Node),
    Predicate(Predicate),
    Literal(Literal),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Node(node) => node.fmt(f),
            Object::Predicate(predicate) => predicate.fmt(f),
            Object::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        Object::Node(node)
    }
}

impl From<Predicate> for Object {
    fn from(predicate: Predicate) -> Self {
        Object::Predicate(predicate)
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

/// A completed subject/predicate/object triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Triple {
    subject: Node,
    predicate: Predicate,
    object: Object,
}

impl Triple {
    /// Creates a new triple.
    pub fn new(subject: Node, predicate: Predicate, object: impl Into<Object>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }

    /// Returns the subject.
    pub fn subject(&self) -> &Node {
        &self.subject
    }

    /// Returns the predicate.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns the object.
    pub fn object(&self) -> &Object {
        &self.object
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.subject, self.predicate, self.object)
    }
}
