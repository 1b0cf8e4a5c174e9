//! Graph terms: nodes, predicates, literals, and triples.
//!
//! Every term has a canonical text form produced by its `Display` impl and
//! accepted by its `parse` constructor. The semantic layer hands token text
//! to these parsers; anything they reject is reported as a semantic error
//! naming the clause role being built.
//!
//! Bindings (`?name`) are not terms. A binding occupying a term position is
//! resolved by the semantic layer, so the parsers here reject binding text.

pub mod literal;
pub mod node;
pub mod predicate;
pub mod triple;

pub use literal::Literal;
pub use node::Node;
pub use predicate::{Predicate, parse_instant};
pub use triple::{Object, Triple};

use smol_str::SmolStr;
use thiserror::Error;

/// Errors produced by the term parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// The text is not a valid node.
    #[error("malformed node '{0}'")]
    MalformedNode(SmolStr),

    /// The text is not a valid predicate.
    #[error("malformed predicate '{0}'")]
    MalformedPredicate(SmolStr),

    /// The text is not a valid typed literal.
    #[error("malformed literal '{0}'")]
    MalformedLiteral(SmolStr),

    /// The literal carries a type tag this crate does not know.
    #[error("unknown literal type in '{0}'")]
    UnknownLiteralType(SmolStr),

    /// The text is not a valid RFC 3339 time instant.
    #[error("malformed time instant '{0}'")]
    MalformedInstant(SmolStr),
}
