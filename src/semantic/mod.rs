//! Semantic analysis for the query language.
//!
//! This layer sits between the grammar engine and the planner: it consumes
//! the ordered stream of grammar-reduction markers and lexical tokens one
//! element at a time and incrementally builds a validated [`Statement`].
//! Beyond assigning tokens to semantic roles (subject, predicate, object,
//! aliases, temporal anchors and bounds), it enforces the invariants the
//! grammar cannot express, such as strict ordering of temporal bounds.
//!
//! # Execution model
//!
//! The grammar layer holds a current [`ElementHook`] per statement and
//! feeds it consumed elements; each invocation returns the hook for the
//! next element, or `None` when the chain segment is done. All state lives
//! in the statement and in the hook values themselves, so independent
//! statements can be analyzed concurrently with no shared mutable state.
//!
//! Analysis is strictly single threaded and synchronous per statement:
//! there is no lookahead, no suspension point, and no cancellation. A
//! failing hook ends the statement's analysis; the caller discards the
//! partially built statement and stops feeding elements.
//!
//! # Example
//!
//! ```
//! use tgql::lexer::token::{Token, TokenKind};
//! use tgql::semantic::{ConsumedElement, Statement, graph_accumulator};
//!
//! let mut statement = Statement::new();
//! let mut hook = graph_accumulator();
//! for element in [
//!     ConsumedElement::symbol("GRAPH_LIST"),
//!     ConsumedElement::token(Token::new(TokenKind::Binding, 0..5, "?foo")),
//!     ConsumedElement::token(Token::new(TokenKind::Comma, 5..6, ",")),
//!     ConsumedElement::token(Token::new(TokenKind::Binding, 7..12, "?bar")),
//! ] {
//!     hook = hook.process(&mut statement, &element).unwrap().unwrap();
//! }
//! assert_eq!(statement.graphs().len(), 2);
//! ```

mod diag;
pub mod element;
pub mod hooks;
pub mod statement;

pub use element::ConsumedElement;
pub use hooks::{
    ElementHook, data_accumulator, graph_accumulator, type_binding_hook,
    where_init_working_clause, where_next_working_clause, where_object_clause,
    where_predicate_clause, where_subject_clause,
};
pub use statement::{
    EntityTerm, GraphClause, ObjectTerm, PredicateTerm, Statement, StatementKind, StringField,
};
