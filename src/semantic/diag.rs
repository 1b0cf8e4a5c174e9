//! Semantic diagnostics built on the shared diagnostic model.
//!
//! Each constructor covers one entry of the semantic error taxonomy and
//! carries a stable `S...` code, so callers can tell a malformed term from
//! an invariant violation without string matching.

use crate::diag::Diag;
use crate::lexer::token::Token;
use crate::term::TermError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::fmt;

/// A term text failed its parser while filling the named role.
pub(crate) fn malformed_term(role: &str, err: &TermError, token: &Token) -> Diag {
    Diag::error(format!("invalid {role}: {err}"))
        .with_primary_label(token.span.clone(), format!("not a valid {role}"))
        .with_code("S001")
}

/// A temporal bound whose lower instant is not strictly before its upper.
pub(crate) fn invalid_temporal_range(
    lower: &DateTime<FixedOffset>,
    upper: &DateTime<FixedOffset>,
    token: &Token,
) -> Diag {
    Diag::error(format!(
        "empty temporal bound: lower bound {} is not strictly before upper bound {}",
        lower.to_rfc3339_opts(SecondsFormat::Nanos, true),
        upper.to_rfc3339_opts(SecondsFormat::Nanos, true),
    ))
    .with_primary_label(token.span.clone(), "this bound matches no instant")
    .with_help("swap the bounds so the earlier instant comes first")
    .with_code("S002")
}

/// A temporal bound mixing a literal instant with a binding.
pub(crate) fn mixed_temporal_bound(token: &Token) -> Diag {
    Diag::error("temporal bound must use two instants or two bindings")
        .with_primary_label(token.span.clone(), "mixed bound")
        .with_code("S003")
}

/// A working clause was opened while another one is still open.
pub(crate) fn clause_already_open() -> Diag {
    Diag::error("a graph pattern clause is already open").with_code("S004")
}

/// A clause operation ran with no open working clause.
pub(crate) fn missing_working_clause() -> Diag {
    Diag::error("no working graph pattern clause is open").with_code("S005")
}

/// A clause slot was written twice.
pub(crate) fn duplicate_value(what: impl fmt::Display, token: &Token) -> Diag {
    Diag::error(format!("duplicate {what}"))
        .with_primary_label(token.span.clone(), "already set for this clause")
        .with_code("S006")
}

/// A token the current hook cannot consume.
pub(crate) fn unexpected_token(context: &str, token: &Token) -> Diag {
    Diag::error(format!("unexpected token '{token}' in {context}"))
        .with_primary_label(token.span.clone(), "not allowed here")
        .with_code("S007")
}
