//! Token kinds and representations for the query language.
//!
//! Token kinds are plain tags; the literal source text of every token is
//! kept on the [`Token`] itself because the semantic layer re-parses node,
//! predicate, and literal texts with the term parsers.

use crate::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Statement keywords
    Select,
    Insert,
    Delete,
    Create,
    Drop,
    Graph,
    Data,
    Into,
    From,
    Where,

    // Clause keywords
    As,
    Type,
    Id,
    At,

    // Terms
    /// A node literal, e.g. `/person<alice>`.
    Node,
    /// A predicate literal, e.g. `"knows"@[]` or `"knows"@[2016-01-01T00:00:00Z]`.
    Predicate,
    /// A predicate temporal bound, e.g. `"knows"@[2015-01-01T00:00:00Z,2016-01-01T00:00:00Z]`.
    PredicateBound,
    /// A typed literal, e.g. `"42"^^type:int64`.
    Literal,
    /// A query binding, e.g. `?who`.
    Binding,

    // Punctuation
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for term-bearing kinds whose text the semantic layer
    /// hands to a term parser.
    pub fn is_term(self) -> bool {
        matches!(
            self,
            TokenKind::Node
                | TokenKind::Predicate
                | TokenKind::PredicateBound
                | TokenKind::Literal
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Select => write!(f, "select"),
            TokenKind::Insert => write!(f, "insert"),
            TokenKind::Delete => write!(f, "delete"),
            TokenKind::Create => write!(f, "create"),
            TokenKind::Drop => write!(f, "drop"),
            TokenKind::Graph => write!(f, "graph"),
            TokenKind::Data => write!(f, "data"),
            TokenKind::Into => write!(f, "into"),
            TokenKind::From => write!(f, "from"),
            TokenKind::Where => write!(f, "where"),
            TokenKind::As => write!(f, "as"),
            TokenKind::Type => write!(f, "type"),
            TokenKind::Id => write!(f, "id"),
            TokenKind::At => write!(f, "at"),
            TokenKind::Node => write!(f, "node"),
            TokenKind::Predicate => write!(f, "predicate"),
            TokenKind::PredicateBound => write!(f, "predicate bound"),
            TokenKind::Literal => write!(f, "literal"),
            TokenKind::Binding => write!(f, "binding"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Eof => write!(f, "<EOF>"),
        }
    }
}

/// Looks up a keyword, case-insensitively.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    let kind = match text.to_ascii_lowercase().as_str() {
        "select" => TokenKind::Select,
        "insert" => TokenKind::Insert,
        "delete" => TokenKind::Delete,
        "create" => TokenKind::Create,
        "drop" => TokenKind::Drop,
        "graph" => TokenKind::Graph,
        "data" => TokenKind::Data,
        "into" => TokenKind::Into,
        "from" => TokenKind::From,
        "where" => TokenKind::Where,
        "as" => TokenKind::As,
        "type" => TokenKind::Type,
        "id" => TokenKind::Id,
        "at" => TokenKind::At,
        _ => return None,
    };
    Some(kind)
}

/// A lexical token: kind, source span, and literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in source text.
    pub span: Span,
    /// The literal text, exactly as written in the source.
    pub text: SmolStr,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.text)
        }
    }
}
