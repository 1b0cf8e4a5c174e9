//! Lexical analysis for the query language.
//!
//! The lexer converts source text into the token stream consumed by the
//! grammar layer. It is error tolerant: malformed input produces a
//! diagnostic and scanning continues, so one pass reports every lexical
//! problem in a statement.
//!
//! Term-shaped tokens (nodes, predicates, literals) are scanned as single
//! tokens but not interpreted here; their text is handed to the term
//! parsers by the semantic layer.

pub mod token;

use crate::diag::Diag;
use token::{Token, TokenKind, lookup_keyword};

/// Result of lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// Diagnostics encountered during scanning.
    pub diagnostics: Vec<Diag>,
}

/// A lexical analyzer for query source text.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns the result.
    pub fn tokenize(mut self) -> LexerResult {
        while !self.is_at_end() {
            self.skip_whitespace_and_comments();
            if self.is_at_end() {
                break;
            }
            self.scan_token();
        }

        let eof_pos = self.source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));

        LexerResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Scans a single token.
    fn scan_token(&mut self) {
        let start = self.pos;
        let ch = self.advance();

        match ch {
            '{' => self.add_token(TokenKind::LBrace, start),
            '}' => self.add_token(TokenKind::RBrace, start),
            ',' => self.add_token(TokenKind::Comma, start),
            '.' => self.add_token(TokenKind::Dot, start),
            ';' => self.add_token(TokenKind::Semicolon, start),

            '?' => self.scan_binding(start),
            '/' => self.scan_node(start),
            '"' => self.scan_quoted_term(start),

            'a'..='z' | 'A'..='Z' | '_' => self.scan_keyword(start),

            _ => {
                self.error(start, &format!("invalid character '{}'", ch));
                // Error recovery: skip this character and continue
            }
        }
    }

    /// Scans a binding (`?name`).
    fn scan_binding(&mut self, start: usize) {
        if !self.is_identifier_start(self.peek()) {
            self.error(start, "expected a name after '?'");
            return;
        }
        while self.is_identifier_continue(self.peek()) {
            self.advance();
        }
        self.add_token(TokenKind::Binding, start);
    }

    /// Scans a node (`/kind<id>`), where the kind may be hierarchical
    /// (`/person/employee<bob>`).
    fn scan_node(&mut self, start: usize) {
        loop {
            if !self.is_identifier_start(self.peek()) {
                self.error(self.pos, "expected a node kind segment after '/'");
                return;
            }
            while self.is_identifier_continue(self.peek()) {
                self.advance();
            }
            if self.peek() == '/' {
                self.advance();
                continue;
            }
            break;
        }

        if !self.match_char('<') {
            self.error(start, "node kind must be followed by an id in '<...>'");
            return;
        }
        while self.peek() != '>' && self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
        if !self.match_char('>') {
            self.error(start, "unclosed node id");
            return;
        }
        self.add_token(TokenKind::Node, start);
    }

    /// Scans a quoted term: a predicate (`"id"@[anchor]`) or a typed
    /// literal (`"value"^^type:tag`).
    fn scan_quoted_term(&mut self, start: usize) {
        while self.peek() != '"' && self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
        if !self.match_char('"') {
            self.error(start, "unclosed quoted value");
            return;
        }

        if self.peek() == '@' {
            self.advance();
            self.scan_predicate_anchor(start);
        } else if self.peek() == '^' {
            self.advance();
            self.scan_literal_type(start);
        } else {
            self.diagnostics.push(
                Diag::error("quoted value must be a predicate or a typed literal")
                    .with_primary_label(start..self.pos, "here")
                    .with_help(
                        "follow the value with '@[...]' for a predicate or '^^type:...' for a literal",
                    )
                    .with_code("L001"),
            );
        }
    }

    /// Scans the `[...]` anchor of a predicate, deciding between a plain
    /// predicate and a temporal bound (anchor containing a comma).
    fn scan_predicate_anchor(&mut self, start: usize) {
        if !self.match_char('[') {
            self.error(start, "predicate anchor must start with '['");
            return;
        }
        let mut has_comma = false;
        while self.peek() != ']' && self.peek() != '\n' && !self.is_at_end() {
            if self.peek() == ',' {
                has_comma = true;
            }
            self.advance();
        }
        if !self.match_char(']') {
            self.error(start, "unclosed predicate anchor");
            return;
        }
        let kind = if has_comma {
            TokenKind::PredicateBound
        } else {
            TokenKind::Predicate
        };
        self.add_token(kind, start);
    }

    /// Scans the `^^type:tag` suffix of a typed literal.
    fn scan_literal_type(&mut self, start: usize) {
        if !self.match_char('^') {
            self.error(start, "literal type must be introduced by '^^'");
            return;
        }
        if !self.is_identifier_start(self.peek()) {
            self.error(start, "expected a literal type after '^^'");
            return;
        }
        while self.is_identifier_continue(self.peek()) || self.peek() == ':' {
            self.advance();
        }
        self.add_token(TokenKind::Literal, start);
    }

    /// Scans a bare word, which must be a keyword.
    fn scan_keyword(&mut self, start: usize) {
        while self.is_identifier_continue(self.peek()) {
            self.advance();
        }
        let text = &self.source[start..self.pos];
        if let Some(kind) = lookup_keyword(text) {
            self.add_token(kind, start);
        } else {
            self.error_span(
                start..self.pos,
                &format!("unknown keyword '{}'", text),
                "L002",
            );
        }
    }

    /// Skips whitespace and `#` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '#' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_identifier_continue(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    /// Adds a token covering `start..pos` to the token stream.
    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.pos];
        self.tokens.push(Token::new(kind, start..self.pos, text));
    }

    /// Adds an error diagnostic at a single position.
    fn error(&mut self, pos: usize, message: &str) {
        let span = pos..pos.saturating_add(1).min(self.source.len());
        self.error_span(span, message, "L001");
    }

    /// Adds an error diagnostic with an explicit span and code.
    fn error_span(&mut self, span: crate::Span, message: &str, code: &str) {
        self.diagnostics.push(
            Diag::error(message)
                .with_primary_label(span, "here")
                .with_code(code),
        );
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Advances and returns the current character.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if ch != '\0' {
            self.pos += ch.len_utf8();
        }
        ch
    }

    /// Consumes a character if it matches the expected one.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

/// Convenience function to tokenize a source string.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let result = tokenize(source);
        assert!(
            result.diagnostics.is_empty(),
            "unexpected diagnostics for {source:?}: {:?}",
            result.diagnostics
        );
        result.tokens.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn empty_input() {
        let result = tokenize("");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::Eof);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn whitespace_and_comments_only() {
        let result = tokenize("  \t\n # a comment\n  ");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("SELECT select SeLeCt"),
            vec![
                TokenKind::Select,
                TokenKind::Select,
                TokenKind::Select,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn bindings() {
        let result = tokenize("?foo ?bar_2");
        assert_eq!(result.tokens[0].kind, TokenKind::Binding);
        assert_eq!(result.tokens[0].text, "?foo");
        assert_eq!(result.tokens[1].kind, TokenKind::Binding);
        assert_eq!(result.tokens[1].text, "?bar_2");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn binding_requires_name() {
        let result = tokenize("? foo");
        assert!(!result.diagnostics.is_empty());
    }

    #[test]
    fn nodes() {
        let result = tokenize("/person<alice> /_<uuid-1234>");
        assert_eq!(result.tokens[0].kind, TokenKind::Node);
        assert_eq!(result.tokens[0].text, "/person<alice>");
        assert_eq!(result.tokens[1].kind, TokenKind::Node);
        assert_eq!(result.tokens[1].text, "/_<uuid-1234>");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn hierarchical_node_kind() {
        let result = tokenize("/person/employee<bob>");
        assert_eq!(result.tokens[0].kind, TokenKind::Node);
        assert_eq!(result.tokens[0].text, "/person/employee<bob>");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn node_without_id_is_an_error() {
        let result = tokenize("/person");
        assert!(!result.diagnostics.is_empty());
        assert!(result.diagnostics[0].message.contains("id"));
    }

    #[test]
    fn node_with_unclosed_id_is_an_error() {
        let result = tokenize("/person<alice");
        assert!(!result.diagnostics.is_empty());
        assert!(result.diagnostics[0].message.contains("unclosed"));
    }

    #[test]
    fn predicates() {
        let result = tokenize(r#""knows"@[] "knows"@[2016-01-01T00:00:00Z] "p"@[?anchor]"#);
        assert_eq!(result.tokens[0].kind, TokenKind::Predicate);
        assert_eq!(result.tokens[0].text, r#""knows"@[]"#);
        assert_eq!(result.tokens[1].kind, TokenKind::Predicate);
        assert_eq!(result.tokens[2].kind, TokenKind::Predicate);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn predicate_bound_has_comma() {
        let source = r#""knows"@[2015-01-01T00:00:00Z,2016-01-01T00:00:00Z]"#;
        let result = tokenize(source);
        assert_eq!(result.tokens[0].kind, TokenKind::PredicateBound);
        assert_eq!(result.tokens[0].text, source);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn unclosed_anchor_is_an_error() {
        let result = tokenize(r#""knows"@[2016"#);
        assert!(!result.diagnostics.is_empty());
        assert!(result.diagnostics[0].message.contains("unclosed"));
    }

    #[test]
    fn literals() {
        let result = tokenize(r#""true"^^type:bool "42"^^type:int64 "hi"^^type:text"#);
        for token in &result.tokens[..3] {
            assert_eq!(token.kind, TokenKind::Literal);
        }
        assert_eq!(result.tokens[0].text, r#""true"^^type:bool"#);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn bare_quoted_value_is_an_error() {
        let result = tokenize(r#""orphan""#);
        assert!(!result.diagnostics.is_empty());
        assert!(result.diagnostics[0].help.is_some());
    }

    #[test]
    fn unknown_keyword_is_an_error() {
        let result = tokenize("select frobnicate");
        assert_eq!(result.tokens[0].kind, TokenKind::Select);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("frobnicate"));
        assert_eq!(result.diagnostics[0].code.as_deref(), Some("L002"));
    }

    #[test]
    fn full_select_statement() {
        let source = r#"select ?s from ?g where { ?s "knows"@[] /person<bob> };"#;
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Select,
                TokenKind::Binding,
                TokenKind::From,
                TokenKind::Binding,
                TokenKind::Where,
                TokenKind::LBrace,
                TokenKind::Binding,
                TokenKind::Predicate,
                TokenKind::Node,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn full_insert_statement() {
        let source = r#"insert data into ?g { /person<alice> "knows"@[] /person<bob> };"#;
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Insert,
                TokenKind::Data,
                TokenKind::Into,
                TokenKind::Binding,
                TokenKind::LBrace,
                TokenKind::Node,
                TokenKind::Predicate,
                TokenKind::Node,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_cover_source_slices() {
        let source = r#"select ?s"#;
        let result = tokenize(source);
        for token in &result.tokens {
            assert_eq!(token.text, source[token.span.clone()]);
        }
    }

    #[test]
    fn error_recovery_continues_scanning() {
        let result = tokenize("select ! ?s");
        assert_eq!(result.tokens[0].kind, TokenKind::Select);
        assert_eq!(result.tokens[1].kind, TokenKind::Binding);
        assert_eq!(result.diagnostics.len(), 1);
    }
}
