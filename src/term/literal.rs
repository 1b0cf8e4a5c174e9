//! Typed literal values.

use super::TermError;
use smol_str::SmolStr;
use std::fmt;

/// A typed literal, written `"value"^^type:tag`.
///
/// The value text is interpreted according to the type tag; `parse` and
/// `Display` round-trip the canonical form.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(SmolStr),
    /// Raw bytes, written as space-separated decimal octets: `"[1 2 3]"^^type:blob`.
    Blob(Vec<u8>),
}

/// Signature of a literal parser, injected into the data accumulator so
/// general triple ingestion can supply its own literal handling.
pub type LiteralParser = fn(&str) -> Result<Literal, TermError>;

impl Literal {
    /// Parses the canonical text form `"value"^^type:tag`.
    pub fn parse(text: &str) -> Result<Self, TermError> {
        let malformed = || TermError::MalformedLiteral(SmolStr::new(text));

        let (value, tag) = text.rsplit_once("\"^^type:").ok_or_else(malformed)?;
        let value = value.strip_prefix('"').ok_or_else(malformed)?;

        match tag {
            "bool" => match value {
                "true" => Ok(Literal::Bool(true)),
                "false" => Ok(Literal::Bool(false)),
                _ => Err(malformed()),
            },
            "int64" => value
                .parse::<i64>()
                .map(Literal::Int64)
                .map_err(|_| malformed()),
            "float64" => value
                .parse::<f64>()
                .map(Literal::Float64)
                .map_err(|_| malformed()),
            "text" => Ok(Literal::Text(SmolStr::new(value))),
            "blob" => parse_blob(value).ok_or_else(malformed).map(Literal::Blob),
            _ => Err(TermError::UnknownLiteralType(SmolStr::new(text))),
        }
    }

    /// Returns the type tag of this literal.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Int64(_) => "int64",
            Literal::Float64(_) => "float64",
            Literal::Text(_) => "text",
            Literal::Blob(_) => "blob",
        }
    }
}

fn parse_blob(value: &str) -> Option<Vec<u8>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    inner
        .split_whitespace()
        .map(|octet| octet.parse::<u8>().ok())
        .collect()
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "\"{}\"^^type:bool", value),
            Literal::Int64(value) => write!(f, "\"{}\"^^type:int64", value),
            Literal::Float64(value) => write!(f, "\"{}\"^^type:float64", value),
            Literal::Text(value) => write!(f, "\"{}\"^^type:text", value),
            Literal::Blob(bytes) => {
                write!(f, "\"[")?;
                for (index, byte) in bytes.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", byte)?;
                }
                write!(f, "]\"^^type:blob")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_type() {
        assert_eq!(
            Literal::parse(r#""true"^^type:bool"#).unwrap(),
            Literal::Bool(true)
        );
        assert_eq!(
            Literal::parse(r#""-42"^^type:int64"#).unwrap(),
            Literal::Int64(-42)
        );
        assert_eq!(
            Literal::parse(r#""2.5"^^type:float64"#).unwrap(),
            Literal::Float64(2.5)
        );
        assert_eq!(
            Literal::parse(r#""hello world"^^type:text"#).unwrap(),
            Literal::Text("hello world".into())
        );
        assert_eq!(
            Literal::parse(r#""[0 1 255]"^^type:blob"#).unwrap(),
            Literal::Blob(vec![0, 1, 255])
        );
    }

    #[test]
    fn display_round_trips() {
        for text in [
            r#""true"^^type:bool"#,
            r#""-42"^^type:int64"#,
            r#""2.5"^^type:float64"#,
            r#""hello"^^type:text"#,
            r#""[0 1 255]"^^type:blob"#,
        ] {
            assert_eq!(Literal::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn text_value_may_contain_quotes() {
        let literal = Literal::parse(r#""she said "hi""^^type:text"#).unwrap();
        assert_eq!(literal, Literal::Text(r#"she said "hi""#.into()));
    }

    #[test]
    fn type_names() {
        assert_eq!(Literal::Bool(true).type_name(), "bool");
        assert_eq!(Literal::Blob(vec![]).type_name(), "blob");
    }

    #[test]
    fn rejects_malformed_literals() {
        for text in [
            r#""yes"^^type:bool"#,
            r#""12.5"^^type:int64"#,
            r#""abc"^^type:float64"#,
            r#""1 2"^^type:blob"#,
            r#"42"#,
            r#""42""#,
        ] {
            assert!(
                matches!(Literal::parse(text), Err(TermError::MalformedLiteral(_))),
                "expected {text:?} to be rejected as malformed"
            );
        }
    }

    #[test]
    fn rejects_unknown_type_tag() {
        assert!(matches!(
            Literal::parse(r#""42"^^type:uint128"#),
            Err(TermError::UnknownLiteralType(_))
        ));
    }
}
