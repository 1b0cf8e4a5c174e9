//! Predicates and their temporal anchors.

use super::TermError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use smol_str::SmolStr;
use std::fmt;

/// A predicate: a quoted id plus a temporal anchor, written `"id"@[anchor]`.
///
/// Immutable predicates have an empty anchor (`"knows"@[]`); temporal
/// predicates carry the RFC 3339 instant at which the fact holds. Anchors
/// keep their source offset, so two anchors compare by absolute time but
/// display as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    id: SmolStr,
    anchor: Option<DateTime<FixedOffset>>,
}

impl Predicate {
    /// Creates an immutable predicate.
    pub fn immutable(id: impl Into<SmolStr>) -> Self {
        Self {
            id: id.into(),
            anchor: None,
        }
    }

    /// Creates a temporal predicate anchored at the given instant.
    pub fn temporal(id: impl Into<SmolStr>, anchor: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            anchor: Some(anchor),
        }
    }

    /// Parses the canonical text form `"id"@[]` or `"id"@[instant]`.
    ///
    /// A binding in the anchor position is rejected here; bindings are
    /// resolved by the semantic layer, not by the term parser.
    pub fn parse(text: &str) -> Result<Self, TermError> {
        let (id, anchor) = split_parts(text)?;
        let anchor = anchor.trim();
        if anchor.is_empty() {
            return Ok(Self::immutable(id));
        }
        if anchor.starts_with('?') {
            return Err(TermError::MalformedPredicate(SmolStr::new(text)));
        }
        Ok(Self::temporal(id, parse_instant(anchor)?))
    }

    /// Returns the predicate id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the anchor instant, if this predicate is temporal.
    pub fn anchor(&self) -> Option<&DateTime<FixedOffset>> {
        self.anchor.as_ref()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            None => write!(f, "\"{}\"@[]", self.id),
            Some(anchor) => write!(
                f,
                "\"{}\"@[{}]",
                self.id,
                anchor.to_rfc3339_opts(SecondsFormat::Nanos, true)
            ),
        }
    }
}

/// Parses an RFC 3339 time instant with nanosecond precision.
pub fn parse_instant(text: &str) -> Result<DateTime<FixedOffset>, TermError> {
    DateTime::parse_from_rfc3339(text).map_err(|_| TermError::MalformedInstant(SmolStr::new(text)))
}

/// Splits predicate text into its id and the raw anchor text between the
/// brackets. Shared with the semantic layer, which resolves anchors that
/// the strict parser rejects (bindings and bound pairs).
pub(crate) fn split_parts(text: &str) -> Result<(SmolStr, &str), TermError> {
    let malformed = || TermError::MalformedPredicate(SmolStr::new(text));

    let rest = text.strip_prefix('"').ok_or_else(malformed)?;
    let (id, rest) = rest.split_once('"').ok_or_else(malformed)?;
    let anchor = rest
        .strip_prefix("@[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    if id.is_empty() {
        return Err(malformed());
    }
    Ok((SmolStr::new(id), anchor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_immutable_predicate() {
        let predicate = Predicate::parse(r#""knows"@[]"#).unwrap();
        assert_eq!(predicate.id(), "knows");
        assert!(predicate.anchor().is_none());
    }

    #[test]
    fn parse_temporal_predicate() {
        let predicate =
            Predicate::parse(r#""knows"@[2015-07-19T13:12:04.669618843-07:00]"#).unwrap();
        assert_eq!(predicate.id(), "knows");
        let anchor = predicate.anchor().unwrap();
        assert_eq!(anchor.timestamp_subsec_nanos(), 669_618_843);
    }

    #[test]
    fn display_round_trips() {
        for text in [
            r#""knows"@[]"#,
            r#""knows"@[2015-07-19T13:12:04.669618843-07:00]"#,
            r#""met"@[2016-01-01T00:00:00.000000000Z]"#,
        ] {
            assert_eq!(Predicate::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn anchors_compare_by_absolute_time() {
        let earlier = parse_instant("2015-07-19T13:12:04.669618843-07:00").unwrap();
        let later = parse_instant("2016-07-19T13:12:04.669618843-07:00").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn rejects_binding_anchor() {
        assert_eq!(
            Predicate::parse(r#""knows"@[?when]"#),
            Err(TermError::MalformedPredicate(r#""knows"@[?when]"#.into()))
        );
    }

    #[test]
    fn rejects_malformed_predicates() {
        for text in [r#"knows"@[]"#, r#""knows""#, r#""knows"@[]x"#, r#"""@[]"#] {
            assert!(
                Predicate::parse(text).is_err(),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_instants() {
        assert!(matches!(
            parse_instant("yesterday"),
            Err(TermError::MalformedInstant(_))
        ));
        assert!(matches!(
            Predicate::parse(r#""knows"@[yesterday]"#),
            Err(TermError::MalformedInstant(_))
        ));
    }
}
