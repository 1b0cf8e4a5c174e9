//! The statement and graph-clause data model.
//!
//! A [`Statement`] is the mutable accumulator for one query or mutation.
//! Hooks populate it in place as the grammar layer reduces productions;
//! once analysis completes it becomes immutable input to the planner. On
//! any semantic error the caller discards the partially built statement.

use crate::term::{Node, Predicate, Triple};
use chrono::{DateTime, FixedOffset};
use smol_str::SmolStr;
use std::fmt;

/// The kind of statement being assembled.
///
/// Bound exactly once per statement by the type-binding hook. Re-binding
/// overwrites silently; the grammar reaches the binding production once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Query,
    Insert,
    Delete,
    CreateGraph,
    DropGraph,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Query => write!(f, "query"),
            StatementKind::Insert => write!(f, "insert"),
            StatementKind::Delete => write!(f, "delete"),
            StatementKind::CreateGraph => write!(f, "create graph"),
            StatementKind::DropGraph => write!(f, "drop graph"),
        }
    }
}

/// A subject or object position held by a node: resolved or bound.
///
/// A role holds either a resolved value or a binding, never both; the
/// variants make the invariant impossible to violate.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityTerm {
    /// A resolved node.
    Node(Node),
    /// A binding resolved at execution time.
    Binding(SmolStr),
}

/// The predicate position of a clause, covering every anchor form the
/// language allows.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateTerm {
    /// A fully resolved predicate, anchor included.
    Resolved(Predicate),
    /// The whole position is a binding.
    Binding(SmolStr),
    /// A predicate id whose anchor is supplied by a binding.
    AnchorBinding { id: SmolStr, anchor: SmolStr },
    /// A temporal range between two instants; `lower` is strictly earlier.
    Range {
        id: SmolStr,
        lower: DateTime<FixedOffset>,
        upper: DateTime<FixedOffset>,
    },
    /// A temporal range whose endpoints are bindings.
    RangeBindings {
        id: SmolStr,
        lower: SmolStr,
        upper: SmolStr,
    },
}

/// The object position of a clause: node-shaped, literal, predicate-shaped
/// (including temporal forms), or bound.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectTerm {
    Node(Node),
    Literal(crate::term::Literal),
    Predicate(PredicateTerm),
    Binding(SmolStr),
}

/// String-valued clause fields addressable by the clause builders.
///
/// The set of selectors is fixed by the clause schema and bound into a
/// builder when its factory runs; selectors are never derived from parsed
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringField {
    SubjectAlias,
    SubjectTypeAlias,
    SubjectIdAlias,
    PredicateAlias,
    PredicateIdAlias,
    PredicateAnchorAlias,
    ObjectAlias,
    ObjectTypeAlias,
    ObjectIdAlias,
    ObjectAnchorAlias,
}

impl StringField {
    /// Every addressable string field, in schema order.
    pub const ALL: [StringField; 10] = [
        StringField::SubjectAlias,
        StringField::SubjectTypeAlias,
        StringField::SubjectIdAlias,
        StringField::PredicateAlias,
        StringField::PredicateIdAlias,
        StringField::PredicateAnchorAlias,
        StringField::ObjectAlias,
        StringField::ObjectTypeAlias,
        StringField::ObjectIdAlias,
        StringField::ObjectAnchorAlias,
    ];
}

impl fmt::Display for StringField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringField::SubjectAlias => write!(f, "subject alias"),
            StringField::SubjectTypeAlias => write!(f, "subject type alias"),
            StringField::SubjectIdAlias => write!(f, "subject id alias"),
            StringField::PredicateAlias => write!(f, "predicate alias"),
            StringField::PredicateIdAlias => write!(f, "predicate id alias"),
            StringField::PredicateAnchorAlias => write!(f, "predicate anchor alias"),
            StringField::ObjectAlias => write!(f, "object alias"),
            StringField::ObjectTypeAlias => write!(f, "object type alias"),
            StringField::ObjectIdAlias => write!(f, "object id alias"),
            StringField::ObjectAnchorAlias => write!(f, "object anchor alias"),
        }
    }
}

/// One triple pattern of a WHERE graph pattern.
///
/// Each role pairs a term slot with the aliases the clause grammar allows
/// for it. Term slots are written by the clause builders through the
/// role-typed setters; alias slots are addressed by [`StringField`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphClause {
    pub subject: Option<EntityTerm>,
    pub subject_alias: Option<SmolStr>,
    pub subject_type_alias: Option<SmolStr>,
    pub subject_id_alias: Option<SmolStr>,

    pub predicate: Option<PredicateTerm>,
    pub predicate_alias: Option<SmolStr>,
    pub predicate_id_alias: Option<SmolStr>,
    pub predicate_anchor_alias: Option<SmolStr>,

    pub object: Option<ObjectTerm>,
    pub object_alias: Option<SmolStr>,
    pub object_type_alias: Option<SmolStr>,
    pub object_id_alias: Option<SmolStr>,
    pub object_anchor_alias: Option<SmolStr>,
}

impl GraphClause {
    /// Creates an empty clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the selected string field.
    pub fn string_field(&self, field: StringField) -> Option<&SmolStr> {
        match field {
            StringField::SubjectAlias => self.subject_alias.as_ref(),
            StringField::SubjectTypeAlias => self.subject_type_alias.as_ref(),
            StringField::SubjectIdAlias => self.subject_id_alias.as_ref(),
            StringField::PredicateAlias => self.predicate_alias.as_ref(),
            StringField::PredicateIdAlias => self.predicate_id_alias.as_ref(),
            StringField::PredicateAnchorAlias => self.predicate_anchor_alias.as_ref(),
            StringField::ObjectAlias => self.object_alias.as_ref(),
            StringField::ObjectTypeAlias => self.object_type_alias.as_ref(),
            StringField::ObjectIdAlias => self.object_id_alias.as_ref(),
            StringField::ObjectAnchorAlias => self.object_anchor_alias.as_ref(),
        }
    }

    /// Writes the selected string field, leaving every other field alone.
    pub fn set_string_field(&mut self, field: StringField, value: SmolStr) {
        let slot = match field {
            StringField::SubjectAlias => &mut self.subject_alias,
            StringField::SubjectTypeAlias => &mut self.subject_type_alias,
            StringField::SubjectIdAlias => &mut self.subject_id_alias,
            StringField::PredicateAlias => &mut self.predicate_alias,
            StringField::PredicateIdAlias => &mut self.predicate_id_alias,
            StringField::PredicateAnchorAlias => &mut self.predicate_anchor_alias,
            StringField::ObjectAlias => &mut self.object_alias,
            StringField::ObjectTypeAlias => &mut self.object_type_alias,
            StringField::ObjectIdAlias => &mut self.object_id_alias,
            StringField::ObjectAnchorAlias => &mut self.object_anchor_alias,
        };
        *slot = Some(value);
    }
}

/// The mutable accumulator for one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    kind: Option<StatementKind>,
    graphs: Vec<SmolStr>,
    data: Vec<Triple>,
    working: Option<GraphClause>,
    pattern: Vec<GraphClause>,
}

impl Statement {
    /// Creates an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statement kind, once bound.
    pub fn kind(&self) -> Option<StatementKind> {
        self.kind
    }

    /// Returns the graphs this statement addresses, in source order.
    pub fn graphs(&self) -> &[SmolStr] {
        &self.graphs
    }

    /// Returns the data triples of a mutation statement, in source order.
    pub fn data(&self) -> &[Triple] {
        &self.data
    }

    /// Returns the clause currently being populated, if a pattern is open.
    pub fn working_clause(&self) -> Option<&GraphClause> {
        self.working.as_ref()
    }

    /// Returns the committed pattern clauses, in source order.
    pub fn pattern_clauses(&self) -> &[GraphClause] {
        &self.pattern
    }

    /// Discards any working clause and opens a fresh empty one.
    pub fn reset_working_clause(&mut self) {
        self.working = Some(GraphClause::new());
    }

    pub(crate) fn set_kind(&mut self, kind: StatementKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn add_graph(&mut self, name: SmolStr) {
        self.graphs.push(name);
    }

    pub(crate) fn add_data(&mut self, triple: Triple) {
        self.data.push(triple);
    }

    pub(crate) fn working_clause_mut(&mut self) -> Option<&mut GraphClause> {
        self.working.as_mut()
    }

    pub(crate) fn take_working_clause(&mut self) -> Option<GraphClause> {
        self.working.take()
    }

    pub(crate) fn push_pattern_clause(&mut self, clause: GraphClause) {
        self.pattern.push(clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Literal, Predicate, parse_instant};

    #[test]
    fn statement_kind_display() {
        assert_eq!(StatementKind::Query.to_string(), "query");
        assert_eq!(StatementKind::Insert.to_string(), "insert");
        assert_eq!(StatementKind::Delete.to_string(), "delete");
        assert_eq!(StatementKind::CreateGraph.to_string(), "create graph");
        assert_eq!(StatementKind::DropGraph.to_string(), "drop graph");
    }

    #[test]
    fn string_field_writes_exactly_one_slot() {
        for field in StringField::ALL {
            let mut clause = GraphClause::new();
            clause.set_string_field(field, "?x".into());
            assert_eq!(
                clause.string_field(field).map(SmolStr::as_str),
                Some("?x"),
                "field {field} not written"
            );
            for other in StringField::ALL {
                if other != field {
                    assert!(
                        clause.string_field(other).is_none(),
                        "setting {field} also wrote {other}"
                    );
                }
            }
            assert!(clause.subject.is_none());
            assert!(clause.predicate.is_none());
            assert!(clause.object.is_none());
        }
    }

    #[test]
    fn term_slots_store_structurally_equal_values() {
        let node = Node::parse("/person<alice>").unwrap();
        let mut clause = GraphClause::new();
        clause.subject = Some(EntityTerm::Node(node.clone()));
        assert_eq!(clause.subject, Some(EntityTerm::Node(node)));
        assert!(clause.predicate.is_none());
        assert!(clause.object.is_none());
        for field in StringField::ALL {
            assert!(clause.string_field(field).is_none());
        }

        let predicate = Predicate::parse(r#""knows"@[]"#).unwrap();
        let mut clause = GraphClause::new();
        clause.predicate = Some(PredicateTerm::Resolved(predicate.clone()));
        assert_eq!(clause.predicate, Some(PredicateTerm::Resolved(predicate)));
        assert!(clause.subject.is_none());

        let literal = Literal::parse(r#""42"^^type:int64"#).unwrap();
        let mut clause = GraphClause::new();
        clause.object = Some(ObjectTerm::Literal(literal.clone()));
        assert_eq!(clause.object, Some(ObjectTerm::Literal(literal)));
    }

    #[test]
    fn predicate_term_forms_are_distinct() {
        let lower = parse_instant("2015-01-01T00:00:00Z").unwrap();
        let upper = parse_instant("2016-01-01T00:00:00Z").unwrap();
        let range = PredicateTerm::Range {
            id: "knows".into(),
            lower,
            upper,
        };
        let bindings = PredicateTerm::RangeBindings {
            id: "knows".into(),
            lower: "?from".into(),
            upper: "?to".into(),
        };
        assert_ne!(range, bindings);
    }

    #[test]
    fn working_clause_lifecycle() {
        let mut statement = Statement::new();
        assert!(statement.working_clause().is_none());

        statement.reset_working_clause();
        assert_eq!(statement.working_clause(), Some(&GraphClause::new()));

        let clause = statement.take_working_clause().unwrap();
        statement.push_pattern_clause(clause);
        assert!(statement.working_clause().is_none());
        assert_eq!(statement.pattern_clauses().len(), 1);
    }

    #[test]
    fn reset_discards_partial_clause() {
        let mut statement = Statement::new();
        statement.reset_working_clause();
        statement
            .working_clause_mut()
            .unwrap()
            .set_string_field(StringField::SubjectAlias, "?x".into());
        statement.reset_working_clause();
        assert_eq!(statement.working_clause(), Some(&GraphClause::new()));
    }
}
