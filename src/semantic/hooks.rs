//! Semantic hooks: the execution model that assigns consumed elements to
//! semantic roles.
//!
//! A hook is a value representing one bounded unit of semantic work.
//! Processing a consumed element yields the hook to invoke on the next
//! element (often the same one), or `None` once the chain segment has
//! completed with its effects committed to the statement. The grammar
//! layer drives the loop; the hooks hold no state beyond their own, so the
//! same factory can serve independent clauses and statements without
//! cross-contamination.
//!
//! Hooks never look ahead and never buffer beyond the clause or triple
//! under construction. The first error aborts analysis of the whole
//! statement; the caller discards the partially built [`Statement`].
//!
//! The clause builders for the subject, predicate, and object roles share
//! one control-flow skeleton ([`ClauseHook`]); each factory instantiates
//! it with the selector set naming the clause fields of its role.

use super::diag;
use super::element::ConsumedElement;
use super::statement::{
    EntityTerm, GraphClause, ObjectTerm, PredicateTerm, Statement, StatementKind, StringField,
};
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind};
use crate::term::literal::LiteralParser;
use crate::term::{Literal, Node, Object, Predicate, TermError, Triple, predicate};
use smol_str::SmolStr;

/// A bounded unit of semantic work, advanced one consumed element at a
/// time.
#[derive(Debug, Clone)]
pub enum ElementHook {
    /// Binds the statement kind, then completes.
    TypeBinding(StatementKind),
    /// Accumulates graph bindings separated by commas.
    GraphAccumulator,
    /// Folds subject/predicate/object token triples into data triples.
    DataAccumulator(DataAccumulator),
    /// Opens the first working clause of a graph pattern.
    InitWorkingClause,
    /// Commits the working clause and opens the next one.
    NextWorkingClause,
    /// Populates one role of the working clause.
    Clause(ClauseHook),
}

impl ElementHook {
    /// Processes one consumed element against the statement.
    ///
    /// Returns the hook to invoke on the next element, or `None` when this
    /// chain segment is complete. An error terminates semantic analysis of
    /// the statement; mutations already applied are not rolled back, so
    /// the caller must discard the statement.
    pub fn process(
        self,
        statement: &mut Statement,
        element: &ConsumedElement,
    ) -> Result<Option<ElementHook>, Diag> {
        match self {
            ElementHook::TypeBinding(kind) => {
                statement.set_kind(kind);
                Ok(None)
            }
            ElementHook::GraphAccumulator => process_graph(statement, element),
            ElementHook::DataAccumulator(accumulator) => accumulator.process(statement, element),
            ElementHook::InitWorkingClause => {
                if statement.working_clause().is_some() {
                    return Err(diag::clause_already_open());
                }
                statement.reset_working_clause();
                Ok(None)
            }
            ElementHook::NextWorkingClause => match statement.take_working_clause() {
                Some(clause) => {
                    statement.push_pattern_clause(clause);
                    statement.reset_working_clause();
                    Ok(Some(ElementHook::NextWorkingClause))
                }
                None => Err(diag::missing_working_clause()),
            },
            ElementHook::Clause(builder) => builder.process(statement, element),
        }
    }
}

/// Returns a hook that binds the statement kind on its first invocation,
/// regardless of the element it consumes, and completes.
pub fn type_binding_hook(kind: StatementKind) -> ElementHook {
    ElementHook::TypeBinding(kind)
}

/// Returns a hook that appends every graph binding it consumes to the
/// statement, skipping separators.
///
/// Duplicates are preserved; de-duplication policy belongs downstream.
pub fn graph_accumulator() -> ElementHook {
    ElementHook::GraphAccumulator
}

/// Returns a hook that folds consumed node/predicate/object token triples
/// into completed triples on the statement.
///
/// Objects may be nodes, predicates, or literals; literal text goes
/// through the supplied parser. Tokens that are not term-shaped (braces,
/// separators) pass through untouched.
pub fn data_accumulator(parse_literal: LiteralParser) -> ElementHook {
    ElementHook::DataAccumulator(DataAccumulator::new(parse_literal))
}

/// Returns a hook that opens the first working clause of a graph pattern,
/// failing if one is already open.
pub fn where_init_working_clause() -> ElementHook {
    ElementHook::InitWorkingClause
}

/// Returns a hook that, each time it fires, commits the working clause to
/// the pattern and opens a fresh one.
pub fn where_next_working_clause() -> ElementHook {
    ElementHook::NextWorkingClause
}

/// Returns the clause builder for the subject role.
pub fn where_subject_clause() -> ElementHook {
    ElementHook::Clause(ClauseHook::new(SUBJECT_FIELDS))
}

/// Returns the clause builder for the predicate role.
pub fn where_predicate_clause() -> ElementHook {
    ElementHook::Clause(ClauseHook::new(PREDICATE_FIELDS))
}

/// Returns the clause builder for the object role.
pub fn where_object_clause() -> ElementHook {
    ElementHook::Clause(ClauseHook::new(OBJECT_FIELDS))
}

fn process_graph(
    statement: &mut Statement,
    element: &ConsumedElement,
) -> Result<Option<ElementHook>, Diag> {
    let Some(token) = element.as_token() else {
        return Ok(Some(ElementHook::GraphAccumulator));
    };
    match token.kind {
        TokenKind::Comma => Ok(Some(ElementHook::GraphAccumulator)),
        TokenKind::Binding => {
            statement.add_graph(token.text.clone());
            Ok(Some(ElementHook::GraphAccumulator))
        }
        _ => Err(diag::unexpected_token("the statement graph list", token)
            .with_help("graphs are referred to by bindings such as '?family'")),
    }
}

/// The data accumulator: the triple under construction plus the literal
/// parser used for literal objects.
#[derive(Debug, Clone)]
pub struct DataAccumulator {
    parse_literal: LiteralParser,
    state: TripleState,
}

#[derive(Debug, Clone)]
enum TripleState {
    AwaitSubject,
    AwaitPredicate { subject: Node },
    AwaitObject { subject: Node, predicate: Predicate },
}

impl DataAccumulator {
    fn new(parse_literal: LiteralParser) -> Self {
        Self {
            parse_literal,
            state: TripleState::AwaitSubject,
        }
    }

    fn process(
        mut self,
        statement: &mut Statement,
        element: &ConsumedElement,
    ) -> Result<Option<ElementHook>, Diag> {
        let Some(token) = element.as_token() else {
            return Ok(Some(ElementHook::DataAccumulator(self)));
        };
        if !token.kind.is_term() {
            // Braces and separators between triples carry no data.
            return Ok(Some(ElementHook::DataAccumulator(self)));
        }

        self.state = match self.state {
            TripleState::AwaitSubject => {
                if token.kind != TokenKind::Node {
                    return Err(diag::unexpected_token("the subject of a data triple", token));
                }
                let subject = Node::parse(&token.text)
                    .map_err(|err| diag::malformed_term("subject", &err, token))?;
                TripleState::AwaitPredicate { subject }
            }
            TripleState::AwaitPredicate { subject } => {
                if token.kind != TokenKind::Predicate {
                    return Err(diag::unexpected_token(
                        "the predicate of a data triple",
                        token,
                    ));
                }
                let predicate = Predicate::parse(&token.text)
                    .map_err(|err| diag::malformed_term("predicate", &err, token))?;
                TripleState::AwaitObject { subject, predicate }
            }
            TripleState::AwaitObject { subject, predicate } => {
                let object = match token.kind {
                    TokenKind::Node => Object::Node(
                        Node::parse(&token.text)
                            .map_err(|err| diag::malformed_term("object", &err, token))?,
                    ),
                    TokenKind::Predicate => Object::Predicate(
                        Predicate::parse(&token.text)
                            .map_err(|err| diag::malformed_term("object", &err, token))?,
                    ),
                    TokenKind::Literal => Object::Literal(
                        (self.parse_literal)(&token.text)
                            .map_err(|err| diag::malformed_term("object", &err, token))?,
                    ),
                    _ => {
                        return Err(diag::unexpected_token("the object of a data triple", token));
                    }
                };
                statement.add_data(Triple::new(subject, predicate, object));
                TripleState::AwaitSubject
            }
        };
        Ok(Some(ElementHook::DataAccumulator(self)))
    }
}

/// Which clause role a builder populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseRole {
    Subject,
    Predicate,
    Object,
}

impl ClauseRole {
    fn as_str(self) -> &'static str {
        match self {
            ClauseRole::Subject => "subject",
            ClauseRole::Predicate => "predicate",
            ClauseRole::Object => "object",
        }
    }
}

/// The clause fields one role's builder writes.
///
/// The selector set is fixed by the clause schema and bound at factory
/// construction; a role without a given alias rejects its keyword.
#[derive(Debug, Clone, Copy)]
struct RoleFields {
    role: ClauseRole,
    alias: StringField,
    type_alias: Option<StringField>,
    id_alias: StringField,
    anchor_alias: Option<StringField>,
}

const SUBJECT_FIELDS: RoleFields = RoleFields {
    role: ClauseRole::Subject,
    alias: StringField::SubjectAlias,
    type_alias: Some(StringField::SubjectTypeAlias),
    id_alias: StringField::SubjectIdAlias,
    anchor_alias: None,
};

const PREDICATE_FIELDS: RoleFields = RoleFields {
    role: ClauseRole::Predicate,
    alias: StringField::PredicateAlias,
    type_alias: None,
    id_alias: StringField::PredicateIdAlias,
    anchor_alias: Some(StringField::PredicateAnchorAlias),
};

const OBJECT_FIELDS: RoleFields = RoleFields {
    role: ClauseRole::Object,
    alias: StringField::ObjectAlias,
    type_alias: Some(StringField::ObjectTypeAlias),
    id_alias: StringField::ObjectIdAlias,
    anchor_alias: Some(StringField::ObjectAnchorAlias),
};

/// A clause builder: one role's state machine over the working clause.
///
/// The builder accepts the role's value form (or a binding standing in
/// for it), followed by any alias suffixes the role allows. After an
/// alias keyword, `pending` names the field the next binding lands in.
#[derive(Debug, Clone)]
pub struct ClauseHook {
    fields: RoleFields,
    pending: Option<StringField>,
}

impl ClauseHook {
    fn new(fields: RoleFields) -> Self {
        Self {
            fields,
            pending: None,
        }
    }

    fn context(&self) -> String {
        format!("the {} clause", self.fields.role.as_str())
    }

    fn process(
        mut self,
        statement: &mut Statement,
        element: &ConsumedElement,
    ) -> Result<Option<ElementHook>, Diag> {
        let Some(token) = element.as_token() else {
            return Ok(Some(ElementHook::Clause(self)));
        };
        let Some(clause) = statement.working_clause_mut() else {
            return Err(diag::missing_working_clause());
        };

        match token.kind {
            TokenKind::As => self.expect_alias(Some(self.fields.alias), token)?,
            TokenKind::Type => self.expect_alias(self.fields.type_alias, token)?,
            TokenKind::Id => self.expect_alias(Some(self.fields.id_alias), token)?,
            TokenKind::At => self.expect_alias(self.fields.anchor_alias, token)?,
            TokenKind::Binding => match self.pending.take() {
                Some(field) => {
                    if clause.string_field(field).is_some() {
                        return Err(diag::duplicate_value(field, token));
                    }
                    clause.set_string_field(field, token.text.clone());
                }
                None => set_role_value(clause, self.fields.role, token)?,
            },
            kind if kind.is_term() => {
                if self.pending.is_some() {
                    return Err(diag::unexpected_token(&self.context(), token));
                }
                set_role_value(clause, self.fields.role, token)?;
            }
            _ => return Err(diag::unexpected_token(&self.context(), token)),
        }
        Ok(Some(ElementHook::Clause(self)))
    }

    /// Remembers the alias field the next binding fills, rejecting the
    /// keyword when the role does not carry that alias.
    fn expect_alias(&mut self, field: Option<StringField>, token: &Token) -> Result<(), Diag> {
        if self.pending.is_some() {
            return Err(diag::unexpected_token(&self.context(), token));
        }
        match field {
            Some(field) => {
                self.pending = Some(field);
                Ok(())
            }
            None => Err(diag::unexpected_token(&self.context(), token)),
        }
    }
}

/// Writes the role's value slot: the parsed term, or the binding standing
/// in for it. The two forms share one slot, which keeps resolved value
/// and binding mutually exclusive.
fn set_role_value(clause: &mut GraphClause, role: ClauseRole, token: &Token) -> Result<(), Diag> {
    match role {
        ClauseRole::Subject => {
            if clause.subject.is_some() {
                return Err(diag::duplicate_value("subject", token));
            }
            clause.subject = Some(match token.kind {
                TokenKind::Binding => EntityTerm::Binding(token.text.clone()),
                TokenKind::Node => EntityTerm::Node(
                    Node::parse(&token.text)
                        .map_err(|err| diag::malformed_term("subject", &err, token))?,
                ),
                _ => return Err(diag::unexpected_token("the subject clause", token)),
            });
        }
        ClauseRole::Predicate => {
            if clause.predicate.is_some() {
                return Err(diag::duplicate_value("predicate", token));
            }
            clause.predicate = Some(match token.kind {
                TokenKind::Binding => PredicateTerm::Binding(token.text.clone()),
                TokenKind::Predicate => resolve_predicate(token, "predicate")?,
                TokenKind::PredicateBound => resolve_predicate_bound(token, "predicate")?,
                _ => return Err(diag::unexpected_token("the predicate clause", token)),
            });
        }
        ClauseRole::Object => {
            if clause.object.is_some() {
                return Err(diag::duplicate_value("object", token));
            }
            clause.object = Some(match token.kind {
                TokenKind::Binding => ObjectTerm::Binding(token.text.clone()),
                TokenKind::Node => ObjectTerm::Node(
                    Node::parse(&token.text)
                        .map_err(|err| diag::malformed_term("object", &err, token))?,
                ),
                TokenKind::Literal => ObjectTerm::Literal(
                    Literal::parse(&token.text)
                        .map_err(|err| diag::malformed_term("object", &err, token))?,
                ),
                TokenKind::Predicate => ObjectTerm::Predicate(resolve_predicate(token, "object")?),
                TokenKind::PredicateBound => {
                    ObjectTerm::Predicate(resolve_predicate_bound(token, "object")?)
                }
                _ => return Err(diag::unexpected_token("the object clause", token)),
            });
        }
    }
    Ok(())
}

/// Resolves predicate-token text into its semantic form: a fully resolved
/// predicate, or an id whose anchor is a binding.
fn resolve_predicate(token: &Token, role: &str) -> Result<PredicateTerm, Diag> {
    let (id, anchor) = predicate::split_parts(&token.text)
        .map_err(|err| diag::malformed_term(role, &err, token))?;
    let anchor = anchor.trim();
    if anchor.starts_with('?') {
        return Ok(PredicateTerm::AnchorBinding {
            id,
            anchor: SmolStr::new(anchor),
        });
    }
    let resolved =
        Predicate::parse(&token.text).map_err(|err| diag::malformed_term(role, &err, token))?;
    Ok(PredicateTerm::Resolved(resolved))
}

/// Resolves bound-token text into a temporal range: two instants or two
/// bindings. Two instants must satisfy `lower < upper` strictly; the
/// working clause is only written after the whole bound validates, so a
/// rejected bound leaves the clause untouched.
fn resolve_predicate_bound(token: &Token, role: &str) -> Result<PredicateTerm, Diag> {
    let (id, inner) = predicate::split_parts(&token.text)
        .map_err(|err| diag::malformed_term(role, &err, token))?;
    let Some((lower, upper)) = inner.split_once(',') else {
        let err = TermError::MalformedPredicate(token.text.clone());
        return Err(diag::malformed_term(role, &err, token));
    };
    let (lower, upper) = (lower.trim(), upper.trim());
    match (lower.starts_with('?'), upper.starts_with('?')) {
        (true, true) => Ok(PredicateTerm::RangeBindings {
            id,
            lower: SmolStr::new(lower),
            upper: SmolStr::new(upper),
        }),
        (false, false) => {
            let lower = predicate::parse_instant(lower)
                .map_err(|err| diag::malformed_term("lower bound", &err, token))?;
            let upper = predicate::parse_instant(upper)
                .map_err(|err| diag::malformed_term("upper bound", &err, token))?;
            if lower >= upper {
                return Err(diag::invalid_temporal_range(&lower, &upper, token));
            }
            Ok(PredicateTerm::Range { id, lower, upper })
        }
        _ => Err(diag::mixed_temporal_bound(token)),
    }
}
