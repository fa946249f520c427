//! Field descriptors: the pluggable capability the filter compiler binds to.
//!
//! Each entity kind exposes its filterable surface through a [`FieldProfile`]:
//! a mapping from case-insensitive field name to a declared [`FieldType`] and a
//! value-extraction function. The compiler consults `field_type` while type
//! checking a query; the compiled predicate calls `field_value` during
//! evaluation. Profiles are read-only strategy objects, one shared instance per
//! entity kind ([`RefFields`], [`CommitFields`]).
//!
//! Adding a new filterable entity kind means implementing `FieldProfile` once;
//! nothing in the compiler or the row adapter changes.

use crate::domain::{Commit, RefEntry, RefKind};
use chrono::{DateTime, Utc};

/// Declared type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 text. Supports `=`, `!=`, and the fuzzy-match operator `~`.
    Str,
    /// Signed integer. Supports equality and ordering operators.
    Int,
    /// Boolean. Supports `=` and `!=` only.
    Bool,
    /// Point in time. Supports equality and ordering operators; query
    /// literals are quoted `YYYY-MM-DD` or RFC 3339 strings.
    Date,
}

impl FieldType {
    /// Display name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Date => "date",
        }
    }

    /// Whether values of this type have a natural order.
    ///
    /// Ordering comparison operators (`<`, `<=`, `>`, `>=`) are only valid
    /// on ordered types.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Int | Self::Date)
    }
}

/// Comparison operator of a query atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `~` — case-insensitive fuzzy match, strings only.
    Fuzzy,
}

impl CmpOp {
    /// The operator's query-language spelling.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Fuzzy => "~",
        }
    }

    /// Whether this operator is valid on fields of the given type.
    #[must_use]
    pub const fn valid_for(self, ty: FieldType) -> bool {
        match self {
            Self::Eq | Self::Ne => true,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => ty.is_ordered(),
            Self::Fuzzy => matches!(ty, FieldType::Str),
        }
    }
}

/// A field value extracted from an entity or parsed from a query literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl Value {
    /// The [`FieldType`] this value belongs to.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Str(_) => FieldType::Str,
            Self::Int(_) => FieldType::Int,
            Self::Bool(_) => FieldType::Bool,
            Self::Date(_) => FieldType::Date,
        }
    }
}

/// Per-entity-kind field resolution capability.
///
/// A profile declares which fields an entity kind exposes, their types, and
/// how to extract their values. Lookups are ASCII case-insensitive:
/// `field_type("Name")` and `field_type("name")` agree. Profiles carry no
/// state and are shared freely.
///
/// `field_value` returns `None` only for unregistered names. The compiler
/// validates every field reference against `field_type` before a predicate
/// is built, so evaluation never observes `None` in practice.
pub trait FieldProfile {
    /// The entity kind this profile describes.
    type Entity;

    /// Looks up the declared type of `name`, case-insensitively.
    fn field_type(&self, name: &str) -> Option<FieldType>;

    /// Extracts the value of the registered field `name` from `entity`.
    fn field_value(&self, entity: &Self::Entity, name: &str) -> Option<Value>;
}

/// One entry of a static field table.
struct FieldSpec<E> {
    name: &'static str,
    ty: FieldType,
    extract: fn(&E) -> Value,
}

fn lookup<'t, E>(table: &'t [FieldSpec<E>], name: &str) -> Option<&'t FieldSpec<E>> {
    table.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}

impl RefKind {
    /// The value of a ref's `kind` field in the query language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Branch => "branch",
            Self::RemoteBranch => "remote",
            Self::Tag => "tag",
        }
    }
}

const REF_FIELDS: &[FieldSpec<RefEntry>] = &[
    FieldSpec {
        name: "name",
        ty: FieldType::Str,
        extract: |r| Value::Str(r.name.clone()),
    },
    FieldSpec {
        name: "kind",
        ty: FieldType::Str,
        extract: |r| Value::Str(r.kind.as_str().to_string()),
    },
    FieldSpec {
        name: "remote",
        ty: FieldType::Str,
        extract: |r| Value::Str(r.remote.clone().unwrap_or_default()),
    },
    FieldSpec {
        name: "head",
        ty: FieldType::Bool,
        extract: |r| Value::Bool(r.head),
    },
];

const COMMIT_FIELDS: &[FieldSpec<Commit>] = &[
    FieldSpec {
        name: "id",
        ty: FieldType::Str,
        extract: |c| Value::Str(c.id.clone()),
    },
    FieldSpec {
        name: "title",
        ty: FieldType::Str,
        extract: |c| Value::Str(c.title.clone()),
    },
    FieldSpec {
        name: "author",
        ty: FieldType::Str,
        extract: |c| Value::Str(c.author.clone()),
    },
    FieldSpec {
        name: "date",
        ty: FieldType::Date,
        extract: |c| Value::Date(c.date),
    },
];

/// Field profile for [`RefEntry`] entities.
///
/// Fields: `name` (string), `kind` (string: `head`/`branch`/`remote`/`tag`),
/// `remote` (string, empty for local refs), `head` (bool).
#[derive(Debug, Clone, Copy, Default)]
pub struct RefFields;

impl FieldProfile for RefFields {
    type Entity = RefEntry;

    fn field_type(&self, name: &str) -> Option<FieldType> {
        lookup(REF_FIELDS, name).map(|spec| spec.ty)
    }

    fn field_value(&self, entity: &RefEntry, name: &str) -> Option<Value> {
        lookup(REF_FIELDS, name).map(|spec| (spec.extract)(entity))
    }
}

/// Field profile for [`Commit`] entities.
///
/// Fields: `id` (string), `title` (string), `author` (string), `date` (date).
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitFields;

impl FieldProfile for CommitFields {
    type Entity = Commit;

    fn field_type(&self, name: &str) -> Option<FieldType> {
        lookup(COMMIT_FIELDS, name).map(|spec| spec.ty)
    }

    fn field_value(&self, entity: &Commit, name: &str) -> Option<Value> {
        lookup(COMMIT_FIELDS, name).map(|spec| (spec.extract)(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn remote_branch() -> RefEntry {
        RefEntry {
            name: "origin/main".to_string(),
            kind: RefKind::RemoteBranch,
            remote: Some("origin".to_string()),
            head: false,
        }
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        assert_eq!(RefFields.field_type("Name"), RefFields.field_type("name"));
        assert_eq!(RefFields.field_type("HEAD"), Some(FieldType::Bool));
        assert_eq!(
            CommitFields.field_type("Author"),
            CommitFields.field_type("author")
        );
        assert_eq!(CommitFields.field_type("DATE"), Some(FieldType::Date));
    }

    #[test]
    fn unregistered_field_is_absent() {
        assert_eq!(RefFields.field_type("upstream"), None);
        assert!(RefFields.field_value(&remote_branch(), "upstream").is_none());
    }

    #[test]
    fn ref_values_extract_declared_types() {
        let entry = remote_branch();
        assert_eq!(
            RefFields.field_value(&entry, "name"),
            Some(Value::Str("origin/main".to_string()))
        );
        assert_eq!(
            RefFields.field_value(&entry, "kind"),
            Some(Value::Str("remote".to_string()))
        );
        assert_eq!(
            RefFields.field_value(&entry, "remote"),
            Some(Value::Str("origin".to_string()))
        );
        assert_eq!(RefFields.field_value(&entry, "head"), Some(Value::Bool(false)));
    }

    #[test]
    fn commit_date_extracts_as_date() {
        let commit = Commit {
            id: "deadbeef".to_string(),
            title: "Fix refs view".to_string(),
            author: "Alice".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        let value = CommitFields.field_value(&commit, "date").unwrap();
        assert_eq!(value.field_type(), FieldType::Date);
    }

    #[test]
    fn ordering_ops_rejected_on_unordered_types() {
        assert!(CmpOp::Lt.valid_for(FieldType::Int));
        assert!(CmpOp::Ge.valid_for(FieldType::Date));
        assert!(!CmpOp::Lt.valid_for(FieldType::Str));
        assert!(!CmpOp::Gt.valid_for(FieldType::Bool));
        assert!(CmpOp::Fuzzy.valid_for(FieldType::Str));
        assert!(!CmpOp::Fuzzy.valid_for(FieldType::Int));
        assert!(CmpOp::Ne.valid_for(FieldType::Bool));
    }
}
