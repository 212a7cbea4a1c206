use std::fmt::Display;

use serde_derive::{Deserialize, Serialize};

use super::value::Value;

/// Stream qualifier on a field or metadata reference. `Default` is the
/// unqualified marker: it binds to whichever single stream is in scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StreamName {
    Default,
    Named(String),
}

impl StreamName {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl Display for StreamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "$$default"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
}

/// Expression AST handed over by the parser. The planner never mutates an
/// `Expr`; pushdown clones subtrees when it splits a conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Wildcard,
    FieldRef {
        stream: StreamName,
        name: String,
    },
    /// Reference to ingestion metadata (e.g. originating topic). A name of
    /// `"*"` selects all metadata of the stream.
    MetaRef {
        stream: StreamName,
        name: String,
    },
    SortField {
        name: String,
    },
    Literal(Value),
}

impl Expr {
    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn field_ref(stream: StreamName, name: &str) -> Self {
        Self::FieldRef {
            stream,
            name: name.to_owned(),
        }
    }

    pub fn meta_ref(stream: StreamName, name: &str) -> Self {
        Self::MetaRef {
            stream,
            name: name.to_owned(),
        }
    }

    pub fn sort_field(name: &str) -> Self {
        Self::SortField {
            name: name.to_owned(),
        }
    }
}
