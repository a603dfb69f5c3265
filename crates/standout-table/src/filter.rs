//! Row filters.
//!
//! A [`Filter`] is a predicate over a row's [`Record`]. The structured form is a
//! [`Clause`] (column, operator, criterion); anything else can be supplied as a
//! closure. A table ANDs its filters by narrowing the row set in order.

use std::fmt;
use std::str::FromStr;

use crate::error::TableError;
use crate::value::{Record, Value};

/// Comparison operator for a filter clause. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `~`, case-insensitive substring match.
    Contains,
    /// `!~`
    NotContains,
}

impl Op {
    /// The operator's symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Lte => "<=",
            Op::Gte => ">=",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Contains => "~",
            Op::NotContains => "!~",
        }
    }

    /// Evaluates `field <op> criterion`.
    ///
    /// Ordering operators compare numerically when both sides read as
    /// numbers and lexicographically otherwise.
    pub fn eval(self, field: &Value, criterion: &Value) -> bool {
        match self {
            Op::Contains => contains_ci(&field.text(), &criterion.text()),
            Op::NotContains => !contains_ci(&field.text(), &criterion.text()),
            _ => {
                let ordering = field.loose_cmp(criterion);
                match self {
                    Op::Lt => ordering.is_lt(),
                    Op::Gt => ordering.is_gt(),
                    Op::Lte => ordering.is_le(),
                    Op::Gte => ordering.is_ge(),
                    Op::Eq => ordering.is_eq(),
                    _ => ordering.is_ne(),
                }
            }
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl FromStr for Op {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Op::Lt),
            ">" => Ok(Op::Gt),
            "<=" => Ok(Op::Lte),
            ">=" => Ok(Op::Gte),
            "=" => Ok(Op::Eq),
            "!=" => Ok(Op::Ne),
            "~" => Ok(Op::Contains),
            "!~" => Ok(Op::NotContains),
            other => Err(TableError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (column, operator, criterion) predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Column id to read.
    pub column: String,
    /// Comparison operator.
    pub op: Op,
    /// Value to compare against.
    pub criterion: Value,
}

impl Clause {
    pub fn new(column: impl Into<String>, op: Op, criterion: impl Into<Value>) -> Self {
        Clause {
            column: column.into(),
            op,
            criterion: criterion.into(),
        }
    }

    /// Evaluates the clause against a record's raw value for the column.
    ///
    /// A missing cell reads as `Null`, which compares as empty text.
    pub fn matches(&self, record: &Record) -> bool {
        self.op.eval(record.value(&self.column), &self.criterion)
    }
}

type Predicate = Box<dyn Fn(&Record) -> bool>;

/// A row predicate held by a table.
pub enum Filter {
    /// Structured column comparison.
    Clause(Clause),
    /// Any boolean function of a record.
    Custom(Predicate),
}

impl Filter {
    /// Builds a clause filter from an operator symbol.
    ///
    /// ```rust
    /// use standout_table::Filter;
    ///
    /// assert!(Filter::new("id", ">", 1).is_ok());
    /// assert!(Filter::new("id", "=>", 1).is_err());
    /// ```
    pub fn new(
        column: impl Into<String>,
        op: &str,
        criterion: impl Into<Value>,
    ) -> Result<Self, TableError> {
        Ok(Filter::Clause(Clause::new(column, op.parse()?, criterion)))
    }

    /// Wraps an arbitrary predicate.
    pub fn custom(predicate: impl Fn(&Record) -> bool + 'static) -> Self {
        Filter::Custom(Box::new(predicate))
    }

    /// Returns `true` if the record passes.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Clause(clause) => clause.matches(record),
            Filter::Custom(predicate) => predicate(record),
        }
    }
}

impl From<Clause> for Filter {
    fn from(clause: Clause) -> Self {
        Filter::Clause(clause)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Clause(clause) => f.debug_tuple("Clause").field(clause).finish(),
            Filter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
