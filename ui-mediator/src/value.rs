//! Property values and change records

use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::host::OwnerRef;

/// One `(label, value)` entry of a selection control.
pub type OptionPair = (String, String);

/// Dynamic value stored in a control property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// No value (only accepted by nullable properties)
    #[default]
    None,
    /// Boolean flag
    Bool(bool),
    /// Integer, used for indices and row counts
    Int(i64),
    /// Text
    Str(String),
    /// Filesystem path
    Path(PathBuf),
    /// Ordered `(label, value)` options of a selection control
    Options(Vec<OptionPair>),
}

/// Shape of a non-null [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Str`]
    Str,
    /// [`Value::Path`]
    Path,
    /// [`Value::Options`]
    Options,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Str => "str",
            Self::Path => "path",
            Self::Options => "options",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Build an options value from plain strings, using each string as both label and value.
    pub fn options<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Options(
            items
                .into_iter()
                .map(|s| {
                    let s = s.into();
                    (s.clone(), s)
                })
                .collect(),
        )
    }

    /// Build an options value from `(label, value)` pairs.
    pub fn labelled<I, L, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<String>,
    {
        Self::Options(
            pairs
                .into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        )
    }

    /// Shape of this value, `None` for [`Value::None`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::None => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Str(_) => Some(ValueKind::Str),
            Self::Path(_) => Some(ValueKind::Path),
            Self::Options(_) => Some(ValueKind::Options),
        }
    }

    /// Short description of the shape, used in error messages.
    pub fn kind_name(&self) -> String {
        self.kind()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_options(&self) -> Option<&[OptionPair]> {
        match self {
            Self::Options(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Options(o) => {
                f.write_str("[")?;
                for (i, (label, value)) in o.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if label == value {
                        write!(f, "{value}")?;
                    } else {
                        write!(f, "{label}: {value}")?;
                    }
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::options(value)
    }
}

impl From<Vec<OptionPair>> for Value {
    fn from(value: Vec<OptionPair>) -> Self {
        Self::Options(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::None)
    }
}

/// Whether a change carried scalar values or option sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Bool, int, text or path change
    Scalar,
    /// Options list change
    Sequence,
}

/// Payload describing one property change of one control.
#[derive(Clone, Debug)]
pub struct ChangeRecord {
    /// Name of the changed property
    pub name: String,
    /// Value before the change
    pub old: Value,
    /// Value after the change
    pub new: Value,
    /// Non-owning reference to the control that changed
    pub owner: OwnerRef,
    /// Scalar or sequence change
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub(crate) fn new(name: impl Into<String>, old: Value, new: Value, owner: OwnerRef) -> Self {
        let kind = if matches!(old, Value::Options(_)) || matches!(new, Value::Options(_)) {
            ChangeKind::Sequence
        } else {
            ChangeKind::Scalar
        };
        Self {
            name: name.into(),
            old,
            new,
            owner,
            kind,
        }
    }
}
