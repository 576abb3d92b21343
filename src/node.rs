//! The nodes of an access path.

use std::fmt::{Display, Formatter};

use crate::json::{ArrayRef, JsonRef};

/// A path expression such as `a.b["abc"][1]`.
///
/// The leading name (`a`) stands for the base object and is ignored. The rest is
/// a sequence of [`Segment`]s that are parsed lazily while the path is resolved,
/// so a malformed segment is only reported if resolution reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPath<'p> {
    pub(crate) text: &'p str,
}

impl<'p> AccessPath<'p> {
    /// Creates a path from its textual form.
    pub fn new(text: &'p str) -> Self {
        Self { text }
    }
}

impl Display for AccessPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A single accessor step of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'p> {
    /// `.name` selects the member `name`.
    Member(&'p str),
    /// `.*` selects every public member.
    MemberWildcard,
    /// `[<literal>]` selects the element or entry under the literal key, like `["abc"]` or `[-1]`.
    Element(Literal),
    /// `[name]` selects the element or entry under the key bound to the variable `name`.
    Variable(&'p str),
    /// `[*]` selects every element of a sequence, or else every value of a mapping.
    ElementWildcard,
}

impl Segment<'_> {
    /// Returns `true` if the segment fans out to many values.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::MemberWildcard | Self::ElementWildcard)
    }
}

/// A literal key in an element segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `None` or `null`.
    Null,
    /// `True`, `False`, `true` or `false`.
    Boolean(bool),
    /// An integer, usable as a sequence index.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A quoted string.
    String(String),
    /// `(a, b)`.
    Tuple(Vec<Literal>),
    /// `[a, b]`.
    List(Vec<Literal>),
}

impl Literal {
    /// Converts a bound variable value to a key.
    ///
    /// Returns `None` for mappings, which can never act as a key.
    pub(crate) fn from_json<'a, T: JsonRef<'a>>(value: T) -> Option<Self> {
        if value.is_null() {
            return Some(Self::Null);
        }
        if let Some(b) = value.as_bool() {
            return Some(Self::Boolean(b));
        }
        if let Some(n) = value.as_number() {
            return Some(match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64()?),
            });
        }
        if let Some(s) = value.as_str() {
            return Some(Self::String(s.to_owned()));
        }
        if let Some(array) = value.as_array() {
            return array
                .list()
                .into_iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::List);
        }
        None
    }
}

impl Display for Segment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member(name) => write!(f, ".{name}"),
            Self::MemberWildcard => write!(f, ".*"),
            Self::Element(key) => write!(f, "[{key}]"),
            Self::Variable(name) => write!(f, "[{name}]"),
            Self::ElementWildcard => write!(f, "[*]"),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Boolean(true) => write!(f, "True"),
            Self::Boolean(false) => write!(f, "False"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(v) if v.contains('\'') => write!(f, "\"{v}\""),
            Self::String(v) => write!(f, "'{v}'"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
