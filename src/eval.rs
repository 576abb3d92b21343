// Copyright 2023 RisingWave Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tracing::{debug, trace};

use crate::{
    json::{ArrayRef, Cow, Json, JsonRef, ObjectRef},
    node::*,
    parser::Error as ParseError,
};

pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned when resolving a path.
///
/// Lookups that fail while walking the object graph are never errors: they
/// yield the default value instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MalformedPath(#[from] ParseError),
    #[error("could not find path variable \"{0}\"")]
    NoVariable(Box<str>),
    #[error("\"vars\" argument is not an object")]
    VarsNotObject,
}

impl Error {
    /// Returns `true` if the path text itself is invalid.
    pub fn is_malformed_path(&self) -> bool {
        matches!(self, Error::MalformedPath(_))
    }
}

/// The result of resolving a path.
#[derive(Debug)]
pub enum Resolved<'a, T: Json + 'a> {
    /// The value at the end of a path without wildcards.
    Value(Cow<'a, T>),
    /// Every value reached by a path that used a wildcard, in expansion order.
    List(Vec<Cow<'a, T>>),
    /// The caller's default, because no value could be reached.
    Default {
        /// The default value given by the caller.
        value: T,
        /// Whether a wildcard was applied before every branch died.
        used_wildcard: bool,
    },
}

impl<'a, T: Json + 'a> Resolved<'a, T> {
    /// Returns `true` if the path could not be resolved.
    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Default { .. })
    }

    /// Returns `true` if a wildcard segment was applied, even if no value was reached.
    pub fn used_wildcard(&self) -> bool {
        match self {
            Resolved::Value(_) => false,
            Resolved::List(_) => true,
            Resolved::Default { used_wildcard, .. } => *used_wildcard,
        }
    }

    /// Returns the single resolved value, if the path resolved without wildcards.
    pub fn value(&self) -> Option<&Cow<'a, T>> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Extracts owned values.
    ///
    /// A single value or the default becomes a one-element vector.
    pub fn into_owned_vec(self) -> Vec<T> {
        match self {
            Resolved::Value(v) => vec![v.into_owned()],
            Resolved::List(list) => list.into_iter().map(Cow::into_owned).collect(),
            Resolved::Default { value, .. } => vec![value],
        }
    }
}

impl Resolved<'_, serde_json::Value> {
    /// Converts the result to a JSON value. A list becomes a JSON array.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Resolved::Value(v) => v.into_owned(),
            Resolved::List(list) => {
                serde_json::Value::Array(list.into_iter().map(Cow::into_owned).collect())
            }
            Resolved::Default { value, .. } => value,
        }
    }
}

impl AccessPath<'_> {
    /// Resolves the path against `base`, falling back to `default`.
    pub fn resolve<'a, T: JsonRef<'a>>(
        &self,
        base: T,
        default: T::Owned,
    ) -> Result<Resolved<'a, T::Owned>> {
        Walker::<T> { vars: None }.walk(self, base, default)
    }

    /// Resolves the path against `base` with variables, falling back to `default`.
    ///
    /// `vars` must be an object mapping variable names to keys.
    pub fn resolve_with_vars<'a, T: JsonRef<'a>>(
        &self,
        base: T,
        default: T::Owned,
        vars: T,
    ) -> Result<Resolved<'a, T::Owned>> {
        let vars = vars.as_object().ok_or(Error::VarsNotObject)?;
        Walker::<T> { vars: Some(vars) }.walk(self, base, default)
    }

    /// Resolves the path against `base`, falling back to null.
    pub fn resolve_or_null<'a, T: JsonRef<'a>>(&self, base: T) -> Result<Resolved<'a, T::Owned>> {
        self.resolve(base, <T::Owned as Json>::null())
    }
}

/// Resolution context.
struct Walker<'a, T: JsonRef<'a>> {
    /// An object containing the variables referenced by `[name]`.
    vars: Option<T::Object>,
}

impl<'a, T: JsonRef<'a>> Walker<'a, T> {
    /// Applies every segment to the candidate set, until the path is exhausted
    /// or no candidate is left.
    fn walk(
        &self,
        path: &AccessPath<'_>,
        base: T,
        default: T::Owned,
    ) -> Result<Resolved<'a, T::Owned>> {
        let mut set = vec![Cow::Borrowed(base)];
        let mut used_wildcard = false;
        let mut segments = path.segments();
        while !set.is_empty() {
            let Some(segment) = segments.next() else {
                break;
            };
            let segment = segment?;
            used_wildcard |= segment.is_wildcard();
            set = self.eval_segment(&segment, set)?;
            trace!(%segment, candidates = set.len(), "applied segment");
        }

        // an empty set wins over the wildcard flag
        let resolved = match (set.is_empty(), used_wildcard) {
            (true, _) => Resolved::Default {
                value: default,
                used_wildcard,
            },
            (false, true) => Resolved::List(set),
            (false, false) => Resolved::Value(set.swap_remove(0)),
        };
        debug!(
            %path,
            default = resolved.is_default(),
            wildcard = used_wildcard,
            "resolved path"
        );
        Ok(resolved)
    }

    /// Returns the value of the given variable.
    fn get_variable(&self, name: &str) -> Result<T> {
        self.vars
            // no `vars` input
            .ok_or_else(|| Error::NoVariable(name.into()))?
            .get(name)
            .ok_or_else(|| Error::NoVariable(name.into()))
    }

    /// Evaluates one segment on every candidate and concatenates the results.
    fn eval_segment(
        &self,
        segment: &Segment<'_>,
        set: Vec<Cow<'a, T::Owned>>,
    ) -> Result<Vec<Cow<'a, T::Owned>>> {
        let bound;
        let step = match segment {
            Segment::Member(name) => Step::Member(name),
            Segment::MemberWildcard => Step::Members,
            Segment::Element(key) => Step::Element(key),
            Segment::Variable(name) => {
                let value = self.get_variable(name)?;
                let Some(key) = Literal::from_json(value) else {
                    trace!(%segment, ?value, "variable is not usable as a key");
                    return Ok(vec![]);
                };
                bound = key;
                Step::Element(&bound)
            }
            Segment::ElementWildcard => Step::Elements,
        };

        let mut new_set = Vec::with_capacity(set.len());
        for current in &set {
            let len = new_set.len();
            match current {
                Cow::Borrowed(v) => new_set.extend(step.apply(*v)),
                // results borrow from `v`, which only lives as long as `set`
                Cow::Owned(v) => new_set.extend(apply_owned(step, v).into_iter().map(Cow::Owned)),
            }
            if new_set.len() == len {
                trace!(%segment, value = ?current, "branch died");
            }
        }
        Ok(new_set)
    }
}

/// A segment with its variable resolved.
#[derive(Debug, Clone, Copy)]
enum Step<'s> {
    Member(&'s str),
    Members,
    Element(&'s Literal),
    Elements,
}

impl Step<'_> {
    fn apply<'a, T: JsonRef<'a>>(self, current: T) -> Vec<Cow<'a, T::Owned>> {
        match self {
            Step::Member(name) => get_member(current, name)
                .map(Cow::Borrowed)
                .into_iter()
                .collect(),
            Step::Members => list_members(current)
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            Step::Element(key) => get_element(current, key).into_iter().collect(),
            Step::Elements => list_elements(current),
        }
    }
}

/// Applies a step to an owned value, in its own generic context so the
/// borrow of `v` is not tied to the walker's lifetime.
fn apply_owned<O: Json>(step: Step<'_>, v: &O) -> Vec<O> {
    step.apply(v.as_ref())
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Returns the member `name` of a mapping.
fn get_member<'a, T: JsonRef<'a>>(current: T, name: &str) -> Option<T> {
    current.as_object()?.get(name)
}

/// Returns the values of every member not starting with `__`.
fn list_members<'a, T: JsonRef<'a>>(current: T) -> Vec<T> {
    let Some(object) = current.as_object() else {
        return vec![];
    };
    object
        .list()
        .into_iter()
        .filter(|(name, _)| !name.starts_with("__"))
        .map(|(_, v)| v)
        .collect()
}

/// Looks up a single key: a string in a mapping, or an integer in a sequence.
///
/// Sequences are arrays and strings, whose elements are their characters.
/// Booleans index like the integers 0 and 1. Negative indices count from the end.
fn get_element<'a, T: JsonRef<'a>>(current: T, key: &Literal) -> Option<Cow<'a, T::Owned>> {
    let index = match key {
        Literal::String(key) => return current.as_object()?.get(key).map(Cow::Borrowed),
        Literal::Integer(index) => *index,
        Literal::Boolean(b) => i64::from(*b),
        _ => return None,
    };
    if let Some(array) = current.as_array() {
        let index = offset(index, array.len())?;
        return array.get(index).map(Cow::Borrowed);
    }
    let s = current.as_str()?;
    let index = offset(index, s.chars().count())?;
    let c = s.chars().nth(index)?;
    Some(Cow::Owned(char_value(c)))
}

/// Converts a possibly negative index into an offset within `len`.
fn offset(index: i64, len: usize) -> Option<usize> {
    let index = if index < 0 {
        index.checked_add(i64::try_from(len).ok()?)?
    } else {
        index
    };
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Returns every element of a sequence, or failing that, every value of a mapping.
fn list_elements<'a, T: JsonRef<'a>>(current: T) -> Vec<Cow<'a, T::Owned>> {
    if let Some(array) = current.as_array() {
        if array.len() > 0 {
            return array.list().into_iter().map(Cow::Borrowed).collect();
        }
    }
    if let Some(s) = current.as_str() {
        return s.chars().map(|c| Cow::Owned(char_value(c))).collect();
    }
    current
        .as_object()
        .map(|o| o.list_value().into_iter().map(Cow::Borrowed).collect())
        .unwrap_or_default()
}

/// A one-character string.
fn char_value<J: Json>(c: char) -> J {
    J::from_string(c.encode_utf8(&mut [0; 4]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[track_caller]
    fn element(current: &Value, key: Literal) -> Option<Value> {
        get_element(current, &key).map(Cow::into_owned)
    }

    #[track_caller]
    fn elements(current: &Value) -> Vec<Value> {
        list_elements(current)
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    #[test]
    fn element_lookup() {
        let array = json!(["x", "y", "z"]);
        let get = |index| element(&array, Literal::Integer(index));
        assert_eq!(get(0), Some(json!("x")));
        assert_eq!(get(2), Some(json!("z")));
        assert_eq!(get(-1), Some(json!("z")));
        assert_eq!(get(-3), Some(json!("x")));
        assert_eq!(get(3), None);
        assert_eq!(get(-4), None);
        assert_eq!(get(i64::MIN), None);

        let object = json!({"k": "v", "1": "one"});
        assert_eq!(element(&object, Literal::String("k".into())), Some(json!("v")));
        assert_eq!(element(&object, Literal::Integer(1)), None);
        assert_eq!(element(&array, Literal::String("0".into())), None);
        assert_eq!(element(&array, Literal::Float(0.0)), None);
        assert_eq!(element(&array, Literal::Null), None);
        assert_eq!(element(&object, Literal::Tuple(vec![Literal::Null])), None);
        assert_eq!(element(&json!(1), Literal::Integer(0)), None);
    }

    #[test]
    fn boolean_index() {
        let array = json!(["x", "y", "z"]);
        assert_eq!(element(&array, Literal::Boolean(false)), Some(json!("x")));
        assert_eq!(element(&array, Literal::Boolean(true)), Some(json!("y")));
        assert_eq!(element(&json!("ab"), Literal::Boolean(true)), Some(json!("b")));
        assert_eq!(element(&json!({"true": 1}), Literal::Boolean(true)), None);
        assert_eq!(element(&json!([]), Literal::Boolean(false)), None);
    }

    #[test]
    fn string_index() {
        let s = json!("héllo");
        assert_eq!(element(&s, Literal::Integer(0)), Some(json!("h")));
        assert_eq!(element(&s, Literal::Integer(1)), Some(json!("é")));
        assert_eq!(element(&s, Literal::Integer(-1)), Some(json!("o")));
        assert_eq!(element(&s, Literal::Integer(5)), None);
        assert_eq!(element(&s, Literal::Integer(-6)), None);
        assert_eq!(element(&json!(""), Literal::Integer(0)), None);
        assert_eq!(element(&s, Literal::String("h".into())), None);
        assert!(matches!(
            get_element(&s, &Literal::Integer(0)),
            Some(Cow::Owned(_))
        ));
    }

    #[test]
    fn member_lookup() {
        let object = json!({"a": 1, "__hidden": 2, "b": {"c": 3}});
        assert_eq!(get_member(&object, "a"), Some(&json!(1)));
        assert_eq!(get_member(&object, "__hidden"), Some(&json!(2)));
        assert_eq!(get_member(&object, "missing"), None);
        assert_eq!(get_member(&json!([1]), "a"), None);
        assert_eq!(get_member(&json!("abc"), "a"), None);
        assert_eq!(
            list_members(&object),
            vec![&json!(1), &json!({"c": 3})]
        );
        assert!(list_members(&json!(1)).is_empty());
    }

    #[test]
    fn element_wildcard() {
        assert_eq!(elements(&json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(
            elements(&json!({"a": 1, "b": [2]})),
            vec![json!(1), json!([2])]
        );
        assert_eq!(
            elements(&json!("abc")),
            vec![json!("a"), json!("b"), json!("c")]
        );
        assert!(elements(&json!([])).is_empty());
        assert!(elements(&json!({})).is_empty());
        assert!(elements(&json!("")).is_empty());
        assert!(elements(&json!(1)).is_empty());
        assert!(elements(&Value::Null).is_empty());
    }

    #[test]
    fn index_offsets() {
        assert_eq!(offset(0, 3), Some(0));
        assert_eq!(offset(-1, 3), Some(2));
        assert_eq!(offset(3, 3), None);
        assert_eq!(offset(-1, 0), None);
        assert_eq!(offset(i64::MAX, 3), None);
    }

    #[test]
    fn variable_keys() {
        assert_eq!(Literal::from_json(&json!("k")), Some(Literal::String("k".into())));
        assert_eq!(Literal::from_json(&json!(-2)), Some(Literal::Integer(-2)));
        assert_eq!(Literal::from_json(&json!(1.5)), Some(Literal::Float(1.5)));
        assert_eq!(Literal::from_json(&json!(true)), Some(Literal::Boolean(true)));
        assert_eq!(Literal::from_json(&json!(null)), Some(Literal::Null));
        assert_eq!(
            Literal::from_json(&json!([1, "a"])),
            Some(Literal::List(vec![
                Literal::Integer(1),
                Literal::String("a".into())
            ]))
        );
        assert_eq!(Literal::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn vars_must_be_object() {
        let base = json!({});
        let err = AccessPath::new("a[x]")
            .resolve_with_vars(&base, Value::Null, &json!([1]))
            .unwrap_err();
        assert_eq!(err, Error::VarsNotObject);
        assert!(!err.is_malformed_path());
    }
}
