//! Safe access into JSON-like object graphs with path expressions.
//!
//! A path such as `a.b["abc"][1]` names a base object (`a`, ignored) followed by
//! member (`.name`) and element (`[key]`) accessors. If any step can not be
//! resolved, because a member or key is missing or an index is out of range,
//! the caller's default is returned instead of an error.
//!
//! # Usage
//!
//! ```rust
//! use serde_json::{json, Value};
//! use safe_access_path::{safe_access, safe_access_with_vars};
//!
//! let obj = json!({"b": {"abc": ["x", "y", "z"]}});
//!
//! let v = safe_access(&obj, r#"a.b["abc"][1]"#, json!(7)).unwrap();
//! assert_eq!(v.into_json(), json!("y"));
//!
//! let v = safe_access(&obj, r#"a.b["abc"][404]"#, json!(7)).unwrap();
//! assert_eq!(v.into_json(), json!(7));
//!
//! let vars = json!({"myvar": "abc"});
//! let v = safe_access_with_vars(&obj, "a.b[myvar][-1]", Value::Null, &vars).unwrap();
//! assert_eq!(v.into_json(), json!("z"));
//!
//! // a wildcard always produces a list
//! let v = safe_access(&obj, "a.b[*][0]", Value::Null).unwrap();
//! assert_eq!(v.into_json(), json!(["x"]));
//! ```
//!
//! # Keys
//!
//! The key of an element accessor is one of:
//!
//! 1. a quoted string, like `['a.b']` or `["['.']"]`. Escaping the quote itself is not supported;
//! 2. a variable, like `[myvar]`, when the key starts with a letter. Its value is looked up
//!    in the `vars` object. This also applies to words such as `True` or `None`;
//! 3. a literal: an integer such as `1`, `-1`, `0x1f` or `1_000`, a float, or a tuple or
//!    list of literals including `None`, `True` and `False`;
//! 4. the wildcard `*`, which selects every element of a sequence, or failing that, every
//!    value of a mapping. `.*` selects every member not starting with `__`.
//!
//! Integers index arrays and strings. Negative indices count from the end, and
//! boolean keys act as `1` and `0`. A character taken from a string is a
//! new one-character string, so results are [`json::Cow`] values that are
//! either borrowed from the object graph or owned.

pub mod json;
mod eval;
mod node;
mod parser;

pub use eval::{Error as EvalError, Resolved};
pub use node::{AccessPath, Literal, Segment};
pub use parser::{Error as ParseError, Segments};

use json::JsonRef;

/// Resolves `path` against `base`, falling back to `default`.
pub fn safe_access<'a, T: JsonRef<'a>>(
    base: T,
    path: &str,
    default: T::Owned,
) -> Result<Resolved<'a, T::Owned>, EvalError> {
    AccessPath::new(path).resolve(base, default)
}

/// Resolves `path` against `base` with variables, falling back to `default`.
pub fn safe_access_with_vars<'a, T: JsonRef<'a>>(
    base: T,
    path: &str,
    default: T::Owned,
    vars: T,
) -> Result<Resolved<'a, T::Owned>, EvalError> {
    AccessPath::new(path).resolve_with_vars(base, default, vars)
}
