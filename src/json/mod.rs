//! Abstraction over the object graph a path is resolved against.
//!
//! This module provides several traits to abstract over JSON-like values.
//!
//! - [`Json`]: A trait for owned values.
//! - [`JsonRef`]: A trait for borrowed values.
//! - [`ArrayRef`]: A trait for borrowed sequences.
//! - [`ObjectRef`]: A trait for borrowed mappings, whose keys double as members.
//!
//! Implementations are provided for [`serde_json::Value`], and behind the
//! `simd-json` and `jsonbb` features for the values of those crates. A host
//! with its own record types can implement the traits to make them walkable.

use ::serde_json::Number;
use std::fmt::Debug;

#[cfg(feature = "jsonbb")]
mod jsonbb;
mod serde_json;
#[cfg(feature = "simd-json")]
mod simd_json;

/// A borrowed or owned value.
///
/// Values reached through members, keys and indices are borrowed from the
/// object graph. A character taken out of a string is a new value, so it is owned.
#[derive(Debug)]
pub enum Cow<'a, T: Json + 'a> {
    /// Borrowed data.
    Borrowed(T::Borrowed<'a>),
    /// Owned data.
    Owned(T),
}

impl<'a, T: Json> Cow<'a, T> {
    /// Extracts the owned value.
    ///
    /// Clones the value if it is not already owned.
    pub fn into_owned(self) -> T {
        match self {
            Cow::Borrowed(v) => v.to_owned(),
            Cow::Owned(v) => v,
        }
    }
}

/// A trait for owned values.
pub trait Json: Clone + Debug {
    /// The type of borrowed values.
    type Borrowed<'a>: JsonRef<'a, Owned = Self>
    where
        Self: 'a;

    /// Returns a reference to the value.
    fn as_ref(&self) -> Self::Borrowed<'_>;

    /// Returns a null value.
    fn null() -> Self;

    /// Returns a string value.
    fn from_string(s: &str) -> Self;
}

/// A trait for borrowed values.
pub trait JsonRef<'a>: Copy + Debug {
    /// The type of owned values.
    type Owned: Json<Borrowed<'a> = Self> + 'a;

    /// The type of borrowed sequences.
    type Array: ArrayRef<'a, JsonRef = Self>;

    /// The type of borrowed mappings.
    type Object: ObjectRef<'a, JsonRef = Self>;

    /// Creates an owned value.
    fn to_owned(self) -> Self::Owned;

    /// If the value is a boolean, returns the associated bool. Returns `None` otherwise.
    fn as_bool(self) -> Option<bool>;

    /// If the value is a number, returns the associated number. Returns `None` otherwise.
    fn as_number(self) -> Option<Number>;

    /// If the value is a string, returns the associated string. Returns `None` otherwise.
    fn as_str(self) -> Option<&'a str>;

    /// If the value is a sequence, returns the associated array. Returns `None` otherwise.
    fn as_array(self) -> Option<Self::Array>;

    /// If the value is a mapping, returns the associated object. Returns `None` otherwise.
    fn as_object(self) -> Option<Self::Object>;

    /// Returns `true` if the value is null.
    fn is_null(self) -> bool;
}

/// A trait for borrowed sequences.
pub trait ArrayRef<'a>: Copy {
    /// The type of borrowed values.
    type JsonRef: JsonRef<'a>;

    /// Returns the length of the array.
    fn len(self) -> usize;

    /// Returns the value at the given index.
    fn get(self, index: usize) -> Option<Self::JsonRef>;

    /// Returns all values in the array.
    fn list(self) -> Vec<Self::JsonRef>;
}

/// A trait for borrowed mappings.
pub trait ObjectRef<'a>: Copy {
    /// The type of borrowed values.
    type JsonRef: JsonRef<'a>;

    /// Returns the value associated with the given key.
    fn get(self, key: &str) -> Option<Self::JsonRef>;

    /// Returns all key-value pairs in the object, in iteration order.
    fn list(self) -> Vec<(&'a str, Self::JsonRef)>;

    /// Returns all values in the object, in iteration order.
    fn list_value(self) -> Vec<Self::JsonRef>;
}
