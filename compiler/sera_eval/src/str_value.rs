//! Mutable runtime string value.
//!
//! A string is an owned, growable buffer of Unicode scalar values.
//! Length, indexing, and mutation are all counted in scalar values —
//! never bytes, never UTF-16 units — so replacing one "character" of
//! `"❤ hello"` really replaces one scalar regardless of how many bytes it
//! would encode to. Every value is exclusively owned by the binding that
//! holds it: mutation is an explicit in-place operation on the owner's
//! buffer, and concatenation always constructs a fresh buffer. Two
//! bindings never alias the same buffer.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{index_out_of_range, EvalError};

/// Runtime string: an ordered, mutable, index-addressable sequence of
/// Unicode scalar values.
///
/// The derived `Ord` is per-scalar lexicographic with shorter-is-less for
/// prefixes, which is exactly the comparison the language's `<`/`>`
/// operators require.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct StrValue {
    scalars: Vec<char>,
}

impl StrValue {
    /// Create an empty string.
    pub fn new() -> Self {
        Self {
            scalars: Vec::new(),
        }
    }

    /// Number of scalar values.
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Returns `true` if the string holds no scalars.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// The scalar at `index`.
    pub fn get(&self, index: usize) -> Result<char, EvalError> {
        self.scalars
            .get(index)
            .copied()
            .ok_or_else(|| index_out_of_range(self.len(), as_signed(index)))
    }

    /// Replace exactly one scalar at a valid index. Never changes length.
    pub fn set(&mut self, index: usize, scalar: char) -> Result<(), EvalError> {
        let len = self.len();
        match self.scalars.get_mut(index) {
            Some(slot) => {
                *slot = scalar;
                Ok(())
            }
            None => Err(index_out_of_range(len, as_signed(index))),
        }
    }

    /// Concatenate two strings into a freshly allocated one.
    ///
    /// Neither operand is mutated.
    #[must_use]
    pub fn concat(&self, other: &StrValue) -> StrValue {
        let mut scalars = Vec::with_capacity(self.len() + other.len());
        scalars.extend_from_slice(&self.scalars);
        scalars.extend_from_slice(&other.scalars);
        StrValue { scalars }
    }

    /// Per-scalar lexicographic comparison; a proper prefix is less.
    pub fn compare(&self, other: &StrValue) -> Ordering {
        self.cmp(other)
    }

    /// Append decoded text to this string in place.
    ///
    /// Used when building a new string (composition); never applied to an
    /// operand of `+`.
    pub fn push_str(&mut self, text: &str) {
        self.scalars.extend(text.chars());
    }

    /// Append another string's scalars to this one in place.
    pub fn append(&mut self, other: &StrValue) {
        self.scalars.extend_from_slice(&other.scalars);
    }

    /// The underlying scalars.
    pub fn as_scalars(&self) -> &[char] {
        &self.scalars
    }
}

/// Saturating conversion for error reporting.
fn as_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl fmt::Display for StrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.scalars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl From<&str> for StrValue {
    fn from(text: &str) -> Self {
        Self {
            scalars: text.chars().collect(),
        }
    }
}

impl From<String> for StrValue {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<char> for StrValue {
    fn from(scalar: char) -> Self {
        Self {
            scalars: vec![scalar],
        }
    }
}
