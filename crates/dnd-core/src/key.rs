#![forbid(unsafe_code)]

//! Opaque identity keys for draggable items and drop targets.
//!
//! A [`DragKey`] is either an integer or a string. Equality is by value and
//! by variant: `DragKey::Int(0)` and `DragKey::Str("0")` are different keys.
//! Hosts that mix both spellings for the same slot must normalize first.

use std::fmt;

/// Opaque key identifying an item assignment or a target slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DragKey {
    /// Integer key.
    Int(i64),
    /// String key.
    Str(String),
}

/// Identity of a draggable item's current target assignment.
///
/// This tracks *where the item sits*, not the item itself.
pub type ItemId = DragKey;

/// Identity of a drop-target slot.
pub type TargetId = DragKey;

impl DragKey {
    /// The integer value, if this is an integer key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(_) => None,
        }
    }

    /// The string value, if this is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(value) => Some(value),
        }
    }
}

impl fmt::Display for DragKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for DragKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for DragKey {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for DragKey {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for DragKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for DragKey {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&DragKey> for DragKey {
    fn from(value: &DragKey) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::DragKey;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(DragKey::from("00"), DragKey::from(String::from("00")));
        assert_eq!(DragKey::from(5), DragKey::from(5_i64));
        assert_ne!(DragKey::from(5), DragKey::from(6));
    }

    #[test]
    fn integer_and_string_spellings_differ() {
        assert_ne!(DragKey::from(0), DragKey::from("0"));
        let set: HashSet<DragKey> = [DragKey::from(0), DragKey::from("0")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        assert_eq!(DragKey::from(7).as_int(), Some(7));
        assert_eq!(DragKey::from(7).as_str(), None);
        assert_eq!(DragKey::from("a").as_str(), Some("a"));
        assert_eq!(DragKey::from("a").as_int(), None);
    }

    #[test]
    fn display_quotes_strings() {
        assert_eq!(DragKey::from(12).to_string(), "12");
        assert_eq!(DragKey::from("01").to_string(), "\"01\"");
    }

    #[test]
    fn integers_sort_before_strings() {
        let mut keys = vec![DragKey::from("b"), DragKey::from(3), DragKey::from("a")];
        keys.sort();
        assert_eq!(
            keys,
            vec![DragKey::from(3), DragKey::from("a"), DragKey::from("b")]
        );
    }
}
