//! Tri-state list attribute

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A list attribute that distinguishes "not configured" from "configured empty".
///
/// The UCDN update API treats an omitted list as "leave unchanged" and needs a
/// separate `*Empty` flag to clear one, so the two cases must not collapse.
///
/// Serialized as `null` / `[]` / `[..]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListField<T> {
    /// Not configured: leave the remote list untouched.
    #[default]
    Unset,
    /// Explicitly empty: clear the remote list.
    Empty,
    /// Replace the remote list with these values.
    Values(Vec<T>),
}

impl<T> ListField<T> {
    /// Remote lists are never "unset": absent or `null` decodes as [`Self::Empty`].
    pub fn from_remote(values: Vec<T>) -> Self {
        if values.is_empty() {
            Self::Empty
        } else {
            Self::Values(values)
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the remote list must be cleared. `Values(vec![])` counts as empty.
    pub fn is_empty_flag(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Values(values) => values.is_empty(),
            Self::Unset => false,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Values(values) => values,
            Self::Unset | Self::Empty => &[],
        }
    }

    /// `Unset` becomes `Empty`; configured values are kept.
    #[must_use]
    pub fn or_empty(self) -> Self {
        match self {
            Self::Unset => Self::Empty,
            Self::Values(values) => Self::from_remote(values),
            Self::Empty => Self::Empty,
        }
    }
}

impl<T: Clone> ListField<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T> From<Vec<T>> for ListField<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_remote(values)
    }
}

impl<T: Serialize> Serialize for ListField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Empty => Vec::<T>::new().serialize(serializer),
            Self::Values(values) => values.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Vec<T>>::deserialize(deserializer)? {
            None => Self::Unset,
            Some(values) if values.is_empty() => Self::Empty,
            Some(values) => Self::Values(values),
        })
    }
}
