//! Partial-update allow-lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An explicit set of top-level field names restricting an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchFields(BTreeSet<String>);

impl PatchFields {
    /// Creates an allow-list from field names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Returns true if `name` is allowed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Adds a field name.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the allowed names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PatchFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A command or DTO that may carry a partial-update allow-list.
///
/// Callers consult [`Patchable::should_update`] per field when applying an
/// update by hand; the synchronizer takes the allow-list through its options
/// instead.
pub trait Patchable {
    /// The allow-list, or `None` for a full update.
    fn patch_fields(&self) -> Option<&PatchFields>;

    /// Returns true if the named field should be updated.
    fn should_update(&self, name: &str) -> bool {
        self.patch_fields().map_or(true, |fields| fields.contains(name))
    }
}

/// Like [`Patchable::should_update`], treating a missing marker as a full update.
#[must_use]
pub fn should_update<P: Patchable + ?Sized>(marker: Option<&P>, name: &str) -> bool {
    marker.map_or(true, |marker| marker.should_update(name))
}
