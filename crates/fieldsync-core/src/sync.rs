//! Field synchronization.
//!
//! Copies same-named, exactly same-typed fields from a source value to a
//! destination value. Composite source fields are additionally flattened:
//! their sub-fields are matched against destination fields named by the
//! composite field's name as a prefix, recursively.
//!
//! Mismatches are skipped, never reported. The one error is the flattening
//! depth guard.

use crate::{FieldDescriptor, FieldEnumerable, FieldSyncError, FieldSyncResult, PatchFields};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Options controlling a synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Top-level allow-list. Fields reached only through flattening are
    /// always eligible.
    #[serde(default)]
    pub patch_fields: Option<PatchFields>,

    /// Whether composite fields are flattened into prefixed destination fields.
    #[serde(default = "default_allow_flatten")]
    pub allow_flatten: bool,

    /// Inserted between path segments of a flattened name.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Maximum flattening depth below the top-level value.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_allow_flatten() -> bool {
    true
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_max_depth() -> usize {
    SyncOptions::DEFAULT_MAX_DEPTH
}

impl SyncOptions {
    /// The default flattening depth limit.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Restricts top-level fields to `names`.
    #[must_use]
    pub fn with_patch_fields(mut self, names: impl Into<PatchFields>) -> Self {
        self.patch_fields = Some(names.into());
        self
    }

    /// Enables or disables flattening.
    #[must_use]
    pub fn with_flatten(mut self, allow_flatten: bool) -> Self {
        self.allow_flatten = allow_flatten;
        self
    }

    /// Sets the path separator used for flattened names.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the flattening depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            patch_fields: None,
            allow_flatten: default_allow_flatten(),
            separator: default_separator(),
            max_depth: default_max_depth(),
        }
    }
}

/// Runs synchronizations with a fixed set of options.
///
/// Works on trait objects; the generic entry points are [`synchronize`] and
/// [`CopyTo`].
#[derive(Debug, Clone, Copy)]
pub struct Synchronizer<'o> {
    options: &'o SyncOptions,
}

impl<'o> Synchronizer<'o> {
    #[must_use]
    pub const fn new(options: &'o SyncOptions) -> Self {
        Self { options }
    }

    /// Copies matching fields from `source` into `destination` and returns
    /// the number of fields written.
    pub fn run(
        &self,
        source: &dyn FieldEnumerable,
        destination: &mut dyn FieldEnumerable,
    ) -> FieldSyncResult<usize> {
        let dest_fields = index_fields(destination.fields(), |_| true);
        let mut copied = 0;

        for field in source.fields() {
            if let Some(patch_fields) = &self.options.patch_fields {
                if !patch_fields.contains(field.name) {
                    trace!(field = field.name, "Skipping field outside patch fields");
                    continue;
                }
            }

            if self.options.allow_flatten && field.composite {
                let prefix = format!("{}{}", field.name, self.options.separator);
                copied += self.flatten(&prefix, source.nested(field.name), destination, 1)?;
            }

            if assign(source, &field, field.name, &dest_fields, destination) {
                copied += 1;
            }
        }

        debug!(
            source = source.type_name(),
            destination = destination.type_name(),
            copied,
            "Synchronized fields"
        );

        Ok(copied)
    }

    fn flatten(
        &self,
        prefix: &str,
        source: Option<&dyn FieldEnumerable>,
        destination: &mut dyn FieldEnumerable,
        depth: usize,
    ) -> FieldSyncResult<usize> {
        let Some(source) = source else {
            return Ok(0);
        };

        let dest_fields = index_fields(destination.fields(), |field| field.name.starts_with(prefix));
        if dest_fields.is_empty() {
            trace!(prefix, "No destination fields under prefix");
            return Ok(0);
        }

        if depth > self.options.max_depth {
            return Err(FieldSyncError::FlattenDepthExceeded {
                prefix: prefix.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        let mut copied = 0;
        for field in source.fields() {
            if field.composite {
                let nested_prefix = format!("{}{}{}", prefix, field.name, self.options.separator);
                copied += self.flatten(&nested_prefix, source.nested(field.name), destination, depth + 1)?;
            }

            let target = format!("{}{}", prefix, field.name);
            if assign(source, &field, &target, &dest_fields, destination) {
                copied += 1;
            }
        }

        Ok(copied)
    }
}

fn index_fields(
    fields: Vec<FieldDescriptor>,
    keep: impl Fn(&FieldDescriptor) -> bool,
) -> HashMap<&'static str, FieldDescriptor> {
    fields
        .into_iter()
        .filter(|field| keep(field))
        .map(|field| (field.name, field))
        .collect()
}

/// Copies one source field into the destination field named `target` when
/// that field exists with exactly the same type.
fn assign(
    source: &dyn FieldEnumerable,
    field: &FieldDescriptor,
    target: &str,
    dest_fields: &HashMap<&'static str, FieldDescriptor>,
    destination: &mut dyn FieldEnumerable,
) -> bool {
    let Some(dest_field) = dest_fields.get(target) else {
        trace!(field = field.name, destination_field = target, "No destination field");
        return false;
    };

    if !dest_field.same_type(field) {
        trace!(
            field = field.name,
            destination_field = target,
            source_type = field.type_name,
            destination_type = dest_field.type_name,
            "Skipping type mismatch"
        );
        return false;
    }

    source
        .read(field.name)
        .map_or(false, |value| destination.write(target, value))
}

/// Synchronizes `source` into `destination` and hands the destination back.
///
/// An absent source or destination is a no-op: the destination is returned
/// as given.
pub fn synchronize<'d, S, D>(
    source: Option<&S>,
    destination: Option<&'d mut D>,
    options: &SyncOptions,
) -> FieldSyncResult<Option<&'d mut D>>
where
    S: FieldEnumerable,
    D: FieldEnumerable,
{
    let Some(source) = source else {
        return Ok(destination);
    };
    let Some(destination) = destination else {
        return Ok(None);
    };

    Synchronizer::new(options).run(source, &mut *destination)?;
    Ok(Some(destination))
}

/// Extension trait for copying fields out of any field-enumerable value.
pub trait CopyTo: FieldEnumerable + Sized {
    /// Copies into `destination` with default options.
    fn copy_to<'d, D: FieldEnumerable>(&self, destination: &'d mut D) -> FieldSyncResult<&'d mut D> {
        self.copy_to_with(destination, &SyncOptions::default())
    }

    /// Copies into `destination` with the given options.
    fn copy_to_with<'d, D: FieldEnumerable>(
        &self,
        destination: &'d mut D,
        options: &SyncOptions,
    ) -> FieldSyncResult<&'d mut D> {
        Synchronizer::new(options).run(self, &mut *destination)?;
        Ok(destination)
    }
}

impl<T: FieldEnumerable> CopyTo for T {}
