//! Field capability traits.
//!
//! Types opt into synchronization by exposing their fields as a stable,
//! ordered list of descriptors with type-erased read and write access.
//! The [`field_enumerable!`](crate::field_enumerable) macro generates both
//! traits for a plain struct; [`primitive_field_type!`](crate::primitive_field_type)
//! marks leaf value types.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Describes one named field of a field-enumerable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, unique per type.
    pub name: &'static str,
    /// Exact declared type of the field.
    pub type_id: TypeId,
    /// Readable name of the declared type, for diagnostics.
    pub type_name: &'static str,
    /// Whether the field type is flattened by the synchronizer.
    pub composite: bool,
}

impl FieldDescriptor {
    /// Creates the descriptor for a field named `name` of type `T`.
    #[must_use]
    pub fn of<T: FieldType>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            composite: T::COMPOSITE,
        }
    }

    /// Returns true if both fields are declared with exactly the same type.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

/// A type that can appear as a field of a field-enumerable value.
///
/// `COMPOSITE` is the structural classification used for flattening. Leaf
/// values (numbers, strings, dates, enums, collections) keep the default.
pub trait FieldType: Any + Clone {
    /// Whether values of this type are flattened into prefixed fields.
    const COMPOSITE: bool = false;

    /// Returns the field-enumerable view of a composite value, if present.
    fn as_fields(&self) -> Option<&dyn FieldEnumerable> {
        None
    }
}

/// Uniform named-field view over a structured value.
pub trait FieldEnumerable {
    /// Name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// Descriptors of every field, in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Reads a clone of the named field's current value.
    fn read(&self, name: &str) -> Option<Box<dyn Any>>;

    /// Borrows the named composite field as a nested field-enumerable value.
    ///
    /// Returns `None` for leaf fields and for absent optional values.
    fn nested(&self, name: &str) -> Option<&dyn FieldEnumerable>;

    /// Writes `value` into the named field.
    ///
    /// Returns false, leaving the field untouched, when the name is unknown
    /// or the value is not exactly the field's declared type.
    fn write(&mut self, name: &str, value: Box<dyn Any>) -> bool;

    /// Looks up a single descriptor by name.
    fn field(&self, name: &str) -> Option<FieldDescriptor> {
        self.fields().into_iter().find(|field| field.name == name)
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const COMPOSITE: bool = T::COMPOSITE;

    fn as_fields(&self) -> Option<&dyn FieldEnumerable> {
        self.as_ref().and_then(|value| value.as_fields())
    }
}

impl<T: FieldType> FieldType for Box<T> {
    const COMPOSITE: bool = T::COMPOSITE;

    fn as_fields(&self) -> Option<&dyn FieldEnumerable> {
        (**self).as_fields()
    }
}

impl<T: FieldType> FieldType for Arc<T> {
    const COMPOSITE: bool = T::COMPOSITE;

    fn as_fields(&self) -> Option<&dyn FieldEnumerable> {
        (**self).as_fields()
    }
}

impl<T: FieldType> FieldType for Rc<T> {
    const COMPOSITE: bool = T::COMPOSITE;

    fn as_fields(&self) -> Option<&dyn FieldEnumerable> {
        (**self).as_fields()
    }
}

// Collections are copied whole, never flattened element-wise.
impl<T: Clone + 'static> FieldType for Vec<T> {}

impl<T: Clone + 'static> FieldType for VecDeque<T> {}

impl<T: Clone + 'static> FieldType for BTreeSet<T> {}

impl<K: Clone + 'static, V: Clone + 'static> FieldType for BTreeMap<K, V> {}

impl<T: Clone + 'static, S: Clone + 'static> FieldType for HashSet<T, S> {}

impl<K: Clone + 'static, V: Clone + 'static, S: Clone + 'static> FieldType for HashMap<K, V, S> {}

/// Marks one or more types as leaf (non-composite) field types.
///
/// ```ignore
/// #[derive(Clone)]
/// enum Status { Active, Closed }
/// fieldsync_core::primitive_field_type!(Status);
/// ```
#[macro_export]
macro_rules! primitive_field_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldType for $ty {}
        )+
    };
}

primitive_field_type!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    std::time::Duration,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::NaiveTime,
    uuid::Uuid,
    serde_json::Value,
);

/// Implements [`FieldType`] (as composite) and [`FieldEnumerable`] for a
/// struct from its field list.
///
/// Every listed field type must itself implement [`FieldType`].
///
/// ```ignore
/// #[derive(Clone, Default)]
/// struct Address { city: String, zip: String }
/// fieldsync_core::field_enumerable!(Address { city: String, zip: String });
/// ```
#[macro_export]
macro_rules! field_enumerable {
    ($ty:ident { $($field:ident : $field_ty:ty),* $(,)? }) => {
        impl $crate::FieldType for $ty {
            const COMPOSITE: bool = true;

            fn as_fields(&self) -> ::std::option::Option<&dyn $crate::FieldEnumerable> {
                ::std::option::Option::Some(self as &dyn $crate::FieldEnumerable)
            }
        }

        impl $crate::FieldEnumerable for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![$($crate::FieldDescriptor::of::<$field_ty>(stringify!($field))),*]
            }

            fn read(&self, name: &str) -> ::std::option::Option<::std::boxed::Box<dyn ::std::any::Any>> {
                match name {
                    $(
                        stringify!($field) => ::std::option::Option::Some(
                            ::std::boxed::Box::new(::std::clone::Clone::clone(&self.$field))
                                as ::std::boxed::Box<dyn ::std::any::Any>,
                        ),
                    )*
                    _ => ::std::option::Option::None,
                }
            }

            fn nested(&self, name: &str) -> ::std::option::Option<&dyn $crate::FieldEnumerable> {
                match name {
                    $(stringify!($field) => $crate::FieldType::as_fields(&self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn write(&mut self, name: &str, value: ::std::boxed::Box<dyn ::std::any::Any>) -> bool {
                match name {
                    $(
                        stringify!($field) => match value.downcast::<$field_ty>() {
                            ::std::result::Result::Ok(value) => {
                                self.$field = *value;
                                true
                            }
                            ::std::result::Result::Err(_) => false,
                        },
                    )*
                    _ => false,
                }
            }
        }
    };
}
