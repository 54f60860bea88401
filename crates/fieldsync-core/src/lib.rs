//! # Fieldsync Core
//!
//! Generic data shaping: field synchronization between structured values
//! (with prefix flattening and partial-update allow-lists) and page windows
//! with page envelopes over ordered sources.

pub mod error;
pub mod fields;
pub mod lookup;
pub mod pagination;
pub mod patch;
pub mod result;
pub mod sync;
pub mod telemetry;
pub mod validation;

pub use error::*;
pub use fields::*;
pub use lookup::*;
pub use pagination::*;
pub use patch::*;
pub use result::*;
pub use sync::*;
pub use telemetry::*;
pub use validation::*;
