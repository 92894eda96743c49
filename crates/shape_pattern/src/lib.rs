//! Shape Pattern - values, pattern descriptors and the structural matcher.
//!
//! This crate provides:
//! - A type-erased, JSON-like runtime value (`Value`) with shared heap storage
//! - Declarative pattern descriptors (`Pattern`, `Literal`, `ObjectPattern`)
//!   and the `pattern!` macro for writing them in object-literal form
//! - The structural matcher (`matches`) and its diagnostic twin (`explain`)
//!
//! # Matching Model
//!
//! Matching is structural subsumption, not equality: an object pattern only
//! constrains the fields it names, a sequence pattern constrains every
//! element, and the three kind markers (`String`, `Number`, `Boolean`) accept
//! any value of that primitive kind. The matcher is total: a shape mismatch
//! is a `false` result, never an error.
//!
//! ```text
//! let blogs = pattern!([{ Id: Number, Title: String }]);
//! assert!(matches(&value, &blogs));
//! ```

mod errors;
mod macros;
mod matcher;
mod pattern;
mod stack;
mod value;

#[cfg(feature = "serde")]
pub use errors::ValueError;
pub use errors::PatternError;
pub use matcher::{explain, matches, Mismatch, MismatchReason, Path, PathSegment};
pub use pattern::{Literal, ObjectPattern, Pattern};
pub use value::{Heap, Record, Value};
