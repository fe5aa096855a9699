//! Foundation types shared by both traversals.

pub mod path;
pub mod value;

pub use path::{Path, ScopeStack};
pub use value::Value;
