//! Canonical path representation for collected fields
//!
//! Paths are dot-separated routes from a root container down to one field:
//! - `Garage.Car.make`
//! - `Garage.Car.Interior.seats`
//!
//! Both the reflective walk over type shapes and the syntactic walk over a
//! declaration tree key their output through [`Path::for_field`], so the two
//! traversals agree on naming by construction. [`ScopeStack`] carries the
//! syntactic walk's nesting state with its truncate-then-push transition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical field path.
///
/// Paths are immutable once built and support efficient comparison and
/// hashing; they are the keys of a property map.
///
/// # Examples
///
/// ```
/// use proplens::Path;
///
/// let path = Path::from("Car.Interior.seats");
/// assert_eq!(path.segments(), &["Car", "Interior", "seats"]);
/// assert_eq!(path.to_string(), "Car.Interior.seats");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Create a path from a vector of segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parse a path from a dot-separated string.
    pub fn from_str(s: &str) -> Self {
        Self {
            segments: s.split('.').map(String::from).collect(),
        }
    }

    /// Build the canonical path for a field reached through `ancestors`.
    ///
    /// Ancestors are ordered outermost first and end at the field's
    /// immediate container. An empty ancestor list yields the bare field
    /// name, with no leading dot.
    pub fn for_field<S: AsRef<str>>(ancestors: &[S], field: &str) -> Self {
        let mut segments: Vec<String> = ancestors
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        segments.push(field.to_string());
        Self::new(segments)
    }

    /// Get the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Nesting stack for the syntactic declaration walk.
///
/// Holds the class names currently "open" while walking a declaration tree,
/// on top of a fixed seed prefix that is never truncated. The stack mutates
/// only when a class is entered; leaving a class is not an event. The next
/// entered class pulls the stack back into shape:
///
/// - stack empty: push the declared parent (when there is one), then the
///   class itself
/// - parent already on the stack: truncate everything after it, removing
///   leftover entries from a previously visited sibling branch, then push
/// - no declared parent: reset to just the class itself
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    prefix: Vec<String>,
    names: Vec<String>,
}

impl ScopeStack {
    /// Create an empty stack with no seed prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack whose paths all start with `prefix`.
    pub fn with_prefix(prefix: Vec<String>) -> Self {
        Self {
            prefix,
            names: Vec::new(),
        }
    }

    /// Record entry into class `class`, declared inside `parent`.
    pub fn enter(&mut self, class: &str, parent: Option<&str>) {
        match parent {
            Some(parent) => {
                if self.names.is_empty() {
                    self.names.push(parent.to_string());
                } else if let Some(pos) = self.names.iter().position(|n| n == parent) {
                    self.names.truncate(pos + 1);
                }
            }
            None => self.names.clear(),
        }
        self.names.push(class.to_string());
    }

    /// Canonical path for a field declared in the innermost open class.
    pub fn field_path(&self, field: &str) -> Path {
        let ancestors: Vec<&str> = self
            .prefix
            .iter()
            .chain(self.names.iter())
            .map(String::as_str)
            .collect();
        Path::for_field(&ancestors, field)
    }

    /// Currently open class names, outermost first (prefix excluded).
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
