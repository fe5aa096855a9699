//! Type metadata descriptors
//!
//! The reflective walk does not depend on any runtime introspection API; it
//! consumes hand-registered descriptors instead. A type opts in through
//! [`Inspect`], whose [`TypeShape`] names the type, identifies it, points
//! outward at its declaring type and inward at its nested types, and lists
//! its fields with read accessors.
//!
//! Shape edges are fn pointers rather than direct references so mutually
//! referential shapes (a type and the type it is declared in) stay
//! constructible; an edge is only resolved when a walk follows it.
//!
//! # Examples
//!
//! ```
//! use std::any::TypeId;
//! use proplens::{Inspect, PropertyShape, TypeShape, Value};
//!
//! struct Wheel {
//!     diameter: i64,
//! }
//!
//! impl Inspect for Wheel {
//!     fn shape() -> TypeShape {
//!         TypeShape {
//!             name: "Wheel",
//!             id: TypeId::of::<Wheel>(),
//!             declared_in: None,
//!             nested: &[],
//!             properties: || {
//!                 vec![PropertyShape {
//!                     name: "diameter",
//!                     type_name: "Int",
//!                     read: |obj| {
//!                         obj.downcast_ref::<Wheel>().map(|w| Value::from(w.diameter))
//!                     },
//!                 }]
//!             },
//!         }
//!     }
//! }
//! ```

use std::any::{Any, TypeId};

use crate::foundation::Value;

/// Read accessor for one declared field.
///
/// Downcasts the bound instance and returns the field's current value, or
/// `None` when the instance is not of the owner type.
pub type ReadFn = fn(&dyn Any) -> Option<Value>;

/// Lazily resolved edge to another type's shape.
pub type ShapeFn = fn() -> TypeShape;

/// Metadata for one declared field of a type.
#[derive(Debug, Clone, Copy)]
pub struct PropertyShape {
    /// Bare declared field name.
    pub name: &'static str,
    /// Declared value type name, as reported in exports.
    pub type_name: &'static str,
    /// Reads the field's current value from a bound instance.
    pub read: ReadFn,
}

/// Metadata for one type: identity, nesting edges and declared fields.
#[derive(Debug, Clone, Copy)]
pub struct TypeShape {
    /// Bare type name, used as a path segment.
    pub name: &'static str,
    /// Runtime identity, checked when an instance is bound.
    pub id: TypeId,
    /// The lexically enclosing type, if any.
    pub declared_in: Option<ShapeFn>,
    /// Types declared inside this one, in declaration order.
    pub nested: &'static [ShapeFn],
    /// Declared fields, in declaration order.
    pub properties: fn() -> Vec<PropertyShape>,
}

/// Types that expose their shape for property collection.
pub trait Inspect {
    /// Static metadata describing this type's fields and nesting.
    fn shape() -> TypeShape;
}

/// Chain of declaring types enclosing `shape`, outermost first.
///
/// Walks `declared_in` edges outward until none remain. A name that
/// reappears ends the walk, so a malformed cyclic shape graph terminates
/// instead of looping.
pub fn declaring_chain(shape: &TypeShape) -> Vec<&'static str> {
    let mut chain = Vec::new();
    let mut current = shape.declared_in;
    while let Some(outer) = current.map(|f| f()) {
        if chain.contains(&outer.name) {
            break;
        }
        chain.push(outer.name);
        current = outer.declared_in;
    }
    chain.reverse();
    chain
}
