//! Collected properties and the path-keyed map
//!
//! A [`Property`] is one discovered field: its names, its canonical path,
//! the identity of the type that declared it, a read accessor and an
//! optionally bound live instance. A [`PropertyMap`] holds properties keyed
//! by canonical path.
//!
//! # Design
//!
//! - The map is insertion-ordered: iteration follows first-insertion order,
//!   and overwriting a path keeps the entry's original position. Mutation is
//!   append-or-overwrite only; nothing is ever deleted.
//! - A property never owns its bound instance. Binding stores a shared
//!   handle and reads go through it live; the instance's runtime type must
//!   be the property's owner type, checked at bind time.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::foundation::{Path, Value};
use crate::shape::{PropertyShape, ReadFn, TypeShape};

/// One discovered field of a collected type.
pub struct Property {
    name: &'static str,
    container: &'static str,
    type_name: &'static str,
    path: Path,
    owner: TypeId,
    read: ReadFn,
    bound: Option<Rc<dyn Any>>,
    description: Option<String>,
}

impl Property {
    pub(crate) fn new(shape: &TypeShape, field: &PropertyShape, path: Path) -> Self {
        Self {
            name: field.name,
            container: shape.name,
            type_name: field.type_name,
            path,
            owner: shape.id,
            read: field.read,
            bound: None,
            description: None,
        }
    }

    /// Bare declared field name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Name of the immediate enclosing type.
    pub fn container(&self) -> &str {
        self.container
    }

    /// Declared value type name.
    pub fn type_name(&self) -> &str {
        self.type_name
    }

    /// Canonical path, the map key.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Description attached by the declaration walk, if any matched.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn set_description(&mut self, text: String) {
        self.description = Some(text);
    }

    /// Whether a live instance is attached.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Current value, read live through the bound instance.
    ///
    /// `None` while no instance is bound.
    pub fn value(&self) -> Option<Value> {
        self.bound.as_deref().and_then(|obj| (self.read)(obj))
    }

    /// Attach a live instance for value reads.
    ///
    /// The instance's runtime type must be the type that declared this
    /// property; a mismatch stores nothing.
    pub(crate) fn bind(&mut self, object: Rc<dyn Any>) -> Result<()> {
        if object.as_ref().type_id() != self.owner {
            return Err(Error::TypeMismatch {
                expected: self.container,
            });
        }
        self.bound = Some(object);
        Ok(())
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("path", &self.path)
            .field("type_name", &self.type_name)
            .field("bound", &self.is_bound())
            .field("description", &self.description)
            .finish()
    }
}

/// Insertion-ordered map from canonical path to property.
#[derive(Debug, Default)]
pub struct PropertyMap {
    entries: IndexMap<Path, Property>,
}

impl PropertyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a property by path.
    pub fn get(&self, path: &Path) -> Option<&Property> {
        self.entries.get(path)
    }

    pub(crate) fn get_mut(&mut self, path: &Path) -> Option<&mut Property> {
        self.entries.get_mut(path)
    }

    /// Look up a property by exact canonical path.
    pub fn lookup(&self, path: &str) -> Result<&Property> {
        let key = Path::from(path);
        self.entries.get(&key).ok_or(Error::PathNotFound(key))
    }

    /// The entry inserted first, if any.
    pub fn first(&self) -> Option<&Property> {
        self.entries.values().next()
    }

    /// Insert a property under its canonical path.
    ///
    /// An entry already keyed by that path is replaced in place and
    /// returned; its position in iteration order is kept.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        self.entries.insert(property.path.clone(), property)
    }

    /// Merge `other` in, overwriting entries that share a path.
    pub fn merge(&mut self, other: PropertyMap) {
        for (path, property) in other.entries {
            self.entries.insert(path, property);
        }
    }

    /// Iterate properties in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.values()
    }

    /// Bind `object` to every property declared by `owner`.
    pub(crate) fn bind_all(&mut self, owner: TypeId, object: &Rc<dyn Any>) -> Result<()> {
        for property in self.entries.values_mut() {
            if property.owner == owner {
                property.bind(Rc::clone(object))?;
            }
        }
        Ok(())
    }
}
