//! Reflective collection pass
//!
//! Walks a [`TypeShape`], names every field with its canonical path and
//! merges the result into a caller-owned [`PropertyMap`]. There is no
//! collector object and no state that survives a call: everything a call
//! needs arrives as arguments, and everything it produces lands in the map
//! it was handed.
//!
//! Collection is staged through a fresh local map so that a failing call
//! leaves the caller's map exactly as it was.

use std::any::Any;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use crate::describe;
use crate::error::{Error, Result};
use crate::foundation::Path;
use crate::map::{Property, PropertyMap};
use crate::shape::{declaring_chain, Inspect, TypeShape};

/// How canonical paths are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// Prefix every transitive declaring type: `Garage.Car.Interior.seats`.
    #[default]
    Qualified,
    /// No declaring prefix; paths start at the collected type:
    /// `Interior.seats`.
    Bare,
}

/// Options for one collection call.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Recurse into nested types.
    pub nested: bool,
    /// Declaring-type prefix policy.
    pub path_style: PathStyle,
    /// Declaration source to take field descriptions from.
    pub declarations: Option<PathBuf>,
}

/// Collect the fields of `T` without binding an instance.
pub fn collect_type<T: Inspect>(map: &mut PropertyMap, options: &CollectOptions) -> Result<()> {
    collect_shape(map, T::shape(), None, options)
}

/// Collect the fields of `T` and bind them to `object`.
///
/// The object's runtime type must be `T` itself; see [`collect_shape`].
pub fn collect_bound<T: Inspect>(
    map: &mut PropertyMap,
    object: Rc<dyn Any>,
    options: &CollectOptions,
) -> Result<()> {
    collect_shape(map, T::shape(), Some(object), options)
}

/// Collect the fields of `shape` into `map`.
///
/// Freshly collected entries overwrite same-path entries already present.
/// With an object supplied, only fields declared by the top type bind to
/// it; nested types' fields are collected unbound. That asymmetry is
/// intentional: binding is tied to one flat type, recursion discovers type
/// shape only. An object of the wrong runtime type fails the whole call
/// with [`Error::TypeMismatch`] and leaves `map` untouched.
///
/// When `options.declarations` names a file, it is read once and
/// descriptions are applied to the fresh entries before the merge. A read
/// or parse failure does not discard the collected entries: they merge
/// without descriptions and the error is returned.
pub fn collect_shape(
    map: &mut PropertyMap,
    shape: TypeShape,
    object: Option<Rc<dyn Any>>,
    options: &CollectOptions,
) -> Result<()> {
    let mut fresh = PropertyMap::new();
    let mut chain: Vec<&'static str> = match options.path_style {
        PathStyle::Qualified => declaring_chain(&shape),
        PathStyle::Bare => Vec::new(),
    };
    collect_into(&mut fresh, &shape, &mut chain, options.nested);
    debug!(
        type_name = shape.name,
        nested = options.nested,
        count = fresh.len(),
        "collected properties"
    );

    if let Some(object) = object {
        if object.as_ref().type_id() != shape.id {
            return Err(Error::TypeMismatch {
                expected: shape.name,
            });
        }
        fresh.bind_all(shape.id, &object)?;
    }

    let described = match &options.declarations {
        Some(path) => describe::apply_descriptions_file(&mut fresh, path).map(Some),
        None => Ok(None),
    };

    map.merge(fresh);
    described?;
    Ok(())
}

fn collect_into(
    map: &mut PropertyMap,
    shape: &TypeShape,
    chain: &mut Vec<&'static str>,
    nested: bool,
) {
    chain.push(shape.name);
    for field in (shape.properties)() {
        let path = Path::for_field(chain, field.name);
        map.insert(Property::new(shape, &field, path));
    }
    if nested {
        for child in shape.nested {
            let child_shape = child();
            collect_into(map, &child_shape, chain, nested);
        }
    }
    chain.pop();
}
