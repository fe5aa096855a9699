// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # proplens
//!
//! Property introspection over hand-registered type metadata: walk a
//! type's declared fields (and, recursively, its nested types), give every
//! field a stable dot-delimited canonical path, optionally bind live
//! instances for value reads, and enrich the result with doc comments
//! parsed from a parallel textual declaration.
//!
//! ## Architecture
//!
//! Two independent traversals meet in one map and must agree on naming:
//!
//! ```text
//! shape (TypeShape graph) ──collect──▶ PropertyMap ◀──describe── .pdl source
//!                                          │
//!                                       report / lookup
//! ```
//!
//! - `foundation`: canonical [`Path`] plus the declaration walk's
//!   [`ScopeStack`]; field [`Value`] read-outs
//! - `shape`: [`TypeShape`] descriptors behind the [`Inspect`] trait
//! - `map`: [`PropertyMap`], insertion-ordered, append-or-overwrite
//! - `collect`: reflective pass over shapes, with optional binding
//! - `decl`: lexer, AST and parser for declaration source
//! - `describe`: doc-comment pass reconciling paths with the map
//! - `report`: row printing and CSV export
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proplens::{collect_type, CollectOptions, PropertyMap};
//!
//! let mut map = PropertyMap::new();
//! let options = CollectOptions { nested: true, ..CollectOptions::default() };
//! collect_type::<Car>(&mut map, &options)?;
//! proplens::apply_descriptions(&mut map, decl_source)?;
//!
//! let seats = map.lookup("Car.Interior.seats")?;
//! println!("{}: {:?}", seats.path(), seats.description());
//! ```

pub mod collect;
pub mod decl;
pub mod describe;
pub mod error;
pub mod foundation;
pub mod map;
pub mod report;
pub mod shape;

// Re-export commonly used types
pub use collect::{collect_bound, collect_shape, collect_type, CollectOptions, PathStyle};
pub use describe::{apply_descriptions, apply_descriptions_file};
pub use error::{Error, Result};
pub use foundation::{Path, ScopeStack, Value};
pub use map::{Property, PropertyMap};
pub use shape::{declaring_chain, Inspect, PropertyShape, ReadFn, ShapeFn, TypeShape};
