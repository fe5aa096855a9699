//! Description pass over a parsed declaration tree
//!
//! Enriches an already collected [`PropertyMap`] in place: parse the
//! declaration source, walk the one class subtree the map was collected
//! from, rebuild every field's canonical path with a [`ScopeStack`], and
//! copy doc text onto each map entry whose path matches exactly.
//!
//! # Path reconciliation
//!
//! The walk starts at the root class, but the map's paths may carry
//! declaring-type prefixes in front of it. The stack is therefore seeded
//! with the first entry's path minus its last two segments (everything
//! before the immediate container), which makes the walk produce the same
//! keys the reflective pass produced, whichever prefix policy built the
//! map. Entries under containers other than the chosen root are simply
//! never matched and keep no description.

use std::fs;

use tracing::debug;

use crate::decl::ast::ClassDecl;
use crate::decl::parser::parse_declarations;
use crate::error::{Error, Result};
use crate::foundation::ScopeStack;
use crate::map::PropertyMap;

/// Read a declaration file and apply its doc comments to `map`.
///
/// The file is read once, in full, before parsing; the handle is released
/// on every exit path. Returns the number of entries that matched.
pub fn apply_descriptions_file(map: &mut PropertyMap, file: &std::path::Path) -> Result<usize> {
    let source = fs::read_to_string(file)?;
    apply_descriptions(map, &source)
}

/// Apply doc comments from declaration source to `map`.
///
/// The root class is the container of the map's first entry; when the map
/// mixes several top-level containers, only that first one is walked. A
/// field that matches but carries no doc block gets an empty description,
/// which is distinct from no description at all.
pub fn apply_descriptions(map: &mut PropertyMap, source: &str) -> Result<usize> {
    let first = map.first().ok_or(Error::EmptyMap)?;
    let root_name = first.container().to_string();
    let segments = first.path().segments();
    let seed: Vec<String> = if segments.len() >= 2 {
        segments[..segments.len() - 2].to_vec()
    } else {
        Vec::new()
    };

    let classes = parse_declarations(source)?;
    let root = classes
        .iter()
        .find_map(|c| c.find(&root_name))
        .ok_or_else(|| Error::ClassNotFound(root_name.clone()))?;

    let mut stack = ScopeStack::with_prefix(seed);
    let mut matched = 0;
    walk_class(map, root, None, &mut stack, &mut matched);
    debug!(class = root_name.as_str(), matched, "applied descriptions");
    Ok(matched)
}

/// Walk one class: own fields first, then nested classes.
///
/// Visiting fields before nested classes keeps every field keyed to its
/// own container; only sibling classes exercise the stack's truncation.
fn walk_class(
    map: &mut PropertyMap,
    class: &ClassDecl,
    parent: Option<&str>,
    stack: &mut ScopeStack,
    matched: &mut usize,
) {
    stack.enter(&class.name, parent);
    for field in &class.fields {
        let path = stack.field_path(&field.name);
        if let Some(property) = map.get_mut(&path) {
            property.set_description(field.doc.clone().unwrap_or_default());
            *matched += 1;
        }
    }
    for child in &class.classes {
        walk_class(map, child, Some(&class.name), stack, matched);
    }
}
