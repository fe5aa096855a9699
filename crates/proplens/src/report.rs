//! Row printing and CSV export
//!
//! Read-only consumers of a [`PropertyMap`]. Output order is the map's
//! first-insertion order. Unbound values and unset descriptions render as
//! empty cells. The CSV format is deliberately plain: a `sep=,` header
//! line, then one unquoted comma-joined line per property.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::map::{Property, PropertyMap};

/// Write one tab-separated row per property.
///
/// Columns: container, name, canonical path, current value, description.
pub fn render_rows<W: Write>(map: &PropertyMap, out: &mut W) -> io::Result<()> {
    for property in map.iter() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            property.container(),
            property.name(),
            property.path(),
            display_value(property),
            property.description().unwrap_or(""),
        )?;
    }
    Ok(())
}

/// Write the map as CSV: a `sep=,` header, then one line per property.
///
/// Columns: container, name, canonical path, declared type name, current
/// value, description.
pub fn write_csv<W: Write>(map: &PropertyMap, out: &mut W) -> io::Result<()> {
    writeln!(out, "sep=,")?;
    for property in map.iter() {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            property.container(),
            property.name(),
            property.path(),
            property.type_name(),
            display_value(property),
            property.description().unwrap_or(""),
        )?;
    }
    Ok(())
}

/// Write `properties.csv` into `dir` and return its full path.
pub fn write_csv_file(map: &PropertyMap, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join("properties.csv");
    let mut file = fs::File::create(&path)?;
    write_csv(map, &mut file)?;
    Ok(path)
}

fn display_value(property: &Property) -> String {
    property.value().map(|v| v.to_string()).unwrap_or_default()
}
