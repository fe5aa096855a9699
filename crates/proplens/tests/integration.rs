//! Integration tests for the full property pipeline.
//!
//! These tests verify the pieces working together:
//! Shape walk → PropertyMap → bind → describe → report
//!
//! Unit tests in the modules cover each stage in isolation; here the
//! fixtures and declaration source are shared across stages the way a
//! real caller would share them.

use std::any::TypeId;
use std::rc::Rc;

use proplens::{
    apply_descriptions, collect_bound, collect_type, CollectOptions, Error, Inspect, PathStyle,
    PropertyMap, PropertyShape, TypeShape, Value,
};

struct Car {
    make: String,
    top_speed: i64,
}

struct Interior {
    seats: i64,
}

struct Exterior {
    doors: i64,
}

impl Inspect for Car {
    fn shape() -> TypeShape {
        TypeShape {
            name: "Car",
            id: TypeId::of::<Car>(),
            declared_in: None,
            nested: &[Interior::shape, Exterior::shape],
            properties: || {
                vec![
                    PropertyShape {
                        name: "make",
                        type_name: "Text",
                        read: |obj| obj.downcast_ref::<Car>().map(|c| Value::from(c.make.clone())),
                    },
                    PropertyShape {
                        name: "top_speed",
                        type_name: "Int",
                        read: |obj| obj.downcast_ref::<Car>().map(|c| Value::from(c.top_speed)),
                    },
                ]
            },
        }
    }
}

impl Inspect for Interior {
    fn shape() -> TypeShape {
        TypeShape {
            name: "Interior",
            id: TypeId::of::<Interior>(),
            declared_in: Some(Car::shape),
            nested: &[],
            properties: || {
                vec![PropertyShape {
                    name: "seats",
                    type_name: "Int",
                    read: |obj| obj.downcast_ref::<Interior>().map(|i| Value::from(i.seats)),
                }]
            },
        }
    }
}

impl Inspect for Exterior {
    fn shape() -> TypeShape {
        TypeShape {
            name: "Exterior",
            id: TypeId::of::<Exterior>(),
            declared_in: Some(Car::shape),
            nested: &[],
            properties: || {
                vec![PropertyShape {
                    name: "doors",
                    type_name: "Int",
                    read: |obj| obj.downcast_ref::<Exterior>().map(|e| Value::from(e.doors)),
                }]
            },
        }
    }
}

const CAR_DECL: &str = r#"
/// A road vehicle.
class Car {
    /// Manufacturer name.
    make: Text
    /// Highest attainable speed.
    top_speed: Int

    class Interior {
        /// Number of seats fitted.
        seats: Int
    }

    class Exterior {
        doors: Int
    }
}
"#;

fn nested() -> CollectOptions {
    CollectOptions {
        nested: true,
        ..CollectOptions::default()
    }
}

/// Verifies: nested collect → describe attaches doc comments by path.
#[test]
fn test_nested_collect_then_describe() {
    let mut map = PropertyMap::new();
    collect_type::<Car>(&mut map, &nested()).unwrap();

    let matched = apply_descriptions(&mut map, CAR_DECL).unwrap();
    assert_eq!(matched, 4);

    assert_eq!(
        map.lookup("Car.make").unwrap().description(),
        Some("Manufacturer name.")
    );
    assert_eq!(
        map.lookup("Car.Interior.seats").unwrap().description(),
        Some("Number of seats fitted.")
    );
    // a matched field without a doc block gets an empty description
    assert_eq!(
        map.lookup("Car.Exterior.doors").unwrap().description(),
        Some("")
    );
}

/// Verifies: a recursive bound collect discovers nested fields unbound;
/// a later flat bound collect of the nested type overwrites them in
/// place, so the canonical path now reads the live value.
#[test]
fn test_nested_then_flat_bound_scenario() {
    let mut map = PropertyMap::new();
    collect_bound::<Car>(
        &mut map,
        Rc::new(Car {
            make: "Aurora".to_string(),
            top_speed: 210,
        }),
        &nested(),
    )
    .unwrap();
    assert!(!map.lookup("Car.Interior.seats").unwrap().is_bound());

    collect_bound::<Interior>(
        &mut map,
        Rc::new(Interior { seats: 5 }),
        &CollectOptions::default(),
    )
    .unwrap();

    // overwritten in place: position kept, binding gained
    let paths: Vec<String> = map.iter().map(|p| p.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "Car.make",
            "Car.top_speed",
            "Car.Interior.seats",
            "Car.Exterior.doors"
        ]
    );

    let seats = map.lookup("Car.Interior.seats").unwrap();
    assert!(seats.is_bound());
    assert_eq!(seats.value(), Some(Value::Int(5)));
}

/// Same scenario with bare paths: the collected type itself heads the key.
#[test]
fn test_bare_scenario_lookup() {
    let mut map = PropertyMap::new();
    let options = CollectOptions {
        path_style: PathStyle::Bare,
        ..CollectOptions::default()
    };
    collect_bound::<Interior>(&mut map, Rc::new(Interior { seats: 5 }), &options).unwrap();

    assert_eq!(
        map.lookup("Interior.seats").unwrap().value(),
        Some(Value::Int(5))
    );
}

/// Verifies: a flat collect of a nested type carries its declaring
/// prefix, so descriptions still reconcile against the same declaration.
#[test]
fn test_qualified_leaf_collect_matches_descriptions() {
    let mut map = PropertyMap::new();
    collect_type::<Interior>(&mut map, &CollectOptions::default()).unwrap();

    let matched = apply_descriptions(&mut map, CAR_DECL).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(
        map.lookup("Car.Interior.seats").unwrap().description(),
        Some("Number of seats fitted.")
    );
}

#[test]
fn test_bare_leaf_collect_matches_descriptions() {
    let mut map = PropertyMap::new();
    let options = CollectOptions {
        path_style: PathStyle::Bare,
        ..CollectOptions::default()
    };
    collect_type::<Interior>(&mut map, &options).unwrap();

    let matched = apply_descriptions(&mut map, CAR_DECL).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(
        map.lookup("Interior.seats").unwrap().description(),
        Some("Number of seats fitted.")
    );
}

/// Verifies: a declaration file named in the options is applied during
/// the collect call itself.
#[test]
fn test_declaration_file_applied_during_collect() {
    let dir = tempfile::tempdir().unwrap();
    let decl_path = dir.path().join("car.pdl");
    std::fs::write(&decl_path, CAR_DECL).unwrap();

    let mut map = PropertyMap::new();
    let options = CollectOptions {
        nested: true,
        declarations: Some(decl_path),
        ..CollectOptions::default()
    };
    collect_type::<Car>(&mut map, &options).unwrap();

    assert_eq!(
        map.lookup("Car.top_speed").unwrap().description(),
        Some("Highest attainable speed.")
    );
}

/// Verifies: when the declaration file cannot be read, collection still
/// lands in the map; only the descriptions are missing.
#[test]
fn test_unreadable_declaration_file_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let mut map = PropertyMap::new();
    let options = CollectOptions {
        nested: true,
        declarations: Some(dir.path().join("no-such.pdl")),
        ..CollectOptions::default()
    };

    let err = collect_type::<Car>(&mut map, &options);
    assert!(matches!(err, Err(Error::Io(_))));

    assert_eq!(map.len(), 4);
    assert_eq!(map.lookup("Car.make").unwrap().description(), None);
}

/// Verifies: re-collecting a type replaces its entries wholesale, so
/// previously attached descriptions are gone until described again.
#[test]
fn test_recollect_overwrites_descriptions() {
    let mut map = PropertyMap::new();
    collect_type::<Car>(&mut map, &nested()).unwrap();
    apply_descriptions(&mut map, CAR_DECL).unwrap();
    assert!(map.lookup("Car.make").unwrap().description().is_some());

    collect_type::<Car>(&mut map, &nested()).unwrap();
    assert_eq!(map.lookup("Car.make").unwrap().description(), None);
}

#[test]
fn test_csv_export_end_to_end() {
    let mut map = PropertyMap::new();
    collect_bound::<Car>(
        &mut map,
        Rc::new(Car {
            make: "Aurora".to_string(),
            top_speed: 210,
        }),
        &CollectOptions::default(),
    )
    .unwrap();
    apply_descriptions(&mut map, CAR_DECL).unwrap();

    let mut out = Vec::new();
    proplens::report::write_csv(&map, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "sep=,");
    assert_eq!(lines[1], "Car,make,Car.make,Text,Aurora,Manufacturer name.");
    assert_eq!(
        lines[2],
        "Car,top_speed,Car.top_speed,Int,210,Highest attainable speed."
    );
}
