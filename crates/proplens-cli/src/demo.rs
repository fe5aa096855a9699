//! Demo fleet: a small nested type family with hand-registered shapes.
//!
//! `Garage` encloses `Car`, which encloses `Interior` and `Exterior`. The
//! matching declaration source lives in [`FLEET_DECL`] so the binary works
//! without any file on disk.

use std::any::TypeId;

use proplens::{Inspect, PropertyShape, TypeShape, Value};

/// Declaration source for the fleet, field docs included.
pub const FLEET_DECL: &str = r#"
/// Where the fleet sleeps.
class Garage {
    /// Sign over the door.
    name: Text
    /// How many vehicles fit inside.
    capacity: Int

    /// A road vehicle.
    class Car {
        /// Manufacturer name.
        make: Text
        /// Highest attainable speed.
        top_speed: Int
        /// Battery instead of a tank.
        electric: Bool

        class Interior {
            /// Number of seats fitted.
            seats: Int
            /// Number of airbags fitted.
            airbags: Int
        }

        class Exterior {
            /// Number of doors.
            doors: Int
        }
    }
}
"#;

pub struct Garage {
    pub name: String,
    pub capacity: i64,
}

pub struct Car {
    pub make: String,
    pub top_speed: i64,
    pub electric: bool,
}

pub struct Interior {
    pub seats: i64,
    pub airbags: i64,
}

pub struct Exterior {
    pub doors: i64,
}

impl Inspect for Garage {
    fn shape() -> TypeShape {
        TypeShape {
            name: "Garage",
            id: TypeId::of::<Garage>(),
            declared_in: None,
            nested: &[Car::shape],
            properties: || {
                vec![
                    PropertyShape {
                        name: "name",
                        type_name: "Text",
                        read: |obj| {
                            obj.downcast_ref::<Garage>().map(|g| Value::from(g.name.clone()))
                        },
                    },
                    PropertyShape {
                        name: "capacity",
                        type_name: "Int",
                        read: |obj| obj.downcast_ref::<Garage>().map(|g| Value::from(g.capacity)),
                    },
                ]
            },
        }
    }
}

impl Inspect for Car {
    fn shape() -> TypeShape {
        TypeShape {
            name: "Car",
            id: TypeId::of::<Car>(),
            declared_in: Some(Garage::shape),
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
                    PropertyShape {
                        name: "electric",
                        type_name: "Bool",
                        read: |obj| obj.downcast_ref::<Car>().map(|c| Value::from(c.electric)),
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
                vec![
                    PropertyShape {
                        name: "seats",
                        type_name: "Int",
                        read: |obj| obj.downcast_ref::<Interior>().map(|i| Value::from(i.seats)),
                    },
                    PropertyShape {
                        name: "airbags",
                        type_name: "Int",
                        read: |obj| obj.downcast_ref::<Interior>().map(|i| Value::from(i.airbags)),
                    },
                ]
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
