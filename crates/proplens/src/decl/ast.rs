//! Parsed declaration tree.

use std::ops::Range;

/// Source location of a node, as byte offsets.
pub type Span = Range<usize>;

/// One `class` declaration: fields plus nested classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Declared class name.
    pub name: String,

    /// Documentation comment from source.
    pub doc: Option<String>,

    /// Fields declared directly in this class, in source order.
    pub fields: Vec<FieldDecl>,

    /// Classes declared inside this one, in source order.
    pub classes: Vec<ClassDecl>,

    /// Source location for error messages.
    pub span: Span,
}

impl ClassDecl {
    /// Find a class by name in this subtree, depth-first, self included.
    pub fn find(&self, name: &str) -> Option<&ClassDecl> {
        if self.name == name {
            return Some(self);
        }
        self.classes.iter().find_map(|c| c.find(name))
    }
}

/// One field declaration inside a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Declared field name.
    pub name: String,

    /// Declared type name.
    pub type_name: String,

    /// Documentation comment from source.
    pub doc: Option<String>,

    /// Source location for error messages.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> ClassDecl {
        ClassDecl {
            name: name.to_string(),
            doc: None,
            fields: Vec::new(),
            classes: Vec::new(),
            span: 0..0,
        }
    }

    #[test]
    fn test_find_descends_depth_first() {
        let mut car = leaf("Car");
        car.classes.push(leaf("Interior"));
        let mut garage = leaf("Garage");
        garage.classes.push(car);

        assert_eq!(garage.find("Garage").map(|c| c.name.as_str()), Some("Garage"));
        assert_eq!(garage.find("Interior").map(|c| c.name.as_str()), Some("Interior"));
        assert!(garage.find("Boat").is_none());
    }
}
