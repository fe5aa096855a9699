//! Declaration language front end
//!
//! The textual counterpart of the reflective walk: a small block language
//! describing classes, their fields and their doc comments.
//!
//! ```pdl
//! /// A road vehicle.
//! class Car {
//!     /// Manufacturer name.
//!     make: Text
//!
//!     class Interior {
//!         /// Number of seats.
//!         seats: Int
//!     }
//! }
//! ```
//!
//! - `lexer` tokenizes source, keeping `///` lines as tokens
//! - `ast` holds the parsed class tree with docs attached
//! - `parser` is a hand-written recursive descent over a token stream

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{ClassDecl, FieldDecl};
pub use lexer::Token;
pub use parser::{parse_declarations, ParseError};
