//! Typebind parser crate.
//!
//! Parses native type strings into [`TypeDescriptor`]s. The grammar is
//! deliberately small:
//!
//! ```text
//! type       := 'const'? IDENT template? suffix*
//! template   := '<' IDENT '>'
//! suffix     := '*' | '&'
//! IDENT      := [A-Za-z_][A-Za-z0-9_:]*
//! ```
//!
//! Whitespace between tokens is insignificant. Anything outside the grammar
//! (nested or multi-argument templates, trailing qualifiers, a `&` followed
//! by `*`) is a [`ParseError`] rather than a silent truncation.
//!
//! # Example
//!
//! ```
//! use typebind_parser::{parse_type, normalize};
//!
//! let ty = parse_type("const MySmartPointer< Foo > &").unwrap();
//! assert!(ty.is_const);
//! assert_eq!(ty.base_name, "MySmartPointer");
//! assert_eq!(ty.template_arg.as_deref(), Some("Foo"));
//! assert!(ty.is_reference());
//!
//! assert_eq!(normalize("testtype*").unwrap(), "testtype *");
//! ```

mod cursor;
mod lexer;
mod parser;
mod token;

pub use lexer::Lexer;
pub use parser::TypeParser;
pub use token::{Token, TokenKind};

use typebind_core::{ParseError, TypeDescriptor};

/// Parse a type string into a descriptor.
pub fn parse_type(source: &str) -> Result<TypeDescriptor, ParseError> {
    TypeParser::new(source).parse()
}

/// Parse a type string and return its canonical rendering.
pub fn normalize(source: &str) -> Result<String, ParseError> {
    parse_type(source).map(|ty| ty.to_string())
}
