//! Typebind core crate.
//!
//! Shared vocabulary for the binding generator's type handling:
//! - [`TypeDescriptor`], the parsed form of a native type string
//! - [`Direction`], [`Directions`] and [`Role`] for handler selection
//! - The error taxonomy ([`ParseError`], [`LookupError`], [`RegistrationError`],
//!   [`CodegenError`] and the umbrella [`BindError`])
//! - Wrapper generation contexts ([`ForwardWrapper`], [`ReverseWrapper`]) and
//!   the accumulators handlers write into
//!
//! # Example
//!
//! ```
//! use typebind_core::{Direction, Directions, TypeDescriptor};
//!
//! let ptr = TypeDescriptor::new("Foo").with_pointers(1);
//! assert_eq!(ptr.to_string(), "Foo *");
//!
//! let dirs = Directions::IN | Directions::INOUT;
//! assert!(dirs.supports(Direction::InOut));
//! assert!(!dirs.supports(Direction::Out));
//! ```

mod descriptor;
mod direction;
mod error;
mod settings;
pub mod wrapper;

pub use descriptor::{Indirection, TypeDescriptor};
pub use direction::{Direction, Directions, Role};
pub use error::{
    BindError, CodegenError, LookupError, ParseError, ParseErrorKind, RegistrationError,
};
pub use settings::WrapperSettings;
pub use wrapper::{
    CodeBlock, Declaration, Declarations, EmitCode, FormatFragment, FormatParams,
    ForwardWrapper, ReverseWrapper,
};
