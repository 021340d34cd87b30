//! Typebind registry crate.
//!
//! Holds the two process-wide tables of the binding generator and the
//! lookup engine that consults them:
//!
//! - [`HandlerCatalog`]: registered [`TypeHandler`]s with the type patterns,
//!   directions and role each one accepts
//! - [`TransformationRegistry`]: ordered [`TypeTransformation`] plugins that
//!   rewrite unrecognized types into a form the catalog knows
//! - [`TypeRegistry`]: the immutable snapshot produced by
//!   [`TypeRegistryBuilder::build`], answering [`find_handler`](TypeRegistry::find_handler)
//!
//! # Example
//!
//! ```
//! use typebind_core::{CodegenError, Direction, Directions, ForwardWrapper, ReverseWrapper, Role};
//! use typebind_registry::{Handler, TypeHandler, TypeRegistry};
//!
//! struct IntParam;
//!
//! impl TypeHandler for IntParam {
//!     fn name(&self) -> &str {
//!         "IntParam"
//!     }
//!
//!     fn emit_forward(
//!         &self,
//!         handler: &Handler,
//!         wrapper: &mut ForwardWrapper,
//!     ) -> Result<(), CodegenError> {
//!         let name = wrapper
//!             .declarations
//!             .declare_variable(handler.ctype(), handler.name(), None);
//!         wrapper
//!             .parse_params
//!             .add_parameter("i", [format!("&{name}")], Some(handler.name()));
//!         wrapper.call_params.push(name);
//!         Ok(())
//!     }
//!
//!     fn emit_reverse(
//!         &self,
//!         handler: &Handler,
//!         wrapper: &mut ReverseWrapper,
//!     ) -> Result<(), CodegenError> {
//!         wrapper.build_params.add_parameter("i", [handler.name()], None);
//!         Ok(())
//!     }
//! }
//!
//! let mut builder = TypeRegistry::builder();
//! builder.register_handler(&["int"], Directions::IN, Role::Parameter, IntParam);
//! let registry = builder.build().unwrap();
//!
//! let handler = registry.find_handler("int", "x", Direction::In, Role::Parameter).unwrap();
//! assert_eq!(handler.handler_name(), "IntParam");
//! assert!(!handler.was_transformed());
//! ```

mod catalog;
mod handler;
mod pattern;
mod registry;
mod transformation;

pub use catalog::{CatalogEntry, HandlerCatalog};
pub use handler::{Handler, HandlerSpec, TypeHandler};
pub use pattern::{TypePattern, TypePredicate};
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use transformation::{TransformMatch, TransformationRegistry, TypeTransformation};
