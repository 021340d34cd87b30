//! Typebind: type handlers and marshalling code generation for native bindings.
//!
//! Given a native type string and a direction, typebind finds the handler
//! that converts values of that type between the native side and the
//! script side, and drives it to emit the conversion code for one wrapper
//! function.
//!
//! - [`handlers`]: the built-in catalog (scalars, `bool`, strings, `void`)
//! - [`transformations`]: smart-pointer and typedef rewrites
//! - [`default_registry`]: a builder preloaded with the built-in catalog
//!
//! # Example
//!
//! ```
//! use typebind::prelude::*;
//! use typebind::SmartPointerTransformation;
//!
//! let mut builder = typebind::default_registry();
//! builder.register_transformation(SmartPointerTransformation::new("Ptr"));
//! let registry = builder.build().unwrap();
//!
//! let count = registry.param("int *", "count", Direction::Out).unwrap();
//! let retval = registry.return_value("double").unwrap();
//!
//! let mut wrapper = ForwardWrapper::default();
//! wrapper.generate(&retval, &[count]).unwrap();
//! assert_eq!(wrapper.call_params, ["&count"]);
//! assert_eq!(wrapper.build_params.format(), "di");
//! ```

pub mod handlers;
pub mod transformations;

pub use typebind_core::*;
pub use typebind_parser::{normalize, parse_type};
pub use typebind_registry::*;

pub use transformations::{SmartPointerTransformation, TypeAliasTransformation};

/// A registry builder preloaded with the built-in handlers.
///
/// Add plugin handlers and transformations, then call `build()`.
pub fn default_registry() -> TypeRegistryBuilder {
    let mut builder = TypeRegistryBuilder::new();
    handlers::register_builtins(&mut builder);
    builder
}

pub mod prelude {
    pub use typebind_core::{
        BindError, Direction, Directions, EmitCode, ForwardWrapper, ReverseWrapper, Role,
        WrapperSettings,
    };
    pub use typebind_registry::{
        Handler, HandlerSpec, TypeHandler, TypeRegistry, TypeRegistryBuilder, TypeTransformation,
    };

    pub use crate::default_registry;
}
