//! Built-in type transformations.

mod alias;
mod smart_pointer;

pub use alias::TypeAliasTransformation;
pub use smart_pointer::SmartPointerTransformation;
