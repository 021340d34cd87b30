//! Type patterns a handler registration accepts.

use std::fmt;
use std::sync::Arc;

use typebind_core::{ParseError, TypeDescriptor};

/// Predicate signature for [`TypePattern::Predicate`].
pub type TypePredicate = dyn Fn(&TypeDescriptor) -> bool + Send + Sync;

/// A matcher over canonical type descriptors.
///
/// ```
/// use typebind_registry::TypePattern;
/// use typebind_parser::parse_type;
///
/// let exact = TypePattern::exact("testtype*").unwrap();
/// assert!(exact.accepts(&parse_type("testtype *").unwrap()));
///
/// let any_foo_ptr = TypePattern::pointer_to("Foo");
/// assert!(any_foo_ptr.accepts(&parse_type("const Foo*").unwrap()));
/// assert!(!any_foo_ptr.accepts(&parse_type("Foo").unwrap()));
/// ```
#[derive(Clone)]
pub enum TypePattern {
    /// Exactly this type, compared in canonical form.
    Exact(TypeDescriptor),
    /// A single pointer to the named base type, const or not.
    PointerTo(String),
    /// Any instantiation of the named single-argument template.
    TemplateOf(String),
    /// Arbitrary structural test.
    Predicate(Arc<TypePredicate>),
}

impl TypePattern {
    /// Parse a literal type string into an exact pattern.
    pub fn exact(ctype: &str) -> Result<Self, ParseError> {
        typebind_parser::parse_type(ctype).map(TypePattern::Exact)
    }

    pub fn pointer_to(base: impl Into<String>) -> Self {
        TypePattern::PointerTo(base.into())
    }

    pub fn template_of(name: impl Into<String>) -> Self {
        TypePattern::TemplateOf(name.into())
    }

    pub fn predicate(f: impl Fn(&TypeDescriptor) -> bool + Send + Sync + 'static) -> Self {
        TypePattern::Predicate(Arc::new(f))
    }

    /// Whether this pattern accepts the given canonical type.
    pub fn accepts(&self, ty: &TypeDescriptor) -> bool {
        match self {
            TypePattern::Exact(expected) => expected == ty,
            TypePattern::PointerTo(base) => {
                ty.pointer_depth() == 1
                    && !ty.is_reference()
                    && !ty.is_template()
                    && &ty.base_name == base
            }
            TypePattern::TemplateOf(name) => ty.is_template() && &ty.base_name == name,
            TypePattern::Predicate(f) => f(ty),
        }
    }

    /// The literal type, for exact patterns.
    pub fn literal(&self) -> Option<&TypeDescriptor> {
        match self {
            TypePattern::Exact(ty) => Some(ty),
            _ => None,
        }
    }
}

impl fmt::Debug for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Exact(ty) => write!(f, "Exact({ty})"),
            TypePattern::PointerTo(base) => write!(f, "PointerTo({base})"),
            TypePattern::TemplateOf(name) => write!(f, "TemplateOf({name})"),
            TypePattern::Predicate(_) => write!(f, "Predicate(<fn>)"),
        }
    }
}
