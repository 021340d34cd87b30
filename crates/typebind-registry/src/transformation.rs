//! Type transformations - pluggable rewrites tried when no handler matches.
//!
//! A transformation recognizes types that have no handler of their own
//! (smart pointers, typedefs, thin template wrappers) and names the type
//! that should be looked up instead. The handler found for that type is
//! marked as transformed and keeps a reference to the transformation, so
//! the code it emits can move values between the two representations.

use std::fmt;
use std::sync::Arc;

use typebind_core::{CodeBlock, Declarations, RegistrationError, TypeDescriptor};

use crate::{Handler, HandlerSpec};

/// A rewrite rule from an unrecognized type to a canonical one.
///
/// [`untransformed_name`](Self::untransformed_name) must be a pure function,
/// and it must decline its own output so a lookup never chains rewrites.
pub trait TypeTransformation: Send + Sync {
    /// Name reported in diagnostics.
    fn name(&self) -> &str;

    /// The type to look up instead of `ty`, or `None` to decline.
    fn untransformed_name(&self, ty: &TypeDescriptor) -> Option<String>;

    /// Adjust construction arguments for the handler about to be created.
    ///
    /// `spec.ctype` already holds the canonical type.
    fn adjust_spec(&self, spec: HandlerSpec) -> HandlerSpec {
        spec
    }

    /// Turn a canonical-typed expression into the original type.
    fn transform(
        &self,
        _handler: &Handler,
        _declarations: &mut Declarations,
        _code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        expr.to_string()
    }

    /// Turn an original-typed expression into the canonical type.
    fn untransform(
        &self,
        _handler: &Handler,
        _declarations: &mut Declarations,
        _code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        expr.to_string()
    }

    /// Check the transformation's configuration when the registry is built.
    fn validate(&self) -> Result<(), RegistrationError> {
        Ok(())
    }
}

/// A successful rewrite.
#[derive(Clone)]
pub struct TransformMatch {
    /// The type to look up instead.
    pub canonical: String,
    /// The transformation that produced it.
    pub transformation: Arc<dyn TypeTransformation>,
}

impl TransformMatch {
    pub fn name(&self) -> &str {
        self.transformation.name()
    }
}

impl fmt::Debug for TransformMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformMatch")
            .field("canonical", &self.canonical)
            .field("transformation", &self.name())
            .finish()
    }
}

/// Ordered list of transformations. First match wins.
#[derive(Default, Clone)]
pub struct TransformationRegistry {
    transformations: Vec<Arc<dyn TypeTransformation>>,
}

impl TransformationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transformation. Later registrations are tried later.
    pub fn register(&mut self, transformation: Arc<dyn TypeTransformation>) {
        self.transformations.push(transformation);
    }

    /// Apply the first transformation that does not decline.
    pub fn apply_first_match(&self, ty: &TypeDescriptor) -> Option<TransformMatch> {
        self.transformations.iter().find_map(|t| {
            t.untransformed_name(ty).map(|canonical| TransformMatch {
                canonical,
                transformation: Arc::clone(t),
            })
        })
    }

    /// Like [`apply_first_match`](Self::apply_first_match), also reporting
    /// the names of every transformation consulted.
    pub fn apply_first_match_traced(
        &self,
        ty: &TypeDescriptor,
    ) -> (Option<TransformMatch>, Vec<String>) {
        let mut attempted = Vec::new();
        for t in &self.transformations {
            attempted.push(t.name().to_string());
            if let Some(canonical) = t.untransformed_name(ty) {
                let found = TransformMatch {
                    canonical,
                    transformation: Arc::clone(t),
                };
                return (Some(found), attempted);
            }
        }
        (None, attempted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TypeTransformation>> {
        self.transformations.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.transformations.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }
}

impl fmt::Debug for TransformationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationRegistry")
            .field("transformations", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebind_parser::parse_type;

    /// Rewrites `Box<X>` to `X *`.
    struct Boxed;

    impl TypeTransformation for Boxed {
        fn name(&self) -> &str {
            "boxed"
        }

        fn untransformed_name(&self, ty: &TypeDescriptor) -> Option<String> {
            match (&ty.template_arg, ty.base_name.as_str()) {
                (Some(arg), "Box") if !ty.is_pointer() => Some(format!("{arg} *")),
                _ => None,
            }
        }
    }

    /// Rewrites anything whose base name starts with `Legacy`.
    struct Legacy;

    impl TypeTransformation for Legacy {
        fn name(&self) -> &str {
            "legacy"
        }

        fn untransformed_name(&self, ty: &TypeDescriptor) -> Option<String> {
            ty.base_name
                .strip_prefix("Legacy")
                .map(|rest| rest.to_string())
        }
    }

    #[test]
    fn first_match_wins() {
        let mut registry = TransformationRegistry::new();
        registry.register(Arc::new(Legacy));
        registry.register(Arc::new(Boxed));

        let ty = parse_type("LegacyBox<Foo>").unwrap();
        let found = registry.apply_first_match(&ty).unwrap();
        assert_eq!(found.name(), "legacy");
        assert_eq!(found.canonical, "Box");

        let ty = parse_type("Box<Foo>").unwrap();
        let found = registry.apply_first_match(&ty).unwrap();
        assert_eq!(found.name(), "boxed");
        assert_eq!(found.canonical, "Foo *");
    }

    #[test]
    fn declining_everywhere_yields_none() {
        let mut registry = TransformationRegistry::new();
        registry.register(Arc::new(Boxed));
        let ty = parse_type("int").unwrap();
        assert!(registry.apply_first_match(&ty).is_none());
    }

    #[test]
    fn traced_lists_consulted_transformations() {
        let mut registry = TransformationRegistry::new();
        registry.register(Arc::new(Boxed));
        registry.register(Arc::new(Legacy));
        registry.register(Arc::new(Boxed));

        let ty = parse_type("LegacyFoo").unwrap();
        let (found, attempted) = registry.apply_first_match_traced(&ty);
        assert_eq!(found.unwrap().canonical, "Foo");
        assert_eq!(attempted, ["boxed", "legacy"]);

        let ty = parse_type("Other").unwrap();
        let (found, attempted) = registry.apply_first_match_traced(&ty);
        assert!(found.is_none());
        assert_eq!(attempted, ["boxed", "legacy", "boxed"]);
    }

    #[test]
    fn boxed_declines_its_own_output() {
        let ty = parse_type("Box<Foo>").unwrap();
        let rewritten = Boxed.untransformed_name(&ty).unwrap();
        let reparsed = parse_type(&rewritten).unwrap();
        assert!(Boxed.untransformed_name(&reparsed).is_none());
    }

    #[test]
    fn registry_keeps_duplicates() {
        let mut registry = TransformationRegistry::new();
        registry.register(Arc::new(Boxed));
        registry.register(Arc::new(Boxed));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), ["boxed", "boxed"]);
    }
}
