//! TypeRegistry - immutable handler and transformation tables plus lookup.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   build()   ┌──────────────────────────┐
//! │     TypeRegistryBuilder      │ ──────────▶ │       TypeRegistry       │
//! │  - register_handler(..)      │             │  (immutable, Send+Sync)  │
//! │  - register_transformation(..)│             │  - find_handler(..)      │
//! └──────────────────────────────┘             └──────────────────────────┘
//! ```
//!
//! Registration happens once, during start-up (built-in handlers first, then
//! plugins). `build()` validates everything and freezes the tables; the
//! resulting registry can be shared via `Arc` by parallel generation passes
//! since nothing mutates it during lookup.
//!
//! # Lookup
//!
//! 1. Parse the type string (`ParseError` on failure).
//! 2. Direct match: the canonical type, then the const-stripped type.
//! 3. Otherwise ask the transformations, in registration order, for a
//!    rewrite. The first one that does not decline is the only one used.
//! 4. Direct match against the rewritten type; a hit is marked transformed.
//! 5. Otherwise fail with `LookupError`.

use std::sync::Arc;

use tracing::{debug, trace};

use typebind_core::{
    BindError, Direction, Directions, LookupError, RegistrationError, Role, TypeDescriptor,
};

use crate::{
    CatalogEntry, Handler, HandlerCatalog, HandlerSpec, TransformationRegistry, TypeHandler,
    TypePattern, TypeTransformation,
};

/// Builder for constructing an immutable [`TypeRegistry`].
///
/// Registration errors are collected and reported together by
/// [`build`](Self::build).
///
/// # Example
///
/// ```ignore
/// let mut builder = TypeRegistryBuilder::new();
/// builder
///     .register_handler(&["int", "int32_t"], Directions::IN, Role::Parameter, IntParam)
///     .register_transformation(SmartPointerTransformation::new("Ptr"));
/// let registry = builder.build()?;
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    catalog: HandlerCatalog,
    transformations: TransformationRegistry,
    strict_shadowing: bool,
    errors: Vec<RegistrationError>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject literal patterns that an earlier registration already covers
    /// for the same role and an overlapping direction.
    ///
    /// Off by default: the first registration simply wins.
    pub fn strict_shadowing(&mut self, strict: bool) -> &mut Self {
        self.strict_shadowing = strict;
        self
    }

    // =========================================================================
    // Handler Registration
    // =========================================================================

    /// Register a handler for a set of literal type strings.
    pub fn register_handler<H>(
        &mut self,
        ctypes: &[&str],
        directions: Directions,
        role: Role,
        handler: H,
    ) -> &mut Self
    where
        H: TypeHandler + 'static,
    {
        let mut patterns = Vec::with_capacity(ctypes.len());
        for ctype in ctypes {
            match TypePattern::exact(ctype) {
                Ok(pattern) => patterns.push(pattern),
                Err(source) => self.errors.push(RegistrationError::InvalidPattern {
                    pattern: ctype.to_string(),
                    source,
                }),
            }
        }
        self.register_handler_patterns(patterns, directions, role, Arc::new(handler))
    }

    /// Register a handler for arbitrary patterns.
    pub fn register_handler_patterns(
        &mut self,
        patterns: Vec<TypePattern>,
        directions: Directions,
        role: Role,
        handler: Arc<dyn TypeHandler>,
    ) -> &mut Self {
        if directions.is_empty() {
            self.errors.push(RegistrationError::EmptyDirections {
                handler: handler.name().to_string(),
            });
            return self;
        }
        self.catalog
            .register(CatalogEntry::new(patterns, directions, role, handler));
        self
    }

    // =========================================================================
    // Transformation Registration
    // =========================================================================

    /// Append a transformation. Earlier registrations take precedence.
    pub fn register_transformation<T>(&mut self, transformation: T) -> &mut Self
    where
        T: TypeTransformation + 'static,
    {
        self.register_shared_transformation(Arc::new(transformation))
    }

    /// Append an already shared transformation.
    pub fn register_shared_transformation(
        &mut self,
        transformation: Arc<dyn TypeTransformation>,
    ) -> &mut Self {
        self.transformations.register(transformation);
        self
    }

    pub fn catalog(&self) -> &HandlerCatalog {
        &self.catalog
    }

    pub fn transformations(&self) -> &TransformationRegistry {
        &self.transformations
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Validate the registrations and freeze them.
    ///
    /// # Errors
    ///
    /// Returns every registration error collected so far, plus transformation
    /// validation failures and (in strict mode) shadowed patterns.
    pub fn build(self) -> Result<TypeRegistry, Vec<RegistrationError>> {
        let mut errors = self.errors;

        for transformation in self.transformations.iter() {
            if let Err(e) = transformation.validate() {
                errors.push(e);
            }
        }

        if self.strict_shadowing {
            errors.extend(Self::shadowing_errors(&self.catalog));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        debug!(
            handlers = self.catalog.len(),
            transformations = self.transformations.len(),
            "type registry built"
        );

        Ok(TypeRegistry {
            catalog: self.catalog,
            transformations: self.transformations,
        })
    }

    fn shadowing_errors(catalog: &HandlerCatalog) -> Vec<RegistrationError> {
        let mut literals: Vec<&str> = catalog.literal_patterns().collect();
        literals.sort_unstable();

        let mut errors = Vec::new();
        for pattern in literals {
            let entries: Vec<&CatalogEntry> = catalog.exact_entries(pattern).collect();
            for (i, later) in entries.iter().enumerate() {
                let shadowed_by = entries[..i].iter().find(|earlier| {
                    earlier.role() == later.role()
                        && earlier.directions().intersects(later.directions())
                });
                if let Some(existing) = shadowed_by {
                    errors.push(RegistrationError::AmbiguousRegistration {
                        pattern: pattern.to_string(),
                        existing: existing.handler().name().to_string(),
                        role: later.role(),
                    });
                }
            }
        }
        errors
    }
}

/// Immutable handler catalog and transformation list.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    catalog: HandlerCatalog,
    transformations: TransformationRegistry,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    pub fn catalog(&self) -> &HandlerCatalog {
        &self.catalog
    }

    pub fn transformations(&self) -> &TransformationRegistry {
        &self.transformations
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find the handler for a type, slot name, direction and role.
    pub fn find_handler(
        &self,
        ctype: &str,
        name: &str,
        direction: Direction,
        role: Role,
    ) -> Result<Handler, BindError> {
        self.lookup(role, HandlerSpec::parameter(ctype, name, direction))
    }

    /// Find a parameter handler.
    pub fn param(
        &self,
        ctype: &str,
        name: &str,
        direction: Direction,
    ) -> Result<Handler, BindError> {
        self.find_handler(ctype, name, direction, Role::Parameter)
    }

    /// Find a return-value handler.
    pub fn return_value(&self, ctype: &str) -> Result<Handler, BindError> {
        self.lookup(Role::ReturnValue, HandlerSpec::return_value(ctype))
    }

    /// Find a handler with full construction arguments.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn lookup(&self, role: Role, spec: HandlerSpec) -> Result<Handler, BindError> {
        let descriptor = typebind_parser::parse_type(&spec.ctype)?;
        let original = descriptor.to_string();

        if let Some(handler) = self.direct_match(role, &spec, &descriptor, &descriptor, None) {
            trace!(
                ctype = %original,
                handler = handler.handler_name(),
                "direct handler match"
            );
            return Ok(handler);
        }

        let (found, attempted) = self.transformations.apply_first_match_traced(&descriptor);
        if let Some(found) = found {
            let canonical = typebind_parser::parse_type(&found.canonical)?;
            let transformed = found.transformation.adjust_spec(HandlerSpec {
                ctype: canonical.to_string(),
                ..spec.clone()
            });
            let matched = self.direct_match(
                role,
                &transformed,
                &canonical,
                &descriptor,
                Some(Arc::clone(&found.transformation)),
            );
            if let Some(handler) = matched {
                debug!(
                    ctype = %original,
                    canonical = %canonical,
                    transformation = found.name(),
                    "transformed handler match"
                );
                return Ok(handler);
            }
        }

        debug!(
            ctype = %spec.ctype,
            direction = %spec.direction,
            role = %role,
            "no handler found"
        );
        Err(LookupError::new(spec.ctype, spec.direction, role)
            .with_attempted(attempted)
            .into())
    }

    /// Try the type as written, then without its leading `const`.
    fn direct_match(
        &self,
        role: Role,
        spec: &HandlerSpec,
        descriptor: &TypeDescriptor,
        original: &TypeDescriptor,
        transformation: Option<Arc<dyn TypeTransformation>>,
    ) -> Option<Handler> {
        let stripped = descriptor.is_const.then(|| descriptor.without_const());
        let (matched, entry) = std::iter::once(descriptor)
            .chain(stripped.as_ref())
            .find_map(|ty| {
                self.catalog
                    .find_first(ty, spec.direction, role)
                    .map(|entry| (ty, entry))
            })?;

        let spec = HandlerSpec {
            ctype: matched.to_string(),
            is_const: spec.is_const || descriptor.is_const,
            ..spec.clone()
        };
        Some(Handler::new(
            role,
            spec,
            matched.clone(),
            original.clone(),
            Arc::clone(entry.handler()),
            transformation,
        ))
    }
}
