//! Handlers: the code that converts one native type across the boundary.
//!
//! A [`TypeHandler`] is registered once and holds no per-slot state. Each
//! successful lookup pairs it with the slot's [`HandlerSpec`] (type, name,
//! direction, ...) into a [`Handler`] instance, which is what wrapper
//! contexts drive.

use std::fmt;
use std::sync::Arc;

use typebind_core::{
    CodeBlock, CodegenError, Declarations, Direction, EmitCode, ForwardWrapper, ReverseWrapper,
    Role, TypeDescriptor,
};

use crate::TypeTransformation;

/// Conversion logic for one family of native types.
///
/// Implementations read everything slot-specific from the [`Handler`] they
/// are given and only write to the shared accumulators of the wrapper.
pub trait TypeHandler: Send + Sync {
    /// Name identifying this handler in diagnostics and lookups.
    fn name(&self) -> &str;

    /// Emit code for a script-to-native wrapper.
    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError>;

    /// Emit code for a native-to-script wrapper.
    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError>;
}

/// Construction arguments for one parameter or return-value slot.
///
/// ```
/// use typebind_core::Direction;
/// use typebind_registry::HandlerSpec;
///
/// let spec = HandlerSpec::parameter("int *", "count", Direction::Out)
///     .with_default_value("0");
/// assert_eq!(spec.direction, Direction::Out);
/// assert_eq!(spec.default_value.as_deref(), Some("0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSpec {
    /// Native type string as written by the caller.
    pub ctype: String,
    /// Slot name, used for variables and keyword names.
    pub name: String,
    pub direction: Direction,
    /// Whether the slot is const-qualified.
    pub is_const: bool,
    /// Native expression used when the script side omits the argument.
    pub default_value: Option<String>,
    /// Whether ownership of the value moves across the call.
    pub transfer_ownership: bool,
}

impl HandlerSpec {
    pub fn new(ctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ctype: ctype.into(),
            name: name.into(),
            direction: Direction::In,
            is_const: false,
            default_value: None,
            transfer_ownership: false,
        }
    }

    /// Spec for a parameter slot.
    pub fn parameter(
        ctype: impl Into<String>,
        name: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self::new(ctype, name).with_direction(direction)
    }

    /// Spec for a return-value slot.
    ///
    /// Return values carry data out of the native call, so their direction is `Out`.
    pub fn return_value(ctype: impl Into<String>) -> Self {
        Self::new(ctype, "retval").with_direction(Direction::Out)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_transfer_ownership(mut self, transfer: bool) -> Self {
        self.transfer_ownership = transfer;
        self
    }
}

/// A handler matched to one slot of one wrapper.
///
/// Created per lookup and discarded once code has been emitted.
#[derive(Clone)]
pub struct Handler {
    role: Role,
    spec: HandlerSpec,
    descriptor: TypeDescriptor,
    original: TypeDescriptor,
    original_ctype: String,
    storage_ctype: String,
    kind: Arc<dyn TypeHandler>,
    transformation: Option<Arc<dyn TypeTransformation>>,
}

impl Handler {
    pub(crate) fn new(
        role: Role,
        spec: HandlerSpec,
        descriptor: TypeDescriptor,
        original: TypeDescriptor,
        kind: Arc<dyn TypeHandler>,
        transformation: Option<Arc<dyn TypeTransformation>>,
    ) -> Self {
        // A declared temporary cannot be a reference or const.
        let storage_ctype = if transformation.is_some() {
            original.without_const().with_reference(false).to_string()
        } else {
            spec.ctype.clone()
        };
        Self {
            role,
            spec,
            descriptor,
            original_ctype: original.to_string(),
            original,
            storage_ctype,
            kind,
            transformation,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Canonical type the handler works with (after any transformation).
    pub fn ctype(&self) -> &str {
        &self.spec.ctype
    }

    /// Parsed form of [`ctype`](Self::ctype).
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Normalized type string the lookup started from.
    pub fn original_ctype(&self) -> &str {
        &self.original_ctype
    }

    /// Parsed form of [`original_ctype`](Self::original_ctype).
    pub fn original_descriptor(&self) -> &TypeDescriptor {
        &self.original
    }

    /// Type to declare a temporary holding the value on the native side.
    ///
    /// When a transformation applied this is the original type with its
    /// references and leading `const` removed, so `const Ptr<Node> &`
    /// is stored as `Ptr<Node>`.
    pub fn storage_ctype(&self) -> &str {
        &self.storage_ctype
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn direction(&self) -> Direction {
        self.spec.direction
    }

    pub fn is_const(&self) -> bool {
        self.spec.is_const
    }

    pub fn default_value(&self) -> Option<&str> {
        self.spec.default_value.as_deref()
    }

    pub fn transfer_ownership(&self) -> bool {
        self.spec.transfer_ownership
    }

    pub fn spec(&self) -> &HandlerSpec {
        &self.spec
    }

    /// Name of the registered handler this instance came from.
    pub fn handler_name(&self) -> &str {
        self.kind.name()
    }

    /// Whether the handler was reached through a transformation.
    pub fn was_transformed(&self) -> bool {
        self.transformation.is_some()
    }

    /// The transformation that produced [`ctype`](Self::ctype), if any.
    pub fn transformation(&self) -> Option<&dyn TypeTransformation> {
        self.transformation.as_deref()
    }

    /// Convert a canonical-typed expression back to the original type.
    ///
    /// Identity when no transformation applied.
    pub fn transformed_value(
        &self,
        declarations: &mut Declarations,
        code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        match &self.transformation {
            Some(transformation) => transformation.transform(self, declarations, code, expr),
            None => expr.to_string(),
        }
    }

    /// Convert an original-typed expression to the canonical type.
    ///
    /// Identity when no transformation applied.
    pub fn untransformed_value(
        &self,
        declarations: &mut Declarations,
        code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        match &self.transformation {
            Some(transformation) => transformation.untransform(self, declarations, code, expr),
            None => expr.to_string(),
        }
    }

    /// Error for a direction this handler cannot emit.
    pub fn unsupported_direction(&self) -> CodegenError {
        CodegenError::UnsupportedDirection {
            ctype: self.spec.ctype.clone(),
            direction: self.spec.direction,
        }
    }

    /// Error for a wrapper kind this handler cannot take part in.
    pub fn unsupported_wrapper(&self, wrapper: &'static str) -> CodegenError {
        CodegenError::UnsupportedWrapper {
            ctype: self.spec.ctype.clone(),
            wrapper,
        }
    }
}

impl EmitCode for Handler {
    fn emit_forward(&self, wrapper: &mut ForwardWrapper) -> Result<(), CodegenError> {
        self.kind.emit_forward(self, wrapper)
    }

    fn emit_reverse(&self, wrapper: &mut ReverseWrapper) -> Result<(), CodegenError> {
        self.kind.emit_reverse(self, wrapper)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("handler", &self.kind.name())
            .field("role", &self.role)
            .field("spec", &self.spec)
            .field("original_ctype", &self.original_ctype)
            .field(
                "transformation",
                &self.transformation.as_ref().map(|t| t.name()),
            )
            .finish()
    }
}
