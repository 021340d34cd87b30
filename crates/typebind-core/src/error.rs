//! Error types for type lookup and wrapper generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BindError (top-level wrapper)
//! ├── ParseError        - Malformed type string
//! ├── LookupError       - No handler after direct and transformed attempts
//! └── CodegenError      - A handler cannot emit code for this wrapper
//!
//! RegistrationError     - Reported by the registry builder, never at lookup
//! ```
//!
//! None of these are retried: type matching is deterministic, so the caller
//! decides whether a failed binding skips one declaration or aborts the run.

use thiserror::Error;

use crate::{Direction, Role};

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of type string parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// An identifier was expected.
    ExpectedIdentifier,
    /// A character outside the type grammar.
    UnexpectedChar,
    /// A token that cannot appear at this position.
    UnexpectedToken,
    /// Input ended before the type was complete.
    UnexpectedEof,
    /// `<` without a matching `>`, or a stray `>`.
    UnbalancedTemplate,
    /// A template argument that is itself a template.
    NestedTemplate,
    /// More than one template argument.
    MultipleTemplateArgs,
    /// A qualifier token the grammar does not recognize, or one in the wrong place.
    InvalidQualifier,
}

impl ParseErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::UnexpectedChar => "unexpected character",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::UnbalancedTemplate => "unbalanced template brackets",
            ParseErrorKind::NestedTemplate => "nested template argument",
            ParseErrorKind::MultipleTemplateArgs => "multiple template arguments",
            ParseErrorKind::InvalidQualifier => "invalid qualifier",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A type string parse error with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at column {column}: {message}")]
pub struct ParseError {
    /// The category of this error.
    pub kind: ParseErrorKind,
    /// Column in the type string (1-indexed).
    pub column: u32,
    /// A detailed error message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, column: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            column,
            message: message.into(),
        }
    }

    /// Create an "expected identifier" error.
    pub fn expected_identifier(column: u32, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedIdentifier,
            column,
            format!("expected identifier, found {found}"),
        )
    }

    /// Create an "unexpected character" error.
    pub fn unexpected_char(column: u32, ch: char) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedChar,
            column,
            format!("'{ch}' is not part of the type grammar"),
        )
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(column: u32, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            column,
            format!("unexpected token: {token}"),
        )
    }

    /// Create an "unexpected end of input" error.
    pub fn unexpected_eof(column: u32) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            column,
            "type string ended early",
        )
    }

    /// Create an "invalid qualifier" error.
    pub fn invalid_qualifier(column: u32, detail: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidQualifier, column, detail)
    }
}

// ============================================================================
// Lookup Errors
// ============================================================================

/// No handler accepts a type, even after transformation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "no {role} handler for '{ctype}' (direction {direction}){}",
    describe_attempted(.attempted)
)]
pub struct LookupError {
    /// The type string as the caller wrote it.
    pub ctype: String,
    /// The requested direction.
    pub direction: Direction,
    /// The requested role.
    pub role: Role,
    /// Names of the transformations consulted, in order.
    pub attempted: Vec<String>,
}

impl LookupError {
    pub fn new(ctype: impl Into<String>, direction: Direction, role: Role) -> Self {
        Self {
            ctype: ctype.into(),
            direction,
            role,
            attempted: Vec::new(),
        }
    }

    pub fn with_attempted(mut self, attempted: Vec<String>) -> Self {
        self.attempted = attempted;
        self
    }
}

fn describe_attempted(attempted: &[String]) -> String {
    if attempted.is_empty() {
        String::new()
    } else {
        format!("; transformations tried: {}", attempted.join(", "))
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors reported while building a type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A literal handler pattern is not a valid type string.
    #[error("invalid handler pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ParseError,
    },

    /// A literal pattern shadows an earlier registration.
    #[error("'{pattern}' is already handled by {existing} for the same {role} directions")]
    AmbiguousRegistration {
        /// Canonical pattern text.
        pattern: String,
        /// The handler registered first.
        existing: String,
        /// The role both registrations share.
        role: Role,
    },

    /// A handler was registered without any supported direction.
    #[error("handler '{handler}' supports no directions")]
    EmptyDirections { handler: String },

    /// A typedef alias resolves to another alias.
    #[error("alias '{alias}' targets '{target}', which is itself an alias")]
    AliasChain { alias: String, target: String },

    /// A transformation's own configuration is unusable.
    #[error("transformation '{name}' is misconfigured: {reason}")]
    InvalidTransformation { name: String, reason: String },
}

// ============================================================================
// Codegen Errors
// ============================================================================

/// A matched handler cannot emit code for the requested wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The handler was instantiated with a direction it cannot emit.
    #[error("'{ctype}' does not support direction {direction}")]
    UnsupportedDirection { ctype: String, direction: Direction },

    /// The handler has no conversion for this kind of wrapper.
    #[error("'{ctype}' cannot be used in a {wrapper} wrapper")]
    UnsupportedWrapper {
        ctype: String,
        wrapper: &'static str,
    },
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error for a single binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl BindError {
    /// Whether this is a lookup failure (as opposed to a malformed type).
    pub fn is_lookup(&self) -> bool {
        matches!(self, BindError::Lookup(_))
    }

    /// Whether this is a parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, BindError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::unexpected_char(4, '$');
        assert_eq!(
            err.to_string(),
            "unexpected character at column 4: '$' is not part of the type grammar"
        );
    }

    #[test]
    fn lookup_error_lists_transformations() {
        let err = LookupError::new("Ptr<Foo>", Direction::In, Role::Parameter)
            .with_attempted(vec!["typedef-aliases".into(), "smart-pointer(Ptr)".into()]);
        assert_eq!(
            err.to_string(),
            "no parameter handler for 'Ptr<Foo>' (direction in); \
             transformations tried: typedef-aliases, smart-pointer(Ptr)"
        );
    }

    #[test]
    fn lookup_error_without_transformations() {
        let err = LookupError::new("Foo", Direction::Out, Role::ReturnValue);
        assert_eq!(
            err.to_string(),
            "no return value handler for 'Foo' (direction out)"
        );
    }

    #[test]
    fn bind_error_from_conversions() {
        let err: BindError = LookupError::new("x", Direction::In, Role::Parameter).into();
        assert!(err.is_lookup());

        let err: BindError = ParseError::unexpected_eof(1).into();
        assert!(err.is_parse());
    }
}
