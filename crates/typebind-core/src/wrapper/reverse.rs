//! Native-to-script wrapper context.

use super::{CodeBlock, Declarations, EmitCode, FormatParams};
use crate::{CodegenError, WrapperSettings};

/// Accumulated state for a wrapper that lets native code call a script callable.
///
/// Parameter handlers add build atoms turning native values into the
/// script arguments. The return-value handler (and any output parameter)
/// adds parse atoms that read the script result back into native storage.
#[derive(Debug)]
pub struct ReverseWrapper {
    settings: WrapperSettings,
    /// Declared temporaries.
    pub declarations: Declarations,
    /// Atoms that build the script arguments from native values.
    pub build_params: FormatParams,
    /// Atoms that parse the script result into native values.
    pub parse_params: FormatParams,
    /// Statements run before calling into script code.
    pub before_call: CodeBlock,
    /// Statements run after the script call returns.
    pub after_call: CodeBlock,
    return_value: Option<String>,
}

impl ReverseWrapper {
    /// Create an empty context. The receiver name is reserved.
    pub fn new(settings: WrapperSettings) -> Self {
        let mut declarations = Declarations::new();
        declarations.reserve_name(settings.self_name());
        Self {
            settings,
            declarations,
            build_params: FormatParams::new(),
            parse_params: FormatParams::new(),
            before_call: CodeBlock::new(),
            after_call: CodeBlock::new(),
            return_value: None,
        }
    }

    pub fn settings(&self) -> &WrapperSettings {
        &self.settings
    }

    /// Shorthand for the configured error-return statement.
    pub fn error_return(&self) -> &str {
        self.settings.error_return()
    }

    /// Record the native expression the wrapper returns.
    pub fn set_return_value(&mut self, expr: impl Into<String>) {
        self.return_value = Some(expr.into());
    }

    /// Native expression returned to the caller, if the return type is non-void.
    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }

    /// Run every parameter handler in order, then the return-value handler.
    ///
    /// Stops at the first handler that cannot emit code.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate<R, P>(&mut self, return_value: &R, params: &[P]) -> Result<(), CodegenError>
    where
        R: EmitCode + ?Sized,
        P: EmitCode,
    {
        for param in params {
            param.emit_reverse(self)?;
        }
        return_value.emit_reverse(self)
    }
}

impl Default for ReverseWrapper {
    fn default() -> Self {
        Self::new(WrapperSettings::default())
    }
}
