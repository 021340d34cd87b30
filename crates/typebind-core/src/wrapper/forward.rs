//! Script-to-native wrapper context.

use super::{CodeBlock, Declarations, EmitCode, FormatParams};
use crate::{CodegenError, WrapperSettings};

/// Accumulated state for a wrapper that lets script code call a native function.
///
/// Handlers run in parameter order. A parameter handler typically declares
/// a temporary, adds a parse atom that fills it from the incoming script
/// arguments and pushes the native expression onto `call_params`. The
/// return-value handler builds the script result from the native value.
#[derive(Debug)]
pub struct ForwardWrapper {
    settings: WrapperSettings,
    /// Declared temporaries.
    pub declarations: Declarations,
    /// Atoms that extract native values from the script arguments.
    pub parse_params: FormatParams,
    /// Atoms that build the script result (return value and out parameters).
    pub build_params: FormatParams,
    /// Native call arguments, in order.
    pub call_params: Vec<String>,
    /// Statements run before the native call.
    pub before_call: CodeBlock,
    /// Statements run after the native call.
    pub after_call: CodeBlock,
    return_value: Option<String>,
}

impl ForwardWrapper {
    /// Create an empty context. The receiver and argument names are reserved.
    pub fn new(settings: WrapperSettings) -> Self {
        let mut declarations = Declarations::new();
        declarations.reserve_name(settings.self_name());
        declarations.reserve_name("args");
        declarations.reserve_name("kwargs");
        Self {
            settings,
            declarations,
            parse_params: FormatParams::new(),
            build_params: FormatParams::new(),
            call_params: Vec::new(),
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

    /// Record the variable that receives the native call's result.
    pub fn set_return_value(&mut self, name: impl Into<String>) {
        self.return_value = Some(name.into());
    }

    /// Variable receiving the native result, if the return type is non-void.
    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }

    /// Keyword names for the parse call, or none if keywords are disabled.
    pub fn keywords(&self) -> Vec<&str> {
        if self.settings.keyword_args() {
            self.parse_params.keywords()
        } else {
            Vec::new()
        }
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
            param.emit_forward(self)?;
        }
        return_value.emit_forward(self)
    }
}

impl Default for ForwardWrapper {
    fn default() -> Self {
        Self::new(WrapperSettings::default())
    }
}
