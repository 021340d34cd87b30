//! Wrapper generation settings.

/// Knobs that shape the code a wrapper context emits.
///
/// ```
/// use typebind_core::WrapperSettings;
///
/// let settings = WrapperSettings::default()
///     .with_error_return("return -1;")
///     .with_keyword_args(false);
/// assert_eq!(settings.error_return(), "return -1;");
/// assert_eq!(settings.retval_name(), "retval");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperSettings {
    error_return: String,
    retval_name: String,
    keyword_args: bool,
    self_name: String,
}

impl Default for WrapperSettings {
    fn default() -> Self {
        Self {
            error_return: "return NULL;".to_string(),
            retval_name: "retval".to_string(),
            keyword_args: true,
            self_name: "self".to_string(),
        }
    }
}

impl WrapperSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement emitted when a conversion check fails.
    pub fn with_error_return(mut self, error_return: impl Into<String>) -> Self {
        self.error_return = error_return.into();
        self
    }

    /// Preferred name for the variable holding the return value.
    pub fn with_retval_name(mut self, name: impl Into<String>) -> Self {
        self.retval_name = name.into();
        self
    }

    /// Whether forward parse parameters record keyword names.
    pub fn with_keyword_args(mut self, keyword_args: bool) -> Self {
        self.keyword_args = keyword_args;
        self
    }

    /// Name reserved for the receiver object in method wrappers.
    pub fn with_self_name(mut self, name: impl Into<String>) -> Self {
        self.self_name = name.into();
        self
    }

    pub fn error_return(&self) -> &str {
        &self.error_return
    }

    pub fn retval_name(&self) -> &str {
        &self.retval_name
    }

    pub fn keyword_args(&self) -> bool {
        self.keyword_args
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }
}
