//! Straight-line code fragments with cleanup tracking.

/// A block of generated statements.
///
/// Cleanup code registered with [`add_cleanup_code`](Self::add_cleanup_code)
/// is replayed, most recent first, inside every error check written after it.
///
/// ```
/// use typebind_core::CodeBlock;
///
/// let mut block = CodeBlock::new();
/// block.add_cleanup_code("Py_DECREF(tmp);");
/// block.write_error_check("value < 0", "return NULL;");
/// assert_eq!(
///     block.lines(),
///     ["if (value < 0) {", "    Py_DECREF(tmp);", "    return NULL;", "}"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBlock {
    lines: Vec<String>,
    cleanup: Vec<String>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement.
    pub fn write_code(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a check that runs the pending cleanup and bails out on failure.
    pub fn write_error_check(&mut self, failure_condition: &str, error_return: &str) {
        self.lines.push(format!("if ({failure_condition}) {{"));
        for cleanup in self.cleanup.iter().rev() {
            self.lines.push(format!("    {cleanup}"));
        }
        self.lines.push(format!("    {error_return}"));
        self.lines.push("}".to_string());
    }

    /// Register cleanup to run if a later error check fails.
    pub fn add_cleanup_code(&mut self, line: impl Into<String>) {
        self.cleanup.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Pending cleanup statements, in registration order.
    pub fn cleanup(&self) -> &[String] {
        &self.cleanup
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
