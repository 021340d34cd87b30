//! Wrapper generation contexts.
//!
//! A wrapper context collects everything the handlers of a single wrapper
//! function contribute: declared temporaries, format atoms with their
//! argument references, call arguments and before/after-call code. Two
//! variants exist:
//!
//! - [`ForwardWrapper`]: script code calls into native code. Parameters parse
//!   script values into native temporaries; the return value is built back
//!   into a script value.
//! - [`ReverseWrapper`]: native code calls into script code. Parameters are
//!   built into script values; the script result is parsed back into the
//!   native return value.
//!
//! Rendering the accumulated state into source text is left to the caller.

mod code_block;
mod declarations;
mod forward;
mod params;
mod reverse;

pub use code_block::CodeBlock;
pub use declarations::{Declaration, Declarations};
pub use forward::ForwardWrapper;
pub use params::{FormatFragment, FormatParams};
pub use reverse::ReverseWrapper;

use crate::CodegenError;

/// Something that can contribute code to a wrapper.
///
/// Implemented by matched handler instances. Each call may only touch the
/// shared accumulators of the wrapper it is given.
pub trait EmitCode {
    /// Contribute to a script-to-native wrapper.
    fn emit_forward(&self, wrapper: &mut ForwardWrapper) -> Result<(), CodegenError>;

    /// Contribute to a native-to-script wrapper.
    fn emit_reverse(&self, wrapper: &mut ReverseWrapper) -> Result<(), CodegenError>;
}

impl<T: EmitCode + ?Sized> EmitCode for &T {
    fn emit_forward(&self, wrapper: &mut ForwardWrapper) -> Result<(), CodegenError> {
        (**self).emit_forward(wrapper)
    }

    fn emit_reverse(&self, wrapper: &mut ReverseWrapper) -> Result<(), CodegenError> {
        (**self).emit_reverse(wrapper)
    }
}
