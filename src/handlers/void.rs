//! `void` return handler.

use typebind_core::{CodegenError, ForwardWrapper, ReverseWrapper};
use typebind_registry::{Handler, TypeHandler};

/// `void` return. Emits nothing; the wrapper returns `None` on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidReturn;

impl TypeHandler for VoidReturn {
    fn name(&self) -> &str {
        "VoidReturn"
    }

    fn emit_forward(
        &self,
        _handler: &Handler,
        _wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        Ok(())
    }

    fn emit_reverse(
        &self,
        _handler: &Handler,
        _wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        Ok(())
    }
}
