//! C string and `std::string` handlers.

use typebind_core::{CodegenError, Direction, ForwardWrapper, ReverseWrapper};
use typebind_registry::{Handler, TypeHandler};

/// NUL-terminated `char *` parameter. The script side keeps ownership.
#[derive(Debug, Clone, Copy, Default)]
pub struct CStringParam;

impl TypeHandler for CStringParam {
    fn name(&self) -> &str {
        "CStringParam"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        if handler.direction() != Direction::In {
            return Err(handler.unsupported_direction());
        }

        let name = wrapper.declarations.declare_variable(
            "const char *",
            handler.name(),
            handler.default_value(),
        );
        let args = [format!("&{name}")];
        let keyword = Some(handler.name());
        let params = &mut wrapper.parse_params;
        if handler.default_value().is_some() {
            params.add_optional_parameter("s", args, keyword);
        } else {
            params.add_parameter("s", args, keyword);
        }

        // Native signatures that take a mutable `char *` still only read it.
        let arg = if handler.descriptor().is_const {
            name
        } else {
            format!("(char *) {name}")
        };
        let arg =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.before_call, &arg);
        wrapper.call_params.push(arg);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        if handler.direction() != Direction::In {
            return Err(handler.unsupported_direction());
        }

        let value = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.before_call,
            handler.name(),
        );
        wrapper.build_params.add_parameter("s", [value], None);
        Ok(())
    }
}

/// `std::string` by value or const reference, passed with an explicit length.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStringParam;

impl TypeHandler for StdStringParam {
    fn name(&self) -> &str {
        "StdStringParam"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        if handler.direction() != Direction::In {
            return Err(handler.unsupported_direction());
        }

        let name = wrapper
            .declarations
            .declare_variable("const char *", handler.name(), None);
        let len = format!("{name}_len");
        let len = wrapper
            .declarations
            .declare_variable("Py_ssize_t", &len, None);
        wrapper.parse_params.add_parameter(
            "s#",
            [format!("&{name}"), format!("&{len}")],
            Some(handler.name()),
        );

        let value = format!("std::string({name}, {len})");
        let value =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.before_call, &value);
        wrapper.call_params.push(value);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        if handler.direction() != Direction::In {
            return Err(handler.unsupported_direction());
        }

        let value = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.before_call,
            handler.name(),
        );
        wrapper.build_params.add_parameter(
            "s#",
            [format!("({value}).c_str()"), format!("({value}).size()")],
            None,
        );
        Ok(())
    }
}

/// `char *` return value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CStringReturn;

impl TypeHandler for CStringReturn {
    fn name(&self) -> &str {
        "CStringReturn"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        let name = wrapper.settings().retval_name().to_string();
        let retval = wrapper
            .declarations
            .declare_variable(handler.storage_ctype(), &name, None);
        wrapper.set_return_value(retval.as_str());

        let value = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.after_call,
            &retval,
        );
        wrapper.build_params.prepend_parameter("s", [value]);
        Ok(())
    }

    /// The returned pointer borrows from the script result, so a reverse
    /// wrapper cannot hand it to native code.
    fn emit_reverse(
        &self,
        handler: &Handler,
        _wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        Err(handler.unsupported_wrapper("reverse"))
    }
}

/// `std::string` return value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStringReturn;

impl TypeHandler for StdStringReturn {
    fn name(&self) -> &str {
        "StdStringReturn"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        let name = wrapper.settings().retval_name().to_string();
        let retval = wrapper
            .declarations
            .declare_variable(handler.storage_ctype(), &name, None);
        wrapper.set_return_value(retval.as_str());

        let value = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.after_call,
            &retval,
        );
        wrapper.build_params.prepend_parameter(
            "s#",
            [format!("({value}).c_str()"), format!("({value}).size()")],
        );
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        let retval_name = wrapper.settings().retval_name().to_string();
        let retval = wrapper
            .declarations
            .declare_variable("const char *", &retval_name, None);
        let len = format!("{retval}_len");
        let len = wrapper
            .declarations
            .declare_variable("Py_ssize_t", &len, None);
        wrapper
            .parse_params
            .prepend_parameter("s#", [format!("&{retval}"), format!("&{len}")]);

        let value = format!("std::string({retval}, {len})");
        let value =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.after_call, &value);
        wrapper.set_return_value(value);
        Ok(())
    }
}
