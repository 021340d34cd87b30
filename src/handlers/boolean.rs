//! `bool` handlers.
//!
//! Script truthiness is broader than a native bool, so forward wrappers
//! take any object and test it with `PyObject_IsTrue`.

use typebind_core::{CodegenError, Direction, ForwardWrapper, ReverseWrapper};
use typebind_registry::{Handler, TypeHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolParam;

impl TypeHandler for BoolParam {
    fn name(&self) -> &str {
        "BoolParam"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        if handler.direction() != Direction::In {
            return Err(handler.unsupported_direction());
        }

        // An omitted argument leaves the object NULL.
        let init = handler.default_value().map(|_| "NULL");
        let py_name = format!("py_{}", handler.name());
        let py_name = wrapper
            .declarations
            .declare_variable("PyObject *", &py_name, init);

        let args = [format!("&{py_name}")];
        let keyword = Some(handler.name());
        let truth = format!("(bool) PyObject_IsTrue({py_name})");
        let params = &mut wrapper.parse_params;
        let value = match handler.default_value() {
            Some(default) => {
                params.add_optional_parameter("O", args, keyword);
                format!("({py_name} ? {truth} : {default})")
            }
            None => {
                params.add_parameter("O", args, keyword);
                truth
            }
        };

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
        wrapper
            .build_params
            .add_parameter("N", [format!("PyBool_FromLong({value})")], None);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolReturn;

impl TypeHandler for BoolReturn {
    fn name(&self) -> &str {
        "BoolReturn"
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
        wrapper
            .build_params
            .prepend_parameter("N", [format!("PyBool_FromLong({value})")]);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        let name = format!("py_{}", wrapper.settings().retval_name());
        let py_retval = wrapper
            .declarations
            .declare_variable("PyObject *", &name, None);
        wrapper
            .parse_params
            .prepend_parameter("O", [format!("&{py_retval}")]);

        let value = format!("(bool) PyObject_IsTrue({py_retval})");
        let value =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.after_call, &value);
        wrapper.set_return_value(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebind_core::Role;
    use typebind_registry::HandlerSpec;

    use crate::default_registry;

    #[test]
    fn forward_bool_tests_truthiness() {
        let registry = default_registry().build().unwrap();
        let flag = registry.param("bool", "flag", Direction::In).unwrap();
        let retval = registry.return_value("bool").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&retval, &[flag]).unwrap();

        let decl = wrapper.declarations.get("py_flag").unwrap();
        assert_eq!(decl.ctype, "PyObject *");
        assert_eq!(wrapper.parse_params.format(), "O");
        assert_eq!(wrapper.keywords(), ["flag"]);
        assert_eq!(wrapper.call_params, ["(bool) PyObject_IsTrue(py_flag)"]);
        assert_eq!(
            wrapper.build_params.args().collect::<Vec<_>>(),
            ["PyBool_FromLong(retval)"]
        );
    }

    #[test]
    fn optional_bool_falls_back_to_default() {
        let registry = default_registry().build().unwrap();
        let spec = HandlerSpec::parameter("bool", "verbose", Direction::In);
        let spec = spec.with_default_value("false");
        let verbose = registry.lookup(Role::Parameter, spec).unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[verbose]).unwrap();

        assert_eq!(wrapper.parse_params.format(), "|O");
        assert_eq!(
            wrapper.call_params,
            ["(py_verbose ? (bool) PyObject_IsTrue(py_verbose) : false)"]
        );
    }

    #[test]
    fn reverse_bool_return() {
        let registry = default_registry().build().unwrap();
        let retval = registry.return_value("bool").unwrap();
        let no_params: [Handler; 0] = [];

        let mut wrapper = ReverseWrapper::default();
        wrapper.generate(&retval, &no_params).unwrap();

        assert_eq!(wrapper.parse_params.format(), "O");
        assert_eq!(
            wrapper.return_value(),
            Some("(bool) PyObject_IsTrue(py_retval)")
        );
    }
}
