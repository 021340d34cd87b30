//! Numeric and character handlers.

use typebind_core::{CodegenError, Direction, ForwardWrapper, ReverseWrapper};
use typebind_registry::{Handler, TypeHandler};

/// Scalar passed by value.
///
/// Accepts a default value, which makes the script argument optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarParam {
    atom: &'static str,
}

impl ScalarParam {
    pub const fn new(atom: &'static str) -> Self {
        Self { atom }
    }

    pub fn atom(&self) -> &'static str {
        self.atom
    }
}

impl TypeHandler for ScalarParam {
    fn name(&self) -> &str {
        "ScalarParam"
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
            handler.ctype(),
            handler.name(),
            handler.default_value(),
        );
        let args = [format!("&{name}")];
        let keyword = Some(handler.name());
        let params = &mut wrapper.parse_params;
        if handler.default_value().is_some() {
            params.add_optional_parameter(self.atom, args, keyword);
        } else {
            params.add_parameter(self.atom, args, keyword);
        }

        let value =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.before_call, &name);
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
        wrapper.build_params.add_parameter(self.atom, [value], None);
        Ok(())
    }
}

/// Scalar passed through `T *` or `T &`, in any direction.
///
/// Inputs are parsed into a local, outputs are built from it after the
/// call, and the native function receives the local's address (or the
/// local itself, for references).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarPtrParam {
    atom: &'static str,
}

impl ScalarPtrParam {
    pub const fn new(atom: &'static str) -> Self {
        Self { atom }
    }
}

impl TypeHandler for ScalarPtrParam {
    fn name(&self) -> &str {
        "ScalarPtrParam"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        let descriptor = handler.descriptor();
        let direction = handler.direction();

        let name = wrapper.declarations.declare_variable(
            descriptor.unqualified().to_string(),
            handler.name(),
            handler.default_value(),
        );
        if direction.is_input() {
            let args = [format!("&{name}")];
            let keyword = Some(handler.name());
            let params = &mut wrapper.parse_params;
            if handler.default_value().is_some() {
                params.add_optional_parameter(self.atom, args, keyword);
            } else {
                params.add_parameter(self.atom, args, keyword);
            }
        }
        if direction.is_output() {
            wrapper
                .build_params
                .add_parameter(self.atom, [name.as_str()], None);
        }

        let arg = if descriptor.is_reference() {
            name
        } else {
            format!("&{name}")
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
        let direction = handler.direction();
        let native = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.before_call,
            handler.name(),
        );

        let (value, address) = if handler.descriptor().is_reference() {
            (native.clone(), format!("&{native}"))
        } else {
            (format!("*{native}"), native)
        };
        if direction.is_input() {
            wrapper.build_params.add_parameter(self.atom, [value], None);
        }
        if direction.is_output() {
            wrapper
                .parse_params
                .add_parameter(self.atom, [address], None);
        }
        Ok(())
    }
}

/// Scalar return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarReturn {
    atom: &'static str,
}

impl ScalarReturn {
    pub const fn new(atom: &'static str) -> Self {
        Self { atom }
    }
}

impl TypeHandler for ScalarReturn {
    fn name(&self) -> &str {
        "ScalarReturn"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        if !handler.direction().is_output() {
            return Err(handler.unsupported_direction());
        }

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
        wrapper.build_params.prepend_parameter(self.atom, [value]);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        if !handler.direction().is_output() {
            return Err(handler.unsupported_direction());
        }

        let retval_name = wrapper.settings().retval_name().to_string();
        let retval = wrapper
            .declarations
            .declare_variable(handler.ctype(), &retval_name, None);
        wrapper
            .parse_params
            .prepend_parameter(self.atom, [format!("&{retval}")]);

        let value =
            handler.transformed_value(&mut wrapper.declarations, &mut wrapper.after_call, &retval);
        wrapper.set_return_value(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebind_core::EmitCode;
    use typebind_registry::{HandlerSpec, TypeRegistry};

    use crate::default_registry;

    fn registry() -> TypeRegistry {
        default_registry().build().unwrap()
    }

    #[test]
    fn forward_by_value() {
        let registry = registry();
        let x = registry.param("int", "x", Direction::In).unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[x]).unwrap();

        let decl = wrapper.declarations.get("x").unwrap();
        assert_eq!(decl.ctype, "int");
        assert_eq!(wrapper.parse_params.format(), "i");
        assert_eq!(wrapper.parse_params.args().collect::<Vec<_>>(), ["&x"]);
        assert_eq!(wrapper.call_params, ["x"]);
        assert_eq!(wrapper.keywords(), ["x"]);
    }

    #[test]
    fn default_value_makes_argument_optional() {
        let registry = registry();
        let a = registry.param("int", "a", Direction::In).unwrap();
        let b = registry
            .lookup(
                typebind_core::Role::Parameter,
                HandlerSpec::parameter("double", "b", Direction::In).with_default_value("1.5"),
            )
            .unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[a, b]).unwrap();

        assert_eq!(wrapper.parse_params.format(), "i|d");
        let decl = wrapper.declarations.get("b").unwrap();
        assert_eq!(decl.initializer.as_deref(), Some("1.5"));
    }

    #[test]
    fn out_pointer_is_built_after_the_call() {
        let registry = registry();
        let count = registry.param("int*", "count", Direction::Out).unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[count]).unwrap();

        assert_eq!(wrapper.declarations.get("count").unwrap().ctype, "int");
        assert!(wrapper.parse_params.is_empty());
        assert_eq!(wrapper.build_params.format(), "i");
        assert_eq!(wrapper.build_params.args().collect::<Vec<_>>(), ["count"]);
        assert_eq!(wrapper.call_params, ["&count"]);
    }

    #[test]
    fn inout_reference() {
        let registry = registry();
        let value = registry
            .param("double &", "value", Direction::InOut)
            .unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[value]).unwrap();

        assert_eq!(wrapper.parse_params.args().collect::<Vec<_>>(), ["&value"]);
        assert_eq!(wrapper.build_params.args().collect::<Vec<_>>(), ["value"]);
        assert_eq!(wrapper.call_params, ["value"]);
    }

    #[test]
    fn inout_default_value_makes_argument_optional() {
        let registry = registry();
        let n = registry.param("int", "n", Direction::In).unwrap();
        let value = registry
            .lookup(
                typebind_core::Role::Parameter,
                HandlerSpec::parameter("double &", "value", Direction::InOut)
                    .with_default_value("0.0"),
            )
            .unwrap();
        let void = registry.return_value("void").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&void, &[n, value]).unwrap();

        assert_eq!(wrapper.parse_params.format(), "i|d");
        let decl = wrapper.declarations.get("value").unwrap();
        assert_eq!(decl.initializer.as_deref(), Some("0.0"));
        assert_eq!(wrapper.build_params.format(), "d");
    }

    #[test]
    fn return_value_leads_the_result_tuple() {
        let registry = registry();
        let count = registry.param("int *", "count", Direction::Out).unwrap();
        let retval = registry.return_value("double").unwrap();

        let mut wrapper = ForwardWrapper::default();
        wrapper.generate(&retval, &[count]).unwrap();

        assert_eq!(wrapper.return_value(), Some("retval"));
        assert_eq!(wrapper.build_params.format(), "di");
        assert_eq!(
            wrapper.build_params.args().collect::<Vec<_>>(),
            ["retval", "count"]
        );
    }

    #[test]
    fn reverse_wrapper_parses_outputs() {
        let registry = registry();
        let x = registry.param("const int", "x", Direction::In).unwrap();
        let out = registry.param("float *", "out", Direction::Out).unwrap();
        let retval = registry.return_value("long").unwrap();

        let mut wrapper = ReverseWrapper::default();
        wrapper.generate(&retval, &[x, out]).unwrap();

        assert_eq!(wrapper.build_params.format(), "i");
        assert_eq!(wrapper.build_params.args().collect::<Vec<_>>(), ["x"]);
        assert_eq!(wrapper.parse_params.format(), "Lf");
        assert_eq!(
            wrapper.parse_params.args().collect::<Vec<_>>(),
            ["&retval", "out"]
        );
        assert_eq!(wrapper.return_value(), Some("retval"));
    }

    #[test]
    fn by_value_rejects_output_direction() {
        let registry = registry();
        let mut builder = TypeRegistry::builder();
        builder.register_handler(
            &["int"],
            typebind_core::Directions::all(),
            typebind_core::Role::Parameter,
            ScalarParam::new("i"),
        );
        let permissive = builder.build().unwrap();
        let handler = permissive.param("int", "x", Direction::Out).unwrap();

        let mut wrapper = ForwardWrapper::default();
        let err = handler.emit_forward(&mut wrapper).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedDirection { .. }));

        // The built-in catalog never hands out that combination.
        assert!(registry.param("int", "x", Direction::Out).is_err());
    }
}
