//! Integration tests for forward and reverse wrapper generation.

use typebind::prelude::*;
use typebind::{CodegenError, SmartPointerTransformation};

/// `Node *` parameter that rejects `None` with an explicit check.
struct NodeParam;

impl TypeHandler for NodeParam {
    fn name(&self) -> &str {
        "NodeParam"
    }

    fn emit_forward(
        &self,
        handler: &Handler,
        wrapper: &mut ForwardWrapper,
    ) -> Result<(), CodegenError> {
        let py_name = wrapper.declarations.declare_variable(
            "PyNode *",
            &format!("py_{}", handler.name()),
            None,
        );
        wrapper
            .parse_params
            .add_parameter(
                "O!",
                ["&PyNode_Type".to_string(), format!("&{py_name}")],
                Some(handler.name()),
            );

        let error_return = wrapper.error_return().to_string();
        wrapper
            .before_call
            .write_error_check(&format!("{py_name}->obj == NULL"), &error_return);

        let value = handler.transformed_value(
            &mut wrapper.declarations,
            &mut wrapper.before_call,
            &format!("{py_name}->obj"),
        );
        wrapper.call_params.push(value);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        let native = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.before_call,
            handler.name(),
        );
        wrapper
            .build_params
            .add_parameter("N", [format!("PyNode_Wrap({native})")], None);
        Ok(())
    }
}

/// `Node *` return value, handed to the script side as a new wrapper object.
struct NodeReturn;

impl TypeHandler for NodeReturn {
    fn name(&self) -> &str {
        "NodeReturn"
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

        let native = handler.untransformed_value(
            &mut wrapper.declarations,
            &mut wrapper.after_call,
            &retval,
        );
        wrapper
            .build_params
            .prepend_parameter("N", [format!("PyNode_Wrap({native})")]);
        Ok(())
    }

    fn emit_reverse(
        &self,
        handler: &Handler,
        _wrapper: &mut ReverseWrapper,
    ) -> Result<(), CodegenError> {
        Err(handler.unsupported_wrapper("reverse"))
    }
}

fn registry() -> TypeRegistry {
    let mut builder = default_registry();
    builder
        .register_handler(&["Node *"], Directions::IN, Role::Parameter, NodeParam)
        .register_handler(&["Node *"], Directions::OUT, Role::ReturnValue, NodeReturn)
        .register_transformation(SmartPointerTransformation::new("Ptr"))
        .register_transformation(
            SmartPointerTransformation::new("Ref")
                .with_wrap("{template}<{type}>::adopt({expr})")
                .with_unwrap("{expr}.raw()"),
        );
    builder.build().unwrap()
}

fn params(registry: &TypeRegistry, slots: &[(&str, &str, Direction)]) -> Vec<Handler> {
    slots
        .iter()
        .map(|&(ctype, name, dir)| registry.param(ctype, name, dir))
        .collect::<Result<_, _>>()
        .unwrap()
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_forward_preserves_parameter_order() {
    let registry = registry();
    let params = params(
        &registry,
        &[
            ("int", "a", Direction::In),
            ("double", "b", Direction::In),
            ("const char *", "c", Direction::In),
        ],
    );
    let void = registry.return_value("void").unwrap();

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&void, &params).unwrap();

    let declared: Vec<_> = wrapper
        .declarations
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(declared, ["a", "b", "c"]);
    assert_eq!(wrapper.parse_params.format(), "ids");
    assert_eq!(
        wrapper.parse_params.args().collect::<Vec<_>>(),
        ["&a", "&b", "&c"]
    );
    assert_eq!(wrapper.keywords(), ["a", "b", "c"]);
    assert_eq!(wrapper.call_params, ["a", "b", "c"]);
    assert!(wrapper.build_params.is_empty());
    assert_eq!(wrapper.return_value(), None);
}

#[test]
fn test_reverse_preserves_parameter_order() {
    let registry = registry();
    let params = params(
        &registry,
        &[
            ("int", "a", Direction::In),
            ("bool", "b", Direction::In),
            ("std::string", "c", Direction::In),
        ],
    );
    let retval = registry.return_value("int").unwrap();

    let mut wrapper = ReverseWrapper::default();
    wrapper.generate(&retval, &params).unwrap();

    assert_eq!(wrapper.build_params.format(), "iNs#");
    assert_eq!(
        wrapper.build_params.args().collect::<Vec<_>>(),
        ["a", "PyBool_FromLong(b)", "(c).c_str()", "(c).size()"]
    );
    assert_eq!(wrapper.parse_params.format(), "i");
    assert_eq!(wrapper.return_value(), Some("retval"));
}

#[test]
fn test_mixed_directions() {
    let registry = registry();
    let params = params(
        &registry,
        &[
            ("int", "a", Direction::In),
            ("int *", "b", Direction::Out),
            ("double &", "c", Direction::InOut),
        ],
    );
    let retval = registry.return_value("bool").unwrap();

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&retval, &params).unwrap();

    assert_eq!(wrapper.parse_params.format(), "id");
    assert_eq!(wrapper.keywords(), ["a", "c"]);
    assert_eq!(wrapper.call_params, ["a", "&b", "c"]);
    assert_eq!(wrapper.build_params.format(), "Nid");
    assert_eq!(
        wrapper.build_params.args().collect::<Vec<_>>(),
        ["PyBool_FromLong(retval)", "b", "c"]
    );
}

// =============================================================================
// Naming and settings
// =============================================================================

#[test]
fn test_name_collisions_get_suffixes() {
    let registry = registry();
    let params = params(
        &registry,
        &[
            ("int", "retval", Direction::In),
            ("int", "self", Direction::In),
            ("int", "args", Direction::In),
        ],
    );
    let retval = registry.return_value("int").unwrap();

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&retval, &params).unwrap();

    assert_eq!(wrapper.call_params, ["retval", "self_2", "args_2"]);
    assert_eq!(wrapper.return_value(), Some("retval_2"));
    // Keywords keep the script-visible names.
    assert_eq!(wrapper.keywords(), ["retval", "self", "args"]);
}

#[test]
fn test_settings_shape_generated_code() {
    let registry = registry();
    let params = params(&registry, &[("Node *", "node", Direction::In)]);
    let retval = registry.return_value("int").unwrap();

    let settings = WrapperSettings::default()
        .with_error_return("return -1;")
        .with_retval_name("result")
        .with_keyword_args(false);
    let mut wrapper = ForwardWrapper::new(settings);
    wrapper.generate(&retval, &params).unwrap();

    assert_eq!(
        wrapper.before_call.lines(),
        ["if (py_node->obj == NULL) {", "    return -1;", "}"]
    );
    assert_eq!(wrapper.return_value(), Some("result"));
    assert!(wrapper.keywords().is_empty());
}

// =============================================================================
// Transformed handlers
// =============================================================================

#[test]
fn test_forward_smart_pointer_wraps_call_argument() {
    let registry = registry();
    let params = params(&registry, &[("Ptr<Node>", "node", Direction::In)]);
    let void = registry.return_value("void").unwrap();

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&void, &params).unwrap();

    assert_eq!(wrapper.parse_params.format(), "O!");
    assert_eq!(wrapper.call_params, ["Ptr<Node>(py_node->obj)"]);
}

#[test]
fn test_reverse_smart_pointer_unwraps_argument() {
    let registry = registry();
    let params = params(&registry, &[("const Ref<Node> &", "node", Direction::In)]);
    let void = registry.return_value("void").unwrap();

    let mut wrapper = ReverseWrapper::default();
    wrapper.generate(&void, &params).unwrap();

    assert_eq!(
        wrapper.build_params.args().collect::<Vec<_>>(),
        ["PyNode_Wrap(node.raw())"]
    );
}

#[test]
fn test_transformed_return_value_keeps_storage_type() {
    let registry = registry();
    let retval = registry.return_value("Ptr<Node>").unwrap();
    assert!(retval.was_transformed());
    assert!(!retval.transfer_ownership());
    let no_params: [Handler; 0] = [];

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&retval, &no_params).unwrap();

    let decl = wrapper.declarations.get("retval").unwrap();
    assert_eq!(decl.ctype, "Ptr<Node>");
    assert_eq!(
        wrapper.build_params.args().collect::<Vec<_>>(),
        ["PyNode_Wrap(retval.get())"]
    );
}

#[test]
fn test_transformed_reference_return_declares_a_value() {
    let registry = registry();
    let retval = registry.return_value("const Ptr<Node> &").unwrap();
    let no_params: [Handler; 0] = [];

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&retval, &no_params).unwrap();

    assert_eq!(retval.original_ctype(), "const Ptr<Node> &");
    let decl = wrapper.declarations.get("retval").unwrap();
    assert_eq!(decl.ctype, "Ptr<Node>");
    assert_eq!(
        wrapper.build_params.args().collect::<Vec<_>>(),
        ["PyNode_Wrap(retval.get())"]
    );
}

#[test]
fn test_rvalue_reference_smart_pointer_parameter() {
    let registry = registry();
    let params = params(&registry, &[("Ptr<Node> &&", "node", Direction::In)]);
    let void = registry.return_value("void").unwrap();

    let mut wrapper = ForwardWrapper::default();
    wrapper.generate(&void, &params).unwrap();

    assert!(params[0].was_transformed());
    assert_eq!(params[0].original_ctype(), "Ptr<Node> &&");
    assert_eq!(wrapper.call_params, ["Ptr<Node>(py_node->obj)"]);
}

#[test]
fn test_unsupported_handler_stops_generation() {
    let registry = registry();
    let params = params(&registry, &[("int", "a", Direction::In)]);
    let retval = registry.return_value("char *").unwrap();

    let mut wrapper = ReverseWrapper::default();
    let err = wrapper.generate(&retval, &params).unwrap_err();
    let CodegenError::UnsupportedWrapper { wrapper, .. } = &err else {
        panic!("expected an unsupported wrapper error, got {err:?}");
    };
    assert_eq!(*wrapper, "reverse");

    let err: BindError = err.into();
    assert!(!err.is_lookup());
}
