//! Smart-pointer transformation.
//!
//! Binds `Wrapper<X>` through whatever handles `X *`. Values are moved
//! between the two representations with expression templates, in which
//! `{template}`, `{type}` and `{expr}` are substituted:
//!
//! | Hook | Direction | Default |
//! |------|-----------|---------|
//! | wrap | `X *` to `Wrapper<X>` | `{template}<{type}>({expr})` |
//! | unwrap | `Wrapper<X>` to `X *` | `{expr}.get()` |

use typebind_core::{CodeBlock, Declarations, RegistrationError, TypeDescriptor};
use typebind_registry::{Handler, HandlerSpec, TypeTransformation};

const DEFAULT_WRAP: &str = "{template}<{type}>({expr})";
const DEFAULT_UNWRAP: &str = "{expr}.get()";

/// Rewrites `[const ]Template<X>[ &]` to `X *`.
///
/// ```
/// use typebind::SmartPointerTransformation;
/// use typebind::TypeTransformation;
/// use typebind::parse_type;
///
/// let ptr = SmartPointerTransformation::new("MySmartPointer");
/// let ty = parse_type("MySmartPointer<testtype>").unwrap();
/// assert_eq!(ptr.untransformed_name(&ty).as_deref(), Some("testtype *"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartPointerTransformation {
    template: String,
    name: String,
    wrap: String,
    unwrap: String,
}

impl SmartPointerTransformation {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            name: format!("smart-pointer({template})"),
            template,
            wrap: DEFAULT_WRAP.to_string(),
            unwrap: DEFAULT_UNWRAP.to_string(),
        }
    }

    /// Expression that builds the smart pointer from a raw pointer.
    pub fn with_wrap(mut self, wrap: impl Into<String>) -> Self {
        self.wrap = wrap.into();
        self
    }

    /// Expression that extracts the raw pointer from the smart pointer.
    pub fn with_unwrap(mut self, unwrap: impl Into<String>) -> Self {
        self.unwrap = unwrap.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn render(&self, pattern: &str, handler: &Handler, expr: &str) -> String {
        pattern
            .replace("{template}", &self.template)
            .replace("{type}", &handler.descriptor().base_name)
            .replace("{expr}", expr)
    }
}

impl TypeTransformation for SmartPointerTransformation {
    fn name(&self) -> &str {
        &self.name
    }

    fn untransformed_name(&self, ty: &TypeDescriptor) -> Option<String> {
        if ty.base_name != self.template || ty.is_pointer() {
            return None;
        }
        ty.template_arg.as_ref().map(|arg| format!("{arg} *"))
    }

    /// The smart pointer keeps ownership of the pointee.
    fn adjust_spec(&self, spec: HandlerSpec) -> HandlerSpec {
        spec.with_transfer_ownership(false)
    }

    fn transform(
        &self,
        handler: &Handler,
        _declarations: &mut Declarations,
        _code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        self.render(&self.wrap, handler, expr)
    }

    fn untransform(
        &self,
        handler: &Handler,
        _declarations: &mut Declarations,
        _code: &mut CodeBlock,
        expr: &str,
    ) -> String {
        self.render(&self.unwrap, handler, expr)
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        let invalid = |reason: &str| RegistrationError::InvalidTransformation {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        let bare = typebind_parser::parse_type(&self.template)
            .is_ok_and(|ty| ty == TypeDescriptor::new(self.template.as_str()));
        if !bare {
            return Err(invalid("template name must be a bare identifier"));
        }
        if !self.wrap.contains("{expr}") {
            return Err(invalid("wrap expression does not use {expr}"));
        }
        if !self.unwrap.contains("{expr}") {
            return Err(invalid("unwrap expression does not use {expr}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebind_parser::parse_type;

    fn rewrite(t: &SmartPointerTransformation, ctype: &str) -> Option<String> {
        t.untransformed_name(&parse_type(ctype).unwrap())
    }

    #[test]
    fn rewrites_value_and_reference_forms() {
        let t = SmartPointerTransformation::new("Ptr");
        assert_eq!(rewrite(&t, "Ptr<Node>").as_deref(), Some("Node *"));
        assert_eq!(rewrite(&t, "const Ptr<Node> &").as_deref(), Some("Node *"));
        assert_eq!(rewrite(&t, "Ptr< Node >").as_deref(), Some("Node *"));
    }

    #[test]
    fn declines_other_types() {
        let t = SmartPointerTransformation::new("Ptr");
        assert_eq!(rewrite(&t, "Ptr<Node> *"), None);
        assert_eq!(rewrite(&t, "Other<Node>"), None);
        assert_eq!(rewrite(&t, "Ptr"), None);
        assert_eq!(rewrite(&t, "Node *"), None);
    }

    #[test]
    fn output_is_a_fixed_point() {
        let t = SmartPointerTransformation::new("Ptr");
        for ctype in ["Ptr<Node>", "Ptr<Ptr>", "const Ptr<int> &"] {
            let once = rewrite(&t, ctype).unwrap();
            assert_eq!(rewrite(&t, &once), None, "{ctype} rewrote twice");
        }
    }

    #[test]
    fn validate_checks_templates() {
        let t = SmartPointerTransformation::new("Ptr");
        assert!(t.validate().is_ok());
        assert!(t.with_unwrap("raw_pointer").validate().is_err());

        for template in ["Ptr<int>", "", "Ptr *"] {
            let t = SmartPointerTransformation::new(template);
            assert!(t.validate().is_err(), "{template:?}");
        }
    }
}
