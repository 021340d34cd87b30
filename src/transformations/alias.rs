//! Typedef alias transformation.

use rustc_hash::FxHashMap;

use typebind_core::{RegistrationError, TypeDescriptor};
use typebind_registry::TypeTransformation;

/// Resolves typedef names to the base type they stand for.
///
/// Only the base name is replaced, so `const size_type *` with
/// `size_type -> uint64_t` becomes `const uint64_t *`. Values need no
/// conversion. Aliases must point at a non-alias; a chain is rejected
/// when the registry is built.
#[derive(Debug, Clone, Default)]
pub struct TypeAliasTransformation {
    aliases: FxHashMap<String, String>,
}

impl TypeAliasTransformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias. A later alias for the same name replaces the earlier one.
    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl TypeTransformation for TypeAliasTransformation {
    fn name(&self) -> &str {
        "typedef-aliases"
    }

    fn untransformed_name(&self, ty: &TypeDescriptor) -> Option<String> {
        let target = self.resolve(&ty.base_name)?;
        let mut resolved = ty.clone();
        resolved.base_name = target.to_string();
        Some(resolved.to_string())
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        let mut aliases: Vec<_> = self.aliases.iter().collect();
        aliases.sort_unstable();

        match aliases
            .into_iter()
            .find(|(_, target)| self.aliases.contains_key(target.as_str()))
        {
            Some((alias, target)) => Err(RegistrationError::AliasChain {
                alias: alias.clone(),
                target: target.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebind_parser::parse_type;

    fn aliases() -> TypeAliasTransformation {
        TypeAliasTransformation::new()
            .alias("size_type", "uint64_t")
            .alias("Handle", "Node")
    }

    #[test]
    fn keeps_qualifiers() {
        let t = aliases();
        let ty = parse_type("const size_type *").unwrap();
        assert_eq!(
            t.untransformed_name(&ty).as_deref(),
            Some("const uint64_t *")
        );

        let ty = parse_type("Handle&").unwrap();
        assert_eq!(t.untransformed_name(&ty).as_deref(), Some("Node &"));
    }

    #[test]
    fn declines_unknown_names() {
        let t = aliases();
        assert_eq!(t.untransformed_name(&parse_type("int").unwrap()), None);
        assert_eq!(t.resolve("Node"), None);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn output_is_a_fixed_point() {
        let t = aliases();
        let ty = parse_type("size_type").unwrap();
        let once = t.untransformed_name(&ty).unwrap();
        assert_eq!(t.untransformed_name(&parse_type(&once).unwrap()), None);
    }

    #[test]
    fn chains_are_rejected() {
        assert!(aliases().validate().is_ok());

        let chained = aliases().alias("Index", "size_type");
        assert_eq!(
            chained.validate(),
            Err(RegistrationError::AliasChain {
                alias: "Index".into(),
                target: "size_type".into(),
            })
        );
    }
}
