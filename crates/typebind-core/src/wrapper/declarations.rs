//! Local variable declarations for a wrapper body.

use rustc_hash::FxHashSet;

/// A single declared temporary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Native type of the variable.
    pub ctype: String,
    /// Unique variable name.
    pub name: String,
    /// Optional initializer expression.
    pub initializer: Option<String>,
}

/// Ordered set of declared variables with unique names.
///
/// Names handed out are unique within the wrapper: asking for a name that
/// is already taken yields `name_2`, `name_3`, and so on.
///
/// ```
/// use typebind_core::Declarations;
///
/// let mut decls = Declarations::new();
/// assert_eq!(decls.declare_variable("int", "x", None), "x");
/// assert_eq!(decls.declare_variable("double", "x", Some("0.0")), "x_2");
/// assert_eq!(decls.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    declarations: Vec<Declaration>,
    used_names: FxHashSet<String>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable and return the name it was given.
    pub fn declare_variable(
        &mut self,
        ctype: impl Into<String>,
        name: &str,
        initializer: Option<&str>,
    ) -> String {
        let name = self.reserve_name(name);
        self.declarations.push(Declaration {
            ctype: ctype.into(),
            name: name.clone(),
            initializer: initializer.map(str::to_string),
        });
        name
    }

    /// Claim a unique name without declaring anything under it.
    ///
    /// Used for names that exist in the wrapper but are defined elsewhere,
    /// such as the wrapper's own arguments.
    pub fn reserve_name(&mut self, name: &str) -> String {
        let unique = self.unique_name(name);
        self.used_names.insert(unique.clone());
        unique
    }

    /// Whether a name is already in use.
    pub fn is_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Look up a declaration by its (unique) name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Declarations in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.used_names.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.used_names.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}
