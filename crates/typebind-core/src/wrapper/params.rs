//! Format-string parameter lists.
//!
//! Both directions of conversion are driven by a format string made of
//! short atoms (`i`, `d`, `s#`, `O`, ...) paired with the expressions each
//! atom reads from or writes to. `FormatParams` accumulates those pairs in
//! parameter order.

/// One format atom with its argument expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFragment {
    /// Format atom, e.g. `"i"` or `"s#"`.
    pub atom: String,
    /// Expressions consumed by the atom, in order.
    pub args: Vec<String>,
    /// Keyword name, for parse lists that accept keyword arguments.
    pub keyword: Option<String>,
    /// Whether the atom follows the optional-arguments marker.
    pub optional: bool,
}

/// Ordered list of format fragments.
///
/// ```
/// use typebind_core::FormatParams;
///
/// let mut params = FormatParams::new();
/// params.add_parameter("i", ["&x"], Some("x"));
/// params.add_optional_parameter("d", ["&y"], Some("y"));
/// assert_eq!(params.format(), "i|d");
/// assert_eq!(params.args().collect::<Vec<_>>(), ["&x", "&y"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatParams {
    fragments: Vec<FormatFragment>,
}

impl FormatParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    pub fn add_parameter<I, S>(&mut self, atom: &str, args: I, keyword: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragment = Self::fragment(atom, args, keyword, false);
        self.fragments.push(fragment);
    }

    /// Append a parameter that the script side may omit.
    pub fn add_optional_parameter<I, S>(&mut self, atom: &str, args: I, keyword: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragment = Self::fragment(atom, args, keyword, true);
        self.fragments.push(fragment);
    }

    /// Insert a required parameter ahead of everything added so far.
    ///
    /// Return values use this so they lead the tuple of results even though
    /// they are emitted after the parameters.
    pub fn prepend_parameter<I, S>(&mut self, atom: &str, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragment = Self::fragment(atom, args, None, false);
        self.fragments.insert(0, fragment);
    }

    /// The full format string.
    ///
    /// A single `|` precedes the first optional atom; every atom after it is
    /// optional as far as the format string is concerned.
    pub fn format(&self) -> String {
        let mut format = String::new();
        let mut in_optional = false;
        for fragment in &self.fragments {
            if fragment.optional && !in_optional {
                format.push('|');
                in_optional = true;
            }
            format.push_str(&fragment.atom);
        }
        format
    }

    /// Every argument expression, flattened in order.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.fragments
            .iter()
            .flat_map(|f| f.args.iter().map(String::as_str))
    }

    /// Keyword names of the fragments that have one.
    pub fn keywords(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .filter_map(|f| f.keyword.as_deref())
            .collect()
    }

    pub fn fragments(&self) -> &[FormatFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn fragment<I, S>(atom: &str, args: I, keyword: Option<&str>, optional: bool) -> FormatFragment
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormatFragment {
            atom: atom.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            keyword: keyword.map(str::to_string),
            optional,
        }
    }
}
