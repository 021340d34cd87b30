//! TypeDescriptor - the structured form of a native type string.
//!
//! A descriptor is produced by the type parser and is the unit every
//! handler pattern and transformation works against. Its [`Display`]
//! implementation is the canonical rendering used as the catalog key, so
//! two spellings of the same type (`Foo*`, `Foo *`, `Foo  *`) compare equal
//! once parsed.
//!
//! # Canonical Form
//!
//! ```text
//! int                  -> "int"
//! const char*          -> "const char *"
//! MySmartPointer<Foo>  -> "MySmartPointer<Foo>"
//! Foo**&               -> "Foo **&"
//! Foo &&               -> "Foo &&"
//! ```
//!
//! Pointer and reference markers keep the order they were written in.

use std::fmt::{self, Display, Formatter};

/// One trailing `*` or `&` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indirection {
    Pointer,
    Reference,
}

impl Indirection {
    pub fn as_char(self) -> char {
        match self {
            Indirection::Pointer => '*',
            Indirection::Reference => '&',
        }
    }
}

/// A parsed native type.
///
/// Invariant: `template_arg` is only set when the type was written as a
/// single-argument template instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Base identifier, including any `::` scoping (e.g. `std::string`).
    pub base_name: String,
    /// Single template argument (`Foo` in `Ptr<Foo>`).
    pub template_arg: Option<String>,
    /// Trailing `*` and `&` markers, in source order.
    pub indirections: Vec<Indirection>,
    /// Whether the type carries a leading `const`.
    pub is_const: bool,
}

impl TypeDescriptor {
    /// Create a plain, unqualified type.
    ///
    /// # Example
    ///
    /// ```
    /// use typebind_core::TypeDescriptor;
    ///
    /// let int_type = TypeDescriptor::new("int");
    /// assert!(!int_type.is_pointer());
    /// assert_eq!(int_type.to_string(), "int");
    /// ```
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            template_arg: None,
            indirections: Vec::new(),
            is_const: false,
        }
    }

    /// Set the leading `const` qualifier.
    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// Set the pointer depth. Pointers are placed ahead of any references.
    pub fn with_pointers(mut self, depth: u32) -> Self {
        let references = self.reference_depth() as usize;
        let pointers = std::iter::repeat_n(Indirection::Pointer, depth as usize);
        self.indirections = pointers
            .chain(std::iter::repeat_n(Indirection::Reference, references))
            .collect();
        self
    }

    /// Add a trailing `&`, or remove every `&` marker.
    ///
    /// A type that already ends in `&` is left as is.
    pub fn with_reference(mut self, is_reference: bool) -> Self {
        if !is_reference {
            self.indirections.retain(|i| *i != Indirection::Reference);
        } else if self.indirections.last() != Some(&Indirection::Reference) {
            self.indirections.push(Indirection::Reference);
        }
        self
    }

    /// Append one marker.
    pub fn with_indirection(mut self, indirection: Indirection) -> Self {
        self.indirections.push(indirection);
        self
    }

    /// Set the single template argument.
    pub fn with_template_arg(mut self, arg: impl Into<String>) -> Self {
        self.template_arg = Some(arg.into());
        self
    }

    /// Number of `*` markers.
    pub fn pointer_depth(&self) -> u32 {
        self.count(Indirection::Pointer)
    }

    /// Number of `&` markers (2 for `T &&`).
    pub fn reference_depth(&self) -> u32 {
        self.count(Indirection::Reference)
    }

    /// Whether any `&` marker is present.
    #[inline]
    pub fn is_reference(&self) -> bool {
        self.indirections.contains(&Indirection::Reference)
    }

    /// Whether at least one pointer level is present.
    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.indirections.contains(&Indirection::Pointer)
    }

    /// Whether the type is a template instantiation.
    #[inline]
    pub fn is_template(&self) -> bool {
        self.template_arg.is_some()
    }

    /// The same type with the leading `const` removed.
    pub fn without_const(&self) -> Self {
        self.clone().with_const(false)
    }

    /// The type one pointer level down, with references dropped.
    ///
    /// Returns `None` for non-pointer types.
    ///
    /// ```
    /// use typebind_core::TypeDescriptor;
    ///
    /// let pp = TypeDescriptor::new("int").with_pointers(2);
    /// assert_eq!(pp.pointee().unwrap().to_string(), "int *");
    /// assert!(TypeDescriptor::new("int").pointee().is_none());
    /// ```
    pub fn pointee(&self) -> Option<Self> {
        if !self.is_pointer() {
            return None;
        }
        let mut inner = self.clone().with_reference(false);
        inner.indirections.pop();
        Some(inner)
    }

    /// The base type with every qualifier stripped, keeping the template argument.
    pub fn unqualified(&self) -> Self {
        Self {
            base_name: self.base_name.clone(),
            template_arg: self.template_arg.clone(),
            indirections: Vec::new(),
            is_const: false,
        }
    }

    /// Canonical string rendering (same as `to_string()`).
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    fn count(&self, kind: Indirection) -> u32 {
        self.indirections.iter().filter(|i| **i == kind).count() as u32
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.base_name)?;
        if let Some(arg) = &self.template_arg {
            write!(f, "<{arg}>")?;
        }
        if !self.indirections.is_empty() {
            write!(f, " ")?;
            for indirection in &self.indirections {
                write!(f, "{}", indirection.as_char())?;
            }
        }
        Ok(())
    }
}
