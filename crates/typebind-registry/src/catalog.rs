//! HandlerCatalog - registered handlers and their match criteria.
//!
//! # Storage Model
//!
//! - **Entries**: every registration, in registration order. Order is the
//!   tie-break when several handlers accept a type: first registered wins.
//! - **Exact index**: canonical type string -> entry indexes, for the
//!   common case of literal patterns.
//! - **Structural list**: indexes of entries with at least one non-literal
//!   pattern; these are tested one by one.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use typebind_core::{Direction, Directions, Role, TypeDescriptor};

use crate::{TypeHandler, TypePattern};

/// One handler registration.
#[derive(Clone)]
pub struct CatalogEntry {
    patterns: Vec<TypePattern>,
    directions: Directions,
    role: Role,
    handler: Arc<dyn TypeHandler>,
}

impl CatalogEntry {
    pub fn new(
        patterns: Vec<TypePattern>,
        directions: Directions,
        role: Role,
        handler: Arc<dyn TypeHandler>,
    ) -> Self {
        Self {
            patterns,
            directions,
            role,
            handler,
        }
    }

    pub fn patterns(&self) -> &[TypePattern] {
        &self.patterns
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn handler(&self) -> &Arc<dyn TypeHandler> {
        &self.handler
    }

    /// Whether this entry accepts the type for the given direction and role.
    pub fn accepts(&self, ty: &TypeDescriptor, direction: Direction, role: Role) -> bool {
        self.role == role
            && self.directions.supports(direction)
            && self.patterns.iter().any(|p| p.accepts(ty))
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("handler", &self.handler.name())
            .field("patterns", &self.patterns)
            .field("directions", &self.directions)
            .field("role", &self.role)
            .finish()
    }
}

/// Registered handlers, searchable by canonical type.
#[derive(Debug, Default, Clone)]
pub struct HandlerCatalog {
    entries: Vec<CatalogEntry>,
    exact: FxHashMap<String, Vec<usize>>,
    structural: Vec<usize>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. No de-duplication is performed.
    pub fn register(&mut self, entry: CatalogEntry) {
        let index = self.entries.len();
        let mut has_structural = false;
        for pattern in &entry.patterns {
            match pattern.literal() {
                Some(ty) => {
                    let slots = self.exact.entry(ty.to_string()).or_default();
                    if slots.last() != Some(&index) {
                        slots.push(index);
                    }
                }
                None => has_structural = true,
            }
        }
        if has_structural {
            self.structural.push(index);
        }
        self.entries.push(entry);
    }

    /// Every entry accepting the type, direction and role, in registration order.
    pub fn find_candidates(
        &self,
        ty: &TypeDescriptor,
        direction: Direction,
        role: Role,
    ) -> Vec<&CatalogEntry> {
        let key = ty.to_string();
        let mut indexes = self.exact.get(&key).cloned().unwrap_or_default();
        indexes.extend(self.structural.iter().copied());
        indexes.sort_unstable();
        indexes.dedup();

        indexes
            .into_iter()
            .map(|i| &self.entries[i])
            .filter(|entry| entry.accepts(ty, direction, role))
            .collect()
    }

    /// The first (winning) candidate, if any.
    pub fn find_first(
        &self,
        ty: &TypeDescriptor,
        direction: Direction,
        role: Role,
    ) -> Option<&CatalogEntry> {
        self.find_candidates(ty, direction, role).into_iter().next()
    }

    /// Entries registered for an exact canonical type string.
    pub fn exact_entries(&self, canonical: &str) -> impl Iterator<Item = &CatalogEntry> {
        self.exact
            .get(canonical)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Canonical strings of every literal pattern.
    pub fn literal_patterns(&self) -> impl Iterator<Item = &str> {
        self.exact.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
