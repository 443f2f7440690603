//! Registry owning parsed surfaces, keyed by signed id.
//!
//! The registry is an explicit value passed by reference into rule
//! population — there is no process-wide surface table. It must be fully
//! built before any cell is populated; cells hold `Arc` references into it
//! and a registry mutated afterwards invalidates nothing retroactively but
//! will not be seen by already-populated cells.

use crate::error::SurfaceError;
use crate::Surface;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Owns every surface of one sample description.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<i32, Arc<Surface>>,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole definition block, one surface per line.
    ///
    /// Blank lines are skipped; errors carry the 1-indexed line number.
    pub fn parse(text: &str) -> Result<Self, SurfaceError> {
        let mut registry = Self::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            registry
                .parse_line(line)
                .map_err(|e| e.at_line(index + 1))?;
        }
        debug!("parsed surface registry with {} surfaces", registry.len());
        Ok(registry)
    }

    /// Parse one definition line and insert it, returning the new id.
    pub fn parse_line(&mut self, line: &str) -> Result<i32, SurfaceError> {
        let surface = Surface::parse(line)?;
        let id = surface.id();
        self.insert(surface)?;
        Ok(id)
    }

    /// Insert an already-built surface.
    pub fn insert(&mut self, surface: Surface) -> Result<(), SurfaceError> {
        let id = surface.id();
        if self.surfaces.contains_key(&id) {
            return Err(SurfaceError::DuplicateId(id));
        }
        self.surfaces.insert(id, Arc::new(surface));
        Ok(())
    }

    /// Look up a surface by id.
    pub fn get(&self, id: i32) -> Option<&Arc<Surface>> {
        self.surfaces.get(&id)
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Registered ids, ascending.
    pub fn ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.surfaces.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
