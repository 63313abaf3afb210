//! Compilation context: the state shared by one compilation run.
//!
//! A `CompilationContext` owns the [`CompiledFileRegistry`] and is threaded
//! by `&mut` through the driver, including every re-entrant compile that an
//! import triggers. Separate contexts share nothing, so independent runs
//! (for example, parallel tests) cannot see each other's claims.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::path::{normalize, CanonicalPath};

/// Canonical paths already claimed for compilation.
///
/// Only grows. A path is claimed *before* its compilation starts, so a
/// cyclic import back to a file still being compiled finds it claimed and
/// stops there. There is no way to remove or reset a claim.
#[derive(Debug, Default)]
pub struct CompiledFileRegistry {
    claimed: FxHashSet<CanonicalPath>,
    /// Claims in the order they were made.
    order: Vec<CanonicalPath>,
}

impl CompiledFileRegistry {
    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.claimed.contains(path)
    }

    /// Claim `path`. Returns `false` if it was already claimed.
    pub(crate) fn claim(&mut self, path: CanonicalPath) -> bool {
        if !self.claimed.insert(path.clone()) {
            return false;
        }
        self.order.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Claimed paths in claim order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.order.iter()
    }
}

/// State for one compilation run.
#[derive(Debug, Default)]
pub struct CompilationContext {
    registry: CompiledFileRegistry,
    written: Vec<PathBuf>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &CompiledFileRegistry {
        &self.registry
    }

    /// Whether any spelling of `path` has been claimed in this context.
    pub fn is_claimed(&self, path: impl AsRef<Path>) -> bool {
        self.registry.contains(&normalize(path))
    }

    /// Output files written so far, in write order.
    ///
    /// An imported module finishes before the module importing it, so
    /// dependencies appear before their dependents.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub(crate) fn claim(&mut self, path: CanonicalPath) -> bool {
        self.registry.claim(path)
    }

    pub(crate) fn record_output(&mut self, path: PathBuf) {
        self.written.push(path);
    }
}
