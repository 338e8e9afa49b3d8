//! Resolution cache
//!
//! Memoizes compiled declarations keyed by theme and state signature. Within
//! a theme, every signature maps to at most one declaration and repeated
//! lookups hand out the same `Arc`. Entries of a theme are dropped as a unit
//! when that theme stops being current.

use std::sync::{Arc, Mutex};

use nuix_theme::{ThemeId, TokenStore};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::compiler::CompileStyle;
use crate::declaration::StyleDeclaration;
use crate::error::CompilerError;
use crate::signature::StateSignature;

/// Hit and miss counters
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Per-theme declaration cache
///
/// Single-threaded; wrap in [`SharedResolutionCache`] to share across
/// threads.
#[derive(Default)]
pub struct ResolutionCache {
    themes: FxHashMap<ThemeId, FxHashMap<StateSignature, Arc<StyleDeclaration>>>,
    stats: CacheStats,
    /// Defects already logged, so each is reported once
    reported: FxHashSet<CompilerError>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached declaration, compiling and inserting it on a miss
    pub fn get_or_compile<C>(
        &mut self,
        signature: &StateSignature,
        theme_id: &ThemeId,
        compiler: &C,
        store: &TokenStore,
    ) -> Arc<StyleDeclaration>
    where
        C: CompileStyle + ?Sized,
    {
        if let Some(declaration) = self
            .themes
            .get(theme_id)
            .and_then(|entries| entries.get(signature))
        {
            self.stats.hits += 1;
            tracing::trace!("ResolutionCache hit - {} {:?}", theme_id, signature);
            return declaration.clone();
        }

        self.stats.misses += 1;
        tracing::trace!("ResolutionCache miss - {} {:?}", theme_id, signature);

        let compilation = compiler.compile(signature, store);
        for defect in compilation.defects {
            if !self.reported.contains(&defect) {
                tracing::error!("{}", defect);
                self.reported.insert(defect);
            }
        }

        let declaration = Arc::new(compilation.declaration);
        self.themes
            .entry(theme_id.clone())
            .or_default()
            .insert(signature.clone(), declaration.clone());
        declaration
    }

    /// Look up without compiling
    pub fn get(&self, signature: &StateSignature, theme_id: &str) -> Option<&Arc<StyleDeclaration>> {
        self.themes.get(theme_id)?.get(signature)
    }

    /// Drop every entry of one theme, returning how many were removed
    pub fn invalidate_theme(&mut self, theme_id: &str) -> usize {
        let removed = self.themes.remove(theme_id).map_or(0, |entries| entries.len());
        self.reported.retain(|defect| match defect {
            CompilerError::FallbackMissing { theme_id: id, .. } => id.as_str() != theme_id,
            CompilerError::MissingRuleTable(_) => true,
        });
        if removed > 0 {
            tracing::debug!("ResolutionCache::invalidate_theme - {} ({} entries)", theme_id, removed);
        }
        removed
    }

    /// Drop every entry of every theme
    pub fn invalidate_all(&mut self) -> usize {
        let removed = self.len();
        self.themes.clear();
        self.reported.clear();
        tracing::debug!("ResolutionCache::invalidate_all - {} entries", removed);
        removed
    }

    /// Drop declarations no widget holds anymore
    pub fn evict_unreferenced(&mut self) -> usize {
        let mut evicted = 0;
        for entries in self.themes.values_mut() {
            let before = entries.len();
            entries.retain(|_, declaration| Arc::strong_count(declaration) > 1);
            evicted += before - entries.len();
        }
        self.themes.retain(|_, entries| !entries.is_empty());
        evicted
    }

    /// Total entries across all themes
    pub fn len(&self) -> usize {
        self.themes.values().map(|entries| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries cached for one theme
    pub fn theme_len(&self, theme_id: &str) -> usize {
        self.themes.get(theme_id).map_or(0, |entries| entries.len())
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Distinct compiler defects logged so far
    pub fn reported_len(&self) -> usize {
        self.reported.len()
    }
}

/// A [`ResolutionCache`] behind a mutex
///
/// The lock is held across lookup, compile and insert, so concurrent callers
/// with the same key never insert two different declarations.
#[derive(Default)]
pub struct SharedResolutionCache {
    inner: Mutex<ResolutionCache>,
}

impl SharedResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compile<C>(
        &self,
        signature: &StateSignature,
        theme_id: &ThemeId,
        compiler: &C,
        store: &TokenStore,
    ) -> Arc<StyleDeclaration>
    where
        C: CompileStyle + ?Sized,
    {
        self.lock().get_or_compile(signature, theme_id, compiler, store)
    }

    pub fn invalidate_theme(&self, theme_id: &str) -> usize {
        self.lock().invalidate_theme(theme_id)
    }

    pub fn invalidate_all(&self) -> usize {
        self.lock().invalidate_all()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // A panicking compiler leaves the map consistent, so poisoning is ignored
    fn lock(&self) -> std::sync::MutexGuard<'_, ResolutionCache> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
