use std::collections::BTreeSet;

use crate::module_id::ResolvedModule;

/// The flat set of resolved modules visible in one dependency-resolution
/// context, as handed over by the host resolution engine.
///
/// Ordered for deterministic iteration; never mutated by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSnapshot {
    modules: BTreeSet<ResolvedModule>,
}

impl ResolutionSnapshot {
    pub fn new(modules: impl IntoIterator<Item = ResolvedModule>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedModule> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<ResolvedModule> for ResolutionSnapshot {
    fn from_iter<I: IntoIterator<Item = ResolvedModule>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for ResolutionSnapshot {
    type Item = ResolvedModule;
    type IntoIter = std::collections::btree_set::IntoIter<ResolvedModule>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.into_iter()
    }
}
