//! Rewrite application: turn an [`Apply`](crate::decision::Decision::Apply)
//! decision into a post-substitution snapshot, and drive repeated resolution
//! to a stable result the way the host engine's re-resolution pass does.

use std::collections::BTreeMap;

use megazord_core::module_id::{ModuleIdentity, ResolvedModule};
use megazord_core::registry::MegazordRegistry;
use megazord_core::snapshot::ResolutionSnapshot;

use crate::decision::{Decision, Substitution};
use crate::errors::ResolveError;
use crate::resolver;

/// Upper bound on substitution passes before resolution is declared
/// non-convergent. One pass is the expected shape; anything deeper means
/// megazords are chained through each other's outputs.
pub const MAX_SUBSTITUTION_PASSES: usize = 4;

/// Apply a substitution's rewrite rules to a snapshot.
///
/// Every matched module is replaced by the megazord output at the matched
/// version; unmatched modules are carried over untouched. Since the snapshot
/// is a set, the matched components collapse into a single output module.
pub fn apply(snapshot: &ResolutionSnapshot, substitution: &Substitution) -> ResolutionSnapshot {
    let rewrites: BTreeMap<&ModuleIdentity, &ResolvedModule> = substitution
        .rules
        .iter()
        .map(|rule| (&rule.from.id, &rule.to))
        .collect();

    snapshot
        .iter()
        .map(|module| match rewrites.get(&module.id) {
            Some(target) => (*target).clone(),
            None => module.clone(),
        })
        .collect()
}

/// The stable outcome of repeated resolve-and-apply passes.
#[derive(Debug, Clone)]
pub struct FixedPoint {
    /// The snapshot once no further megazord matches.
    pub snapshot: ResolutionSnapshot,
    /// Substitutions applied to reach it, in order. Usually zero or one.
    pub applied: Vec<Substitution>,
}

impl FixedPoint {
    pub fn substituted(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Loop `resolve` + `apply` until the snapshot is stable.
///
/// Megazord outputs are not components of any well-formed definition, so the
/// expected trace is one `Apply` followed by `NoMatch`. The pass cap is a
/// safety net against registries whose definitions reference each other's
/// outputs; exceeding it fails with [`ResolveError::SubstitutionLoop`].
pub fn resolve_to_fixed_point(
    registry: &MegazordRegistry,
    snapshot: ResolutionSnapshot,
) -> Result<FixedPoint, ResolveError> {
    let mut current = snapshot;
    let mut applied = Vec::new();

    for pass in 0..MAX_SUBSTITUTION_PASSES {
        match resolver::resolve(registry, &current)? {
            Decision::NoMatch(_) => {
                tracing::debug!("substitution stable after {pass} pass(es)");
                return Ok(FixedPoint {
                    snapshot: current,
                    applied,
                });
            }
            Decision::Apply(substitution) => {
                current = apply(&current, &substitution);
                applied.push(substitution);
            }
        }
    }

    Err(ResolveError::SubstitutionLoop {
        passes: MAX_SUBSTITUTION_PASSES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::RewriteRule;
    use std::collections::BTreeSet;

    fn module(s: &str) -> ResolvedModule {
        ResolvedModule::parse(s).unwrap()
    }

    #[test]
    fn apply_collapses_matched_modules_into_output() {
        let snapshot: ResolutionSnapshot = [
            module("org.example:x:1.0"),
            module("org.example:y:1.0"),
            module("junit:junit:4.12"),
        ]
        .into_iter()
        .collect();
        let substitution = Substitution {
            megazord: "a".to_string(),
            rules: vec![
                RewriteRule {
                    from: module("org.example:x:1.0"),
                    to: module("org.out:mega:1.0"),
                },
                RewriteRule {
                    from: module("org.example:y:1.0"),
                    to: module("org.out:mega:1.0"),
                },
            ],
            leftover: BTreeSet::new(),
        };

        let rewritten = apply(&snapshot, &substitution);
        assert_eq!(rewritten.len(), 2);
        assert!(rewritten.iter().any(|m| m == &module("org.out:mega:1.0")));
        assert!(rewritten.iter().any(|m| m == &module("junit:junit:4.12")));
    }

    #[test]
    fn apply_leaves_unmatched_snapshot_unchanged() {
        let snapshot: ResolutionSnapshot =
            [module("org.other:lib:2.0")].into_iter().collect();
        let substitution = Substitution {
            megazord: "a".to_string(),
            rules: vec![RewriteRule {
                from: module("org.example:x:1.0"),
                to: module("org.out:mega:1.0"),
            }],
            leftover: BTreeSet::new(),
        };
        assert_eq!(apply(&snapshot, &substitution), snapshot);
    }
}
