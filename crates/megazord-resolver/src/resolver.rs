//! Megazord selection: match a resolved module set against the registry and
//! decide which single megazord, if any, substitutes for the matched
//! components.

use std::collections::BTreeSet;

use megazord_core::definition::MegazordDefinition;
use megazord_core::module_id::{ModuleIdentity, ResolvedModule};
use megazord_core::registry::MegazordRegistry;
use megazord_core::snapshot::ResolutionSnapshot;

use crate::decision::{Decision, NoMatchReason, RewriteRule, Substitution};
use crate::errors::ResolveError;

/// Decide whether a megazord substitutes for the modules in `snapshot`.
///
/// Pure function of its inputs: no side effects beyond tracing events, and
/// safe to call concurrently for independent snapshots against the same
/// frozen registry.
///
/// A snapshot that matches no megazord components, or whose matched
/// components no single megazord fully covers, yields
/// [`Decision::NoMatch`] rather than an error; only configuration
/// inconsistencies (mixed versions, ambiguous minimums, strict superset
/// violations) fail.
pub fn resolve(
    registry: &MegazordRegistry,
    snapshot: &ResolutionSnapshot,
) -> Result<Decision, ResolveError> {
    let matching: Vec<&ResolvedModule> = snapshot
        .iter()
        .filter(|module| registry.definitions().iter().any(|def| def.absorbs(&module.id)))
        .collect();
    if matching.is_empty() {
        tracing::debug!("no megazord components in snapshot; skipping");
        return Ok(Decision::NoMatch(NoMatchReason::NoComponentsPresent));
    }

    let versions: BTreeSet<String> = matching.iter().map(|m| m.version.clone()).collect();
    if versions.len() > 1 {
        return Err(ResolveError::InconsistentVersions {
            modules: matching.into_iter().cloned().collect(),
            versions,
        });
    }
    let version = matching[0].version.clone();

    let matched_identities: BTreeSet<ModuleIdentity> =
        matching.iter().map(|m| m.id.clone()).collect();

    let mut candidates: Vec<&MegazordDefinition> = registry
        .definitions()
        .iter()
        .filter(|def| matched_identities.is_subset(def.components()))
        .collect();
    // Prefer the smallest megazord that still covers everything present.
    // The sort is stable, so ties keep registration order in diagnostics.
    candidates.sort_by_key(|def| def.components().len());
    tracing::debug!(
        "components [{}] match candidate megazords [{}]",
        display_list(&matched_identities),
        display_list(candidates.iter().map(|d| d.name())),
    );

    let minimum = match candidates.first() {
        Some(def) => *def,
        // The present components do not fully belong to any single megazord.
        // A configuration gap, not an error: partial module sets resolve
        // without substitution.
        None => {
            return Ok(Decision::NoMatch(NoMatchReason::NoCoveringMegazord {
                matched: matched_identities,
            }))
        }
    };

    // It's not okay to have megazords {A, B, C} and {A, B, D} for components
    // {A, B}: a tie is surfaced, never silently broken.
    let minimums: Vec<&MegazordDefinition> = candidates
        .iter()
        .copied()
        .filter(|def| def.components().len() == minimum.components().len())
        .collect();
    if minimums.len() > 1 {
        return Err(ResolveError::AmbiguousMegazord {
            names: minimums.iter().map(|def| def.name().to_string()).collect(),
        });
    }

    let leftover: BTreeSet<ModuleIdentity> = minimum
        .components()
        .difference(&matched_identities)
        .cloned()
        .collect();
    if registry.fail_if_strict_superset() && !leftover.is_empty() {
        return Err(ResolveError::StrictSuperset {
            name: minimum.name().to_string(),
            missing: leftover,
        });
    }

    let rules: Vec<RewriteRule> = matching
        .into_iter()
        .map(|module| RewriteRule {
            from: module.clone(),
            to: ResolvedModule::new(minimum.output().clone(), version.clone()),
        })
        .collect();

    tracing::info!(
        "megazord '{}' selected: {} component(s) rewritten to {}:{}",
        minimum.name(),
        rules.len(),
        minimum.output(),
        version,
    );

    Ok(Decision::Apply(Substitution {
        megazord: minimum.name().to_string(),
        rules,
        leftover,
    }))
}

fn display_list<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(defs: &[(&str, &str, &[&str])]) -> MegazordRegistry {
        let mut registry = MegazordRegistry::empty();
        for (name, output, components) in defs {
            registry
                .add(
                    MegazordDefinition::new(
                        *name,
                        ModuleIdentity::parse(output).unwrap(),
                        components.iter().map(|c| ModuleIdentity::parse(c).unwrap()),
                    )
                    .unwrap(),
                )
                .unwrap();
        }
        registry.freeze();
        registry
    }

    fn snapshot(modules: &[&str]) -> ResolutionSnapshot {
        modules
            .iter()
            .map(|m| ResolvedModule::parse(m).unwrap())
            .collect()
    }

    #[test]
    fn empty_registry_never_matches() {
        let mut registry = MegazordRegistry::empty();
        registry.freeze();
        let decision = resolve(&registry, &snapshot(&["org.example:a:1.0"])).unwrap();
        assert_eq!(decision, Decision::NoMatch(NoMatchReason::NoComponentsPresent));
    }

    #[test]
    fn unrelated_modules_do_not_match() {
        let registry = registry(&[("a", "org.out:a", &["org.example:x", "org.example:y"])]);
        let decision = resolve(
            &registry,
            &snapshot(&["org.other:lib:1.0", "junit:junit:4.12"]),
        )
        .unwrap();
        assert_eq!(decision, Decision::NoMatch(NoMatchReason::NoComponentsPresent));
    }

    #[test]
    fn version_gate_reports_modules_and_versions() {
        let registry = registry(&[("a", "org.out:a", &["org.example:x", "org.example:y"])]);
        let err = resolve(
            &registry,
            &snapshot(&["org.example:x:1.0", "org.example:y:2.0"]),
        )
        .unwrap_err();
        match err {
            ResolveError::InconsistentVersions { modules, versions } => {
                assert_eq!(modules.len(), 2);
                assert_eq!(
                    versions,
                    ["1.0".to_string(), "2.0".to_string()].into_iter().collect()
                );
            }
            other => panic!("expected InconsistentVersions, got {other:?}"),
        }
    }

    #[test]
    fn partial_coverage_reports_matched_identities() {
        let registry = registry(&[
            ("a", "org.out:a", &["org.example:x", "org.example:y"]),
            ("b", "org.out:b", &["org.example:y", "org.example:z"]),
        ]);
        // x and z match interesting components but no single megazord has both.
        let decision = resolve(
            &registry,
            &snapshot(&["org.example:x:1.0", "org.example:z:1.0"]),
        )
        .unwrap();
        match decision {
            Decision::NoMatch(NoMatchReason::NoCoveringMegazord { matched }) => {
                assert_eq!(matched.len(), 2);
                assert!(matched.contains(&ModuleIdentity::new("org.example", "x")));
                assert!(matched.contains(&ModuleIdentity::new("org.example", "z")));
            }
            other => panic!("expected NoCoveringMegazord, got {other:?}"),
        }
    }

    #[test]
    fn rules_target_output_at_matched_version() {
        let registry = registry(&[("a", "org.out:mega", &["org.example:x", "org.example:y"])]);
        let decision = resolve(
            &registry,
            &snapshot(&["org.example:x:0.3.1", "org.example:y:0.3.1"]),
        )
        .unwrap();
        match decision {
            Decision::Apply(sub) => {
                assert_eq!(sub.megazord, "a");
                assert_eq!(sub.rules.len(), 2);
                for rule in &sub.rules {
                    assert_eq!(rule.to, ResolvedModule::parse("org.out:mega:0.3.1").unwrap());
                }
                assert!(sub.leftover.is_empty());
            }
            other => panic!("expected Apply, got {other:?}"),
        }
    }
}
