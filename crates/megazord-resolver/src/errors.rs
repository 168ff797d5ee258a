use std::collections::BTreeSet;
use std::fmt::Display;

use megazord_core::module_id::{ModuleIdentity, ResolvedModule};
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while selecting a megazord for one resolution context.
///
/// Each variant is a configuration inconsistency that aborts resolution of
/// the affected context; none is transient. A snapshot with no applicable
/// megazord is *not* an error (see
/// [`Decision::NoMatch`](crate::decision::Decision::NoMatch)).
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// Matched components resolved to more than one version. A megazord
    /// bundles its components at a single version, so substitution cannot
    /// proceed.
    #[error(
        "megazord component modules did not all have the same version: [{}] had versions [{}]",
        join(.modules),
        join(.versions)
    )]
    #[diagnostic(help("Align the component versions in the dependency declarations, then retry"))]
    InconsistentVersions {
        modules: Vec<ResolvedModule>,
        versions: BTreeSet<String>,
    },

    /// Two or more megazords tie as the minimal covering candidate. There is
    /// deliberately no secondary tie-break; the user must disambiguate the
    /// registry.
    #[error("multiple minimum megazords found: [{}]", .names.join(", "))]
    #[diagnostic(help("Remove or rename one of the tied megazord definitions"))]
    AmbiguousMegazord { names: Vec<String> },

    /// The only viable megazord bundles components the context never
    /// resolved, and the strict superset policy forbids adopting it.
    #[error(
        "minimum megazord '{name}' contains modules not in the resolved configuration: [{}]",
        join(.missing)
    )]
    #[diagnostic(help(
        "Either depend on the missing components or disable the strict superset policy"
    ))]
    StrictSuperset {
        name: String,
        missing: BTreeSet<ModuleIdentity>,
    },

    /// Substitution never reached a stable snapshot within the pass cap,
    /// which means megazord definitions reference each other's outputs as
    /// components.
    #[error("megazord substitution did not converge after {passes} passes")]
    #[diagnostic(help("Check the registry for megazords listing another megazord's output as a component"))]
    SubstitutionLoop { passes: usize },
}

fn join<'a, T: Display + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
