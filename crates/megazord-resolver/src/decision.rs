//! The structured outcome of megazord selection for one resolution context.

use std::collections::BTreeSet;
use std::fmt;

use megazord_core::module_id::{ModuleIdentity, ResolvedModule};
use serde::{Deserialize, Serialize};

/// What the resolver decided for one resolution context.
///
/// `NoMatch` is a normal outcome, never a failure; hosts log it at most at
/// debug verbosity. Classified failures are a separate type
/// ([`ResolveError`](crate::errors::ResolveError)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Leave the context untouched.
    NoMatch(NoMatchReason),
    /// Install the contained rewrite rules and re-resolve the context.
    Apply(Substitution),
}

/// Why a context was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoMatchReason {
    /// No resolved module belongs to any known megazord.
    NoComponentsPresent,
    /// Some megazord components are present, but no single megazord covers
    /// all of them. Tolerated so partial or incremental module sets keep
    /// resolving without substitution.
    NoCoveringMegazord { matched: BTreeSet<ModuleIdentity> },
}

/// A selected megazord and the rewrites that adopt it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Name of the selected megazord definition.
    pub megazord: String,
    /// One rule per matched component, all targeting the megazord's output
    /// at the matched version.
    pub rules: Vec<RewriteRule>,
    /// Components the megazord bundles that were not present in this
    /// context. Empty under the strict superset policy.
    pub leftover: BTreeSet<ModuleIdentity>,
}

impl Substitution {
    /// The identities this substitution rewrites.
    pub fn matched_identities(&self) -> BTreeSet<ModuleIdentity> {
        self.rules.iter().map(|r| r.from.id.clone()).collect()
    }
}

/// Replace one resolved module coordinate with the megazord output at the
/// same version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RewriteRule {
    pub from: ResolvedModule,
    pub to: ResolvedModule,
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "megazord '{}' ({} rewrite(s))", self.megazord, self.rules.len())
    }
}
