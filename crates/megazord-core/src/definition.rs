use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::MegazordError;
use crate::module_id::ModuleIdentity;

/// A named megazord: an output artifact that bundles a set of component
/// modules.
///
/// Immutable once constructed. The component set is non-empty and never
/// contains the output identity itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegazordDefinition {
    name: String,
    output: ModuleIdentity,
    components: BTreeSet<ModuleIdentity>,
}

impl MegazordDefinition {
    /// Build a definition, validating its invariants.
    pub fn new(
        name: impl Into<String>,
        output: ModuleIdentity,
        components: impl IntoIterator<Item = ModuleIdentity>,
    ) -> Result<Self, MegazordError> {
        let name = name.into();
        let components: BTreeSet<ModuleIdentity> = components.into_iter().collect();
        if components.is_empty() {
            return Err(MegazordError::EmptyComponents { name });
        }
        if components.contains(&output) {
            return Err(MegazordError::SelfReferential { name });
        }
        Ok(Self {
            name,
            output,
            components,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The coordinate of the bundled artifact that replaces matched components.
    pub fn output(&self) -> &ModuleIdentity {
        &self.output
    }

    /// The fine-grained modules this megazord subsumes.
    pub fn components(&self) -> &BTreeSet<ModuleIdentity> {
        &self.components
    }

    pub fn absorbs(&self, id: &ModuleIdentity) -> bool {
        self.components.contains(id)
    }
}

impl std::fmt::Display for MegazordDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.name, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModuleIdentity {
        ModuleIdentity::parse(s).unwrap()
    }

    #[test]
    fn valid_definition() {
        let def = MegazordDefinition::new(
            "lockbox",
            id("org.mozilla.appservices.composites:lockbox"),
            vec![id("org.mozilla.fxaclient:fxaclient"), id("org.mozilla.sync15:logins")],
        )
        .unwrap();
        assert_eq!(def.name(), "lockbox");
        assert_eq!(def.components().len(), 2);
        assert!(def.absorbs(&id("org.mozilla.sync15:logins")));
        assert!(!def.absorbs(&id("org.mozilla.places:places")));
    }

    #[test]
    fn empty_components_rejected() {
        let err = MegazordDefinition::new("empty", id("org.example:out"), vec![]).unwrap_err();
        assert!(matches!(err, MegazordError::EmptyComponents { .. }));
    }

    #[test]
    fn self_referential_rejected() {
        let err = MegazordDefinition::new(
            "loop",
            id("org.example:out"),
            vec![id("org.example:a"), id("org.example:out")],
        )
        .unwrap_err();
        assert!(matches!(err, MegazordError::SelfReferential { .. }));
    }

    #[test]
    fn duplicate_components_collapse() {
        let def = MegazordDefinition::new(
            "dup",
            id("org.example:out"),
            vec![id("org.example:a"), id("org.example:a")],
        )
        .unwrap();
        assert_eq!(def.components().len(), 1);
    }
}
