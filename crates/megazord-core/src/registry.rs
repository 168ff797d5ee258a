use crate::definition::MegazordDefinition;
use crate::errors::MegazordError;
use crate::module_id::ModuleIdentity;

/// The ordered collection of known megazord definitions plus the strict
/// superset policy flag.
///
/// Lifecycle is two-phase: fully mutable while the host is configuring, then
/// frozen by [`MegazordRegistry::freeze`] before the first resolution context
/// is processed. Every mutating operation fails with
/// [`MegazordError::RegistryFrozen`] afterwards; reads never fail, so a
/// frozen registry can be shared across concurrently resolved contexts.
#[derive(Debug, Clone)]
pub struct MegazordRegistry {
    definitions: Vec<MegazordDefinition>,
    fail_if_strict_superset: bool,
    frozen: bool,
}

impl MegazordRegistry {
    /// A registry seeded with the built-in Mozilla megazord definitions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for def in default_definitions() {
            registry
                .add(def)
                .expect("built-in definition names are distinct");
        }
        registry
    }

    /// An empty registry for hosts that configure definitions from scratch.
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
            fail_if_strict_superset: true,
            frozen: false,
        }
    }

    /// Register a definition. Fails on a name collision or after freeze.
    pub fn add(&mut self, definition: MegazordDefinition) -> Result<(), MegazordError> {
        self.check_mutable()?;
        if self.definitions.iter().any(|d| d.name() == definition.name()) {
            return Err(MegazordError::DuplicateDefinition {
                name: definition.name().to_string(),
            });
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Drop every current definition and register the given ones instead.
    pub fn replace_all(
        &mut self,
        definitions: impl IntoIterator<Item = MegazordDefinition>,
    ) -> Result<(), MegazordError> {
        self.check_mutable()?;
        self.definitions.clear();
        for def in definitions {
            self.add(def)?;
        }
        Ok(())
    }

    /// Set whether resolution fails when the chosen megazord bundles
    /// components absent from the resolved context. Defaults to `true`.
    pub fn set_fail_if_strict_superset(&mut self, value: bool) -> Result<(), MegazordError> {
        self.check_mutable()?;
        self.fail_if_strict_superset = value;
        Ok(())
    }

    /// End the configuration phase. Idempotent; there is no thaw.
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::debug!(
                "freezing megazord registry with {} definition(s)",
                self.definitions.len()
            );
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn fail_if_strict_superset(&self) -> bool {
        self.fail_if_strict_superset
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> &[MegazordDefinition] {
        &self.definitions
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn check_mutable(&self) -> Result<(), MegazordError> {
        if self.frozen {
            Err(MegazordError::RegistryFrozen)
        } else {
            Ok(())
        }
    }
}

impl Default for MegazordRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// The built-in megazords shipped with the plugin.
fn default_definitions() -> Vec<MegazordDefinition> {
    let composites = "org.mozilla.appservices.composites";
    vec![
        MegazordDefinition::new(
            "lockbox",
            ModuleIdentity::new(composites, "lockbox"),
            vec![
                ModuleIdentity::new("org.mozilla.fxaclient", "fxaclient"),
                ModuleIdentity::new("org.mozilla.sync15", "logins"),
            ],
        )
        .expect("built-in lockbox definition is valid"),
        MegazordDefinition::new(
            "reference-browser",
            ModuleIdentity::new(composites, "reference-browser"),
            vec![
                ModuleIdentity::new("org.mozilla.fxaclient", "fxaclient"),
                ModuleIdentity::new("org.mozilla.sync15", "logins"),
                ModuleIdentity::new("org.mozilla.places", "places"),
            ],
        )
        .expect("built-in reference-browser definition is valid"),
    ]
}
