use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::definition::MegazordDefinition;
use crate::errors::MegazordError;
use crate::module_id::ModuleIdentity;
use crate::registry::MegazordRegistry;

/// Declarative megazord configuration, parsed from TOML.
///
/// ```toml
/// fail-if-strict-superset = true
/// use-default-megazords = false
///
/// [megazords.lockbox]
/// output = "org.mozilla.appservices.composites:lockbox"
/// components = [
///     "org.mozilla.fxaclient:fxaclient",
///     "org.mozilla.sync15:logins",
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MegazordConfig {
    /// Fail resolution when the chosen megazord bundles components absent
    /// from the resolved context.
    #[serde(default = "default_true", rename = "fail-if-strict-superset")]
    pub fail_if_strict_superset: bool,

    /// Keep the built-in definitions and layer the declared ones on top.
    #[serde(default, rename = "use-default-megazords")]
    pub use_default_megazords: bool,

    #[serde(default)]
    pub megazords: BTreeMap<String, MegazordEntry>,
}

/// One declared megazord: its output coordinate and the components it absorbs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MegazordEntry {
    pub output: String,
    pub components: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for MegazordConfig {
    fn default() -> Self {
        Self {
            fail_if_strict_superset: true,
            use_default_megazords: false,
            megazords: BTreeMap::new(),
        }
    }
}

impl MegazordConfig {
    /// Parse a TOML document into a configuration.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            MegazordError::Config {
                message: format!("Failed to parse megazord configuration: {e}"),
            }
            .into()
        })
    }

    /// Build a registry from this configuration.
    ///
    /// The registry is returned unfrozen so the host can still adjust it
    /// programmatically before resolution starts.
    pub fn into_registry(self) -> Result<MegazordRegistry, MegazordError> {
        let mut registry = if self.use_default_megazords {
            MegazordRegistry::with_defaults()
        } else {
            MegazordRegistry::empty()
        };
        registry.set_fail_if_strict_superset(self.fail_if_strict_superset)?;

        for (name, entry) in self.megazords {
            let output = parse_identity(&entry.output)?;
            let components = entry
                .components
                .iter()
                .map(|c| parse_identity(c))
                .collect::<Result<Vec<_>, _>>()?;
            registry.add(MegazordDefinition::new(name, output, components)?)?;
        }
        Ok(registry)
    }
}

fn parse_identity(s: &str) -> Result<ModuleIdentity, MegazordError> {
    ModuleIdentity::parse(s).ok_or_else(|| MegazordError::Config {
        message: format!("invalid module coordinate '{s}' (expected 'group:name')"),
    })
}
