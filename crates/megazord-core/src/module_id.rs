use serde::{Deserialize, Serialize};

/// Version-independent identity of a module: Maven group plus artifact name.
///
/// This is the unit compared for megazord membership. Ordering is derived so
/// that set operations and error messages are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleIdentity {
    pub group: String,
    pub name: String,
}

impl ModuleIdentity {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Parse `"group:name"` into an identity.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Some(Self::new(parts[0], parts[1]))
        } else {
            None
        }
    }
}

impl std::fmt::Display for ModuleIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// A module as produced by dependency resolution: an identity plus the
/// version it resolved to.
///
/// Versions are opaque strings compared only for equality; this crate never
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolvedModule {
    pub id: ModuleIdentity,
    pub version: String,
}

impl ResolvedModule {
    pub fn new(id: ModuleIdentity, version: impl Into<String>) -> Self {
        Self {
            id,
            version: version.into(),
        }
    }

    /// Parse `"group:name:version"` into a resolved module.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            Some(Self::new(ModuleIdentity::new(parts[0], parts[1]), parts[2]))
        } else {
            None
        }
    }
}

impl std::fmt::Display for ResolvedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_identity() {
        let id = ModuleIdentity::parse("org.mozilla.fxaclient:fxaclient").unwrap();
        assert_eq!(id.group, "org.mozilla.fxaclient");
        assert_eq!(id.name, "fxaclient");
        assert_eq!(id.to_string(), "org.mozilla.fxaclient:fxaclient");
    }

    #[test]
    fn parse_identity_rejects_malformed() {
        assert!(ModuleIdentity::parse("no-colon").is_none());
        assert!(ModuleIdentity::parse("too:many:parts").is_none());
        assert!(ModuleIdentity::parse(":empty-group").is_none());
    }

    #[test]
    fn parse_resolved_module() {
        let m = ResolvedModule::parse("org.mozilla.sync15:logins:0.12.0").unwrap();
        assert_eq!(m.id, ModuleIdentity::new("org.mozilla.sync15", "logins"));
        assert_eq!(m.version, "0.12.0");
        assert_eq!(m.to_string(), "org.mozilla.sync15:logins:0.12.0");
    }

    #[test]
    fn identity_ordering_is_lexicographic() {
        let a = ModuleIdentity::new("org.a", "zzz");
        let b = ModuleIdentity::new("org.b", "aaa");
        assert!(a < b);
    }
}
