use miette::Diagnostic;
use thiserror::Error;

/// Errors from megazord definition and registry configuration.
///
/// All of these indicate a configuration inconsistency the user must fix;
/// none is transient or retryable.
#[derive(Debug, Error, Diagnostic)]
pub enum MegazordError {
    /// A definition was registered under a name that is already taken.
    #[error("megazord definition '{name}' is already registered")]
    #[diagnostic(help("Each megazord needs a unique name; rename or remove one of the definitions"))]
    DuplicateDefinition { name: String },

    /// A mutating operation was attempted after the registry was frozen.
    #[error("megazord registry is frozen; definitions cannot change once resolution has started")]
    RegistryFrozen,

    /// A definition declared no components.
    #[error("megazord definition '{name}' has an empty component set")]
    EmptyComponents { name: String },

    /// A definition listed its own output module among its components.
    #[error("megazord definition '{name}' lists its own output among its components")]
    #[diagnostic(help("A megazord cannot absorb itself; remove the output coordinate from `components`"))]
    SelfReferential { name: String },

    /// Malformed TOML configuration or coordinate string.
    #[error("Megazord configuration error: {message}")]
    Config { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_definition_display() {
        let err = MegazordError::DuplicateDefinition {
            name: "lockbox".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "megazord definition 'lockbox' is already registered"
        );
    }

    #[test]
    fn frozen_display() {
        let err = MegazordError::RegistryFrozen;
        assert!(err.to_string().contains("frozen"), "got: {err}");
    }

    #[test]
    fn config_display() {
        let err = MegazordError::Config {
            message: "bad coordinate 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Megazord configuration error: bad coordinate 'x'"
        );
    }
}
