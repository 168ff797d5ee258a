//! Core data types for megazord dependency substitution.
//!
//! A "megazord" is a single composite artifact that bundles several
//! fine-grained library modules. Consumers keep depending on the
//! fine-grained modules; when a resolved dependency set is covered by a
//! known megazord, the resolver rewrites those modules to the composite
//! coordinate instead.
//!
//! This crate defines the version-independent module identity, resolved
//! modules, megazord definitions, the registry with its configure-then-freeze
//! lifecycle, and the TOML configuration surface. It is intentionally free of
//! async code and I/O.

pub mod config;
pub mod definition;
pub mod errors;
pub mod module_id;
pub mod registry;
pub mod snapshot;
