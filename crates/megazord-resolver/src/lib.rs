//! Megazord substitution selection.
//!
//! Given a frozen [`megazord_core::registry::MegazordRegistry`] and the flat
//! set of modules one dependency-resolution context resolved to, decide
//! whether a single megazord covers the matched components and, if so, which
//! coordinate rewrites the host resolution engine should install before
//! re-resolving the context.

pub mod decision;
pub mod errors;
pub mod resolver;
pub mod rewrite;
