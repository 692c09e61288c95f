// censor-core/src/engines/mod.rs
//! Engines that run censor rules over content.
//!
//! `applier` holds the ordered rule set applier used by every entry point.

pub mod applier;
