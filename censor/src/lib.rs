// censor/src/lib.rs
//! # Censor CLI
//!
//! This crate provides the command-line host for `censor-core`: it loads a rule
//! file, reads a document and writes the redacted result.

pub mod cli;
pub mod commands;
pub mod logger;
