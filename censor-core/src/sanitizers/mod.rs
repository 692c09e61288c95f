//! Validation and compilation of censor rule records.
//!
//! `compiler` turns plain records into [`ValidCensorRule`](compiler::ValidCensorRule)s
//! and owns the literal/regex substitution primitives they expose.

pub mod compiler;
