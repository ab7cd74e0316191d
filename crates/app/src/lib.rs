//! # lightgen-app
//!
//! Application layer of the light code generator.
//!
//! ## Responsibilities
//! - Own the **variable registry**: identifier to variable bindings of one compilation
//! - Run the **cooperative scheduler**: builders suspend on identifiers that are not
//!   declared yet and resume once they are
//! - Collect emitted statements in an append-only **sink**
//! - Provide the **builders** for lights, their effects, light actions, and external
//!   declarations
//! - Expose [`compiler::compile`], the entry point from a raw configuration tree to a
//!   [`compiler::Program`]
//!
//! ## Dependency rule
//! Depends on `lightgen-domain` only (plus `tracing` for diagnostics).
//! Never reads files or the environment; that is the binary's job.

pub mod builders;
pub mod compiler;
pub mod lambda;
pub mod registry;
pub mod scheduler;
pub mod sink;
