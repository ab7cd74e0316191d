//! # lightgen-domain
//!
//! Pure model of the light code generator.
//!
//! ## Responsibilities
//! - Foundational types: identifiers and their minter, configuration paths, error conventions
//! - Parse raw configuration scalars into canonical values (durations, percentages, lambdas, …)
//! - Define the **schema registry**: capability tiers, effect and action tags, typed config nodes
//! - Validate a raw configuration tree, collecting every error with the path it occurred at
//! - Define the **statement model** the compiler emits, and its textual rendering
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or external IO crates.
//! Scheduling and code emission live in the `app` crate.

pub mod codegen;
pub mod error;
pub mod id;
pub mod path;
pub mod schema;
pub mod value;
