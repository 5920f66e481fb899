//! Kiln is a project scaffolder for Go web applications.
//! It materializes a complete source tree from an embedded template corpus,
//! selected and shaped by the user's feature choices, then runs the Go
//! toolchain and initializes git inside it.

/// Command-line interface module for the Kiln application
pub mod cli;

/// Post-generation toolchain and git commands
pub mod commands;

/// Run configuration: flags, answers files, output directory checks
pub mod config;

/// Common constants
pub mod constants;

/// Read-only template corpus, embedded or on disk
pub mod corpus;

/// Sequencing of the generation phases
pub mod driver;

/// Error types and handling for the Kiln application
pub mod error;

/// Logger initialization for the binary
pub mod logger;

/// Project model and feature enumerations
pub mod model;

/// Corpus materialization
/// Decides, renders and writes every corpus leaf
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering with MiniJinja
pub mod renderer;

/// Renames and empty directory pruning after materialization
pub mod rewriter;

/// Exclusion, rename and fragment tables
pub mod rules;
