//! Common constants used throughout the Kiln application.

/// Root of the main template tree inside the corpus.
pub const BASE_ROOT: &str = "base";

/// Root of the per-engine database fragments inside the corpus.
pub const FRAGMENTS_ROOT: &str = "fragments/database";

/// Extension marking a corpus leaf as a template.
pub const TEMPLATE_SUFFIX: &str = ".templ";

/// Message of the commit created by git initialization.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Files that are never part of the corpus when read from disk.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] = ["**/.DS_Store", "**/*.swp", "**/*~", "**/.git/**"];
