//! Read-only template corpus.
//! The materializer only sees the [`Corpus`] trait: a sorted walk over the
//! leaves under a root and a way to read a leaf's bytes.

use crate::error::Result;

pub mod embedded;
pub mod local;

pub use embedded::EmbeddedCorpus;
pub use local::LocalCorpus;

/// Trait for read-only hierarchical file sets.
///
/// Leaf paths are slash-separated and relative to the corpus itself,
/// e.g. `base/cmd/app/main.go.templ`.
pub trait Corpus {
    /// Lists every leaf under `root`, depth-first in sorted order.
    ///
    /// # Arguments
    /// * `root` - Slash-separated directory inside the corpus, e.g. `base`
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Corpus paths of the leaves, including the root prefix
    fn walk(&self, root: &str) -> Result<Vec<String>>;

    /// Reads the bytes of a single leaf.
    ///
    /// # Errors
    /// * `Error::CorpusError` if the leaf does not exist or cannot be read
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Strips `root/` from a corpus path. Paths outside `root` are returned unchanged.
pub fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    path.strip_prefix(root).and_then(|rest| rest.strip_prefix('/')).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("base/cmd/app/main.go.templ", "base"), "cmd/app/main.go.templ");
        assert_eq!(strip_root("other/file.txt", "base"), "other/file.txt");
        assert_eq!(strip_root("basement/file.txt", "base"), "basement/file.txt");
    }
}
