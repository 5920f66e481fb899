//! Template corpus compiled into the binary.
//! `build.rs` turns `templates/` into a sorted table of paths and bytes.

use crate::error::{Error, Result};

use super::Corpus;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/corpus.rs"));
}

/// The template tree compiled into the binary from `templates/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCorpus;

impl EmbeddedCorpus {
    pub fn new() -> Self {
        Self
    }

    /// Every embedded entry, sorted by path.
    pub fn entries(&self) -> &'static [(&'static str, &'static [u8])] {
        generated::ENTRIES
    }
}

impl Corpus for EmbeddedCorpus {
    fn walk(&self, root: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", root.trim_end_matches('/'));
        Ok(self
            .entries()
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, _)| path.to_string())
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.entries()
            .binary_search_by(|(candidate, _)| (*candidate).cmp(path))
            .map(|index| self.entries()[index].1.to_vec())
            .map_err(|_| Error::CorpusError {
                path: path.to_string(),
                reason: "no such embedded file".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_sorted() {
        let entries = EmbeddedCorpus::new().entries();
        assert!(!entries.is_empty());
        assert!(entries.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_walk_and_read() {
        let corpus = EmbeddedCorpus::new();
        let leaves = corpus.walk("base").unwrap();
        assert!(leaves.iter().all(|leaf| leaf.starts_with("base/")));
        assert!(leaves.contains(&"base/cmd/app/main.go.templ".to_string()));
        assert!(!corpus.read("base/cmd/app/main.go.templ").unwrap().is_empty());
        assert!(corpus.read("base/missing.txt").is_err());
    }
}
