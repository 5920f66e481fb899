//! Fragment resolvers.
//! Database specific SQL lives under `fragments/database/<engine>/` and is
//! pulled into templates by file name.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::constants::FRAGMENTS_ROOT;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::model::Database;

/// Directory of fragments a resolver reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Migration,
    Query,
}

impl FragmentKind {
    pub fn dir(self) -> &'static str {
        match self {
            FragmentKind::Migration => "migrations",
            FragmentKind::Query => "queries",
        }
    }

    /// Name of the template function resolving this kind.
    pub fn function_name(self) -> &'static str {
        match self {
            FragmentKind::Migration => "database_migration",
            FragmentKind::Query => "database_query",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Fragments of the selected database engine, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct FragmentTable {
    engine: Option<&'static str>,
    migrations: BTreeMap<String, String>,
    queries: BTreeMap<String, String>,
}

impl FragmentTable {
    /// Loads every fragment of `database` from the corpus.
    ///
    /// A project without a database gets an empty table whose resolvers
    /// always fail.
    ///
    /// # Errors
    /// * `Error::CorpusError` if a fragment cannot be read or is not UTF-8
    pub fn load(corpus: &dyn Corpus, database: Database) -> Result<Self> {
        let Some(engine) = database.fragment_dir() else {
            return Ok(Self::default());
        };

        let mut table = Self { engine: Some(engine), ..Self::default() };
        for kind in [FragmentKind::Migration, FragmentKind::Query] {
            let root = format!("{FRAGMENTS_ROOT}/{engine}/{}", kind.dir());
            for path in corpus.walk(&root)? {
                let file_name = path.rsplit('/').next().unwrap_or(&path).to_string();
                let bytes = corpus.read(&path)?;
                let text = String::from_utf8(bytes).map_err(|e| Error::CorpusError {
                    path: path.clone(),
                    reason: format!("fragment is not valid UTF-8: {e}"),
                })?;
                debug!("Loaded {} fragment '{}'", kind.dir(), path);
                table.entries_mut(kind).insert(file_name, text);
            }
        }
        Ok(table)
    }

    /// Creates a table from in-memory fragments.
    pub fn from_entries<I, K, V>(engine: &'static str, migrations: I, queries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            engine: Some(engine),
            migrations: migrations.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            queries: queries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn engine(&self) -> Option<&'static str> {
        self.engine
    }

    fn entries(&self, kind: FragmentKind) -> &BTreeMap<String, String> {
        match kind {
            FragmentKind::Migration => &self.migrations,
            FragmentKind::Query => &self.queries,
        }
    }

    fn entries_mut(&mut self, kind: FragmentKind) -> &mut BTreeMap<String, String> {
        match kind {
            FragmentKind::Migration => &mut self.migrations,
            FragmentKind::Query => &mut self.queries,
        }
    }

    /// Returns the raw text of fragment `file_name`.
    ///
    /// # Errors
    /// Returns a message naming the engine and the file name when no
    /// database is selected or the fragment does not exist.
    pub fn resolve(&self, kind: FragmentKind, file_name: &str) -> std::result::Result<&str, String> {
        let Some(engine) = self.engine else {
            return Err(format!("{kind}(\"{file_name}\") called but no database is selected"));
        };
        self.entries(kind).get(file_name).map(String::as_str).ok_or_else(|| {
            format!("{} fragment '{}' not found for database engine '{}'", kind.dir(), file_name, engine)
        })
    }
}
