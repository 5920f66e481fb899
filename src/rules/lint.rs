//! Consistency checks between the corpus and the rule tables.
//! Templates calling a fragment resolver must never be rendered for a
//! project without a database, and every rule entry must name a real leaf.

use regex::Regex;

use crate::constants::BASE_ROOT;
use crate::corpus::{strip_root, Corpus};
use crate::error::{Error, Result};
use crate::processor::{is_template_path, logical_path};

use super::{FragmentKind, SelectionRules};

/// Matches a call to any fragment resolver inside template text.
///
/// # Errors
/// * `Error::CorpusError` if the resolver names do not form a valid pattern
pub fn resolver_call_pattern() -> Result<Regex> {
    let names = [FragmentKind::Migration, FragmentKind::Query]
        .map(FragmentKind::function_name)
        .join("|");
    let pattern = format!(r"\b(?:{names})\s*\(");
    Regex::new(&pattern).map_err(|e| Error::CorpusError {
        path: pattern.clone(),
        reason: format!("invalid resolver call pattern: {e}"),
    })
}

/// Logical paths of templates that call a fragment resolver but are not
/// excluded for projects without a database.
///
/// # Errors
/// * `Error::CorpusError` if a template cannot be read
pub fn uncovered_fragment_calls(corpus: &dyn Corpus, rules: &SelectionRules) -> Result<Vec<String>> {
    let pattern = resolver_call_pattern()?;
    let mut uncovered = Vec::new();

    for leaf in corpus.walk(BASE_ROOT)? {
        let relative = strip_root(&leaf, BASE_ROOT);
        if !is_template_path(relative) {
            continue;
        }
        let bytes = corpus.read(&leaf)?;
        let text = String::from_utf8_lossy(&bytes);
        let logical = logical_path(relative);
        if pattern.is_match(&text) && !rules.exclusions.excluded_without_database(logical) {
            uncovered.push(logical.to_string());
        }
    }
    Ok(uncovered)
}

/// Rule entries that do not correspond to any corpus leaf.
///
/// Rename sources count as known; rename targets are not checked since they
/// only exist after materialization.
///
/// # Errors
/// * `Error::CorpusError` if the corpus cannot be walked
pub fn unknown_rule_paths(corpus: &dyn Corpus, rules: &SelectionRules) -> Result<Vec<String>> {
    let leaves: Vec<String> = corpus
        .walk(BASE_ROOT)?
        .iter()
        .map(|leaf| logical_path(strip_root(leaf, BASE_ROOT)).to_string())
        .collect();

    let rename_sources = rules.renames.values().flatten().map(|(old, _)| old.as_str());
    let mut unknown: Vec<String> = rules
        .exclusions
        .all_paths()
        .into_iter()
        .chain(rename_sources)
        .filter(|path| !leaves.iter().any(|leaf| leaf.as_str() == *path))
        .map(str::to_string)
        .collect();
    unknown.sort();
    unknown.dedup();
    Ok(unknown)
}

/// Runs every check and fails with a summary if any reports a problem.
///
/// # Errors
/// * `Error::CorpusError` naming the offending paths
pub fn check(corpus: &dyn Corpus, rules: &SelectionRules) -> Result<()> {
    let uncovered = uncovered_fragment_calls(corpus, rules)?;
    if !uncovered.is_empty() {
        return Err(Error::CorpusError {
            path: uncovered.join(", "),
            reason: "fragment resolvers used but not excluded when database is none".to_string(),
        });
    }
    let unknown = unknown_rule_paths(corpus, rules)?;
    if !unknown.is_empty() {
        return Err(Error::CorpusError {
            path: unknown.join(", "),
            reason: "rule entries do not match any corpus leaf".to_string(),
        });
    }
    Ok(())
}
