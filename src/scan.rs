use std::path::Path;

use git2::Repository;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScanError;
use crate::git::history;
use crate::scoring;
use crate::types::ScanResult;

// Word-boundary anchored so e.g. "prefixed" never qualifies as a fix.
static DEFAULT_FIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(fix(es|ed)?|close(s|d)?)\b").expect("fix regex")
});

/// Parameters of one scan. `now` anchors the decay normalization window and
/// is injected rather than read from the clock inside the scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub branch: String,
    pub depth: usize,
    pub pattern: Regex,
    pub now: i64,
}

/// Scans the repository at `repo_path`: classifies fix commits on the
/// branch, scores hotspots, and returns both rankings.
///
/// Each call opens its own repository handle; nothing outlives the call and
/// nothing is shared across calls.
pub fn scan(repo_path: &Path, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    let repo = Repository::open(repo_path)?;
    let fixes = history::scan_fixes(&repo, &options.branch, &options.pattern)?;
    let (fixes, spots) = scoring::score(fixes, options.now, options.depth);
    Ok(ScanResult { fixes, spots })
}

/// Compiles the fix-detection pattern from user input.
///
/// An explicit regex wins over a word list; a word list becomes a
/// case-insensitive word-boundary alternation of the escaped words; with
/// neither, the default fix keywords apply. All variants match
/// case-insensitively, per the scan contract.
pub fn build_pattern(regex: Option<&str>, words: &[String]) -> Result<Regex, ScanError> {
    if let Some(re) = regex {
        return Ok(Regex::new(&format!("(?i){re}"))?);
    }

    let escaped: Vec<String> = words
        .iter()
        .map(|w| regex::escape(w.trim()))
        .filter(|w| !w.is_empty())
        .collect();
    if escaped.is_empty() {
        return Ok(DEFAULT_FIX_PATTERN.clone());
    }
    Ok(Regex::new(&format!(r"(?i)\b({})\b", escaped.join("|")))?)
}
