use git2::{BranchType, Commit, Oid, Repository, Sort};
use regex::Regex;

use crate::error::ScanError;
use crate::types::Fix;

/// Walks `branch` oldest-to-newest and returns one [`Fix`] per commit whose
/// subject line matches `pattern`.
///
/// The walk is topological and reversed, so every commit is visited after
/// its ancestors and the returned sequence is chronologically ascending
/// (assuming timestamps do not decrease along the walked line). Scoring
/// relies on that ordering.
pub fn scan_fixes(
    repo: &Repository,
    branch: &str,
    pattern: &Regex,
) -> Result<Vec<Fix>, ScanError> {
    let tip = branch_tip(repo, branch)?;

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
    revwalk.push(tip)?;

    let mut fixes = Vec::new();
    for oid in revwalk {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;

        // Lenient decode: invalid byte sequences are replaced, never fatal.
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let subject = message.lines().next().unwrap_or("").to_string();
        if !pattern.is_match(&subject) {
            continue;
        }

        fixes.push(Fix {
            timestamp: commit.author().when().seconds(),
            files: changed_files(repo, &commit)?,
            commit_id: oid.to_string(),
            message: subject,
        });
    }

    Ok(fixes)
}

/// Resolves `branch` to its tip commit, failing fast when the name is not
/// among the local branches.
fn branch_tip(repo: &Repository, branch: &str) -> Result<Oid, ScanError> {
    let mut exists = false;
    for entry in repo.branches(Some(BranchType::Local))? {
        let (candidate, _) = entry?;
        if candidate.name()? == Some(branch) {
            exists = true;
            break;
        }
    }
    if !exists {
        return Err(ScanError::BranchNotFound { branch: branch.to_string() });
    }

    repo.find_branch(branch, BranchType::Local)?
        .get()
        .target()
        .ok_or_else(|| ScanError::BranchNotFound { branch: branch.to_string() })
}

/// Old-side paths of the diff between `commit` and its first parent.
///
/// Root commits have no parent and contribute no files. Deltas without an
/// old-side path contribute nothing rather than failing.
fn changed_files(repo: &Repository, commit: &Commit) -> Result<Vec<String>, ScanError> {
    if commit.parent_count() == 0 {
        return Ok(Vec::new());
    }

    let parent_tree = commit.parent(0)?.tree()?;
    let commit_tree = commit.tree()?;
    let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?;

    Ok(diff
        .deltas()
        .filter_map(|delta| delta.old_file().path())
        .map(|path| path.to_string_lossy().into_owned())
        .collect())
}
