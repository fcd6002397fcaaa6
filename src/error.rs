/// Errors a scan can surface.
///
/// Scan modules return this type directly; `main` converts to a printable
/// string at the CLI boundary. There are no retries and no partial results —
/// any failure during traversal aborts the whole scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The repository could not be opened or read (absent, corrupt, or any
    /// failure while walking history and computing diffs).
    #[error("cannot access repository: {0}")]
    Repository(#[from] git2::Error),

    /// The requested branch is not among the local branch names.
    #[error("no such branch in the repo: {branch}")]
    BranchNotFound { branch: String },

    /// The caller-supplied fix-detection pattern does not compile.
    #[error("invalid fix pattern: {0}")]
    Pattern(#[from] regex::Error),
}
