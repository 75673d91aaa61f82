use serde::{Deserialize, Serialize};

use crate::grammar::{ContextNode, LineRange};

// ---------------------------------------------------------------------------
// Inputs from the diff-retrieval collaborator
// ---------------------------------------------------------------------------

/// The head ref a pull request's files are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDetails {
    pub name: String,
    pub sha: String,
}

/// One changed file of a pull request, as supplied by the diff-retrieval
/// step: its path, the unified-diff patch text, and the full contents at the
/// head revision. The fetcher owns retrieval and decoding; `contents` is
/// `None` when the file could not be fetched (deleted, binary, 404).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    pub path: String,
    pub patch: Option<String>,
    pub contents: Option<String>,
}

// ---------------------------------------------------------------------------
// Context handed to the review generator
// ---------------------------------------------------------------------------

/// Why a file's input was downgraded to patch-only text. File-scoped and
/// recoverable — the rest of the pull request is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum FallbackReason {
    /// No grammar registered for the file's extension.
    UnsupportedLanguage,
    /// The grammar rejected the source text.
    Unparseable(String),
    /// The fetcher supplied no contents for the file.
    MissingContents,
}

/// Context for one changed hunk: the changed range, the line-numbered text
/// handed to the generator, and the enclosing node when one was found.
/// `enclosing: None` means the text is the raw hunk lines — a normal
/// outcome, distinct from the file-level fallbacks above.
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnippet {
    pub range: LineRange,
    pub text: String,
    pub enclosing: Option<ContextNode>,
}

/// Everything the generator gets for one changed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileContext {
    pub path: String,
    pub language: Option<String>,
    pub snippets: Vec<ContextSnippet>,
    /// Set when structural context could not be built at all; the generator
    /// falls back to `patch`.
    pub fallback: Option<FallbackReason>,
    pub patch: Option<String>,
}

// ---------------------------------------------------------------------------
// Generator output
// ---------------------------------------------------------------------------

/// An inline suggestion anchored to specific lines of a file. Lines are
/// 1-based here because that is what review hosts anchor comments to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSuggestion {
    pub file: String,
    pub line_start: usize,
    pub line_end: usize,
    pub comment: String,
    pub correction: String,
}

/// The generator's verdict: one optional general comment plus zero or more
/// inline suggestions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Review {
    pub comment: Option<String>,
    pub suggestions: Vec<CodeSuggestion>,
}
