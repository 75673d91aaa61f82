pub mod go;
pub mod python;
pub mod rust_lang;
pub mod typescript;

use std::path::Path;

use serde::Serialize;

use crate::error::ContextError;

// ---------------------------------------------------------------------------
// Node tags
// ---------------------------------------------------------------------------

/// The normalized three-way category every grammar maps its native node
/// kinds onto. The resolver reasons over these tags only, which keeps the
/// selection algorithm language-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTag {
    Function,
    Class,
    Module,
}

impl NodeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTag::Function => "function",
            NodeTag::Class => "class",
            NodeTag::Module => "module",
        }
    }
}

// ---------------------------------------------------------------------------
// Line ranges
// ---------------------------------------------------------------------------

/// Inclusive span of changed lines, 0-indexed to match tree-sitter rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Construct a range, enforcing `start <= end`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// A single-line range.
    pub fn line(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver output
// ---------------------------------------------------------------------------

/// Owned snapshot of the chosen enclosing node. Tree-sitter nodes borrow
/// their tree, and the tree is discarded at the end of every resolution
/// call, so the resolver hands back positions rather than a live node; the
/// caller slices the snippet out of the source it already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextNode {
    pub tag: NodeTag,
    /// The grammar's native node kind, kept as a label for logs and output.
    pub kind: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl ContextNode {
    /// Line-count extent — the comparison key for "largest enclosing node".
    pub fn span(&self) -> usize {
        self.end_line - self.start_line
    }

    /// Whether this node's line span fully contains `range`. Columns are
    /// ignored; diffs are line-oriented.
    pub fn contains(&self, range: LineRange) -> bool {
        self.start_line <= range.start && range.end <= self.end_line
    }

    /// Slice the node's lines out of the original source text.
    pub fn snippet(&self, source: &str) -> String {
        source
            .lines()
            .skip(self.start_line)
            .take(self.end_line - self.start_line + 1)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of a dry-run parse. Always constructed, never thrown past the
/// prechecker boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub valid: bool,
    pub error: Option<String>,
}

impl ParseOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Grammar trait
// ---------------------------------------------------------------------------

pub trait Grammar: Send + Sync {
    fn language(&self) -> tree_sitter::Language;
    fn file_extensions(&self) -> &[&str];
    /// Map a native node kind onto the normalized tag, or `None` for kinds
    /// the resolver should ignore.
    fn node_tag(&self, kind: &str) -> Option<NodeTag>;
}

// ---------------------------------------------------------------------------
// Registry (the language dispatcher)
// ---------------------------------------------------------------------------

pub struct GrammarRegistry {
    grammars: Vec<Box<dyn Grammar>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            grammars: Vec::new(),
        };
        registry.register(Box::new(python::PythonGrammar));
        registry.register(Box::new(typescript::TypeScriptGrammar));
        registry.register(Box::new(typescript::TsxGrammar));
        registry.register(Box::new(rust_lang::RustGrammar));
        registry.register(Box::new(go::GoGrammar));
        registry
    }

    pub fn register(&mut self, grammar: Box<dyn Grammar>) {
        self.grammars.push(grammar);
    }

    /// Look up the grammar that handles a given file extension (without the dot).
    pub fn for_extension(&self, ext: &str) -> Option<&dyn Grammar> {
        self.grammars
            .iter()
            .find(|g| g.file_extensions().contains(&ext))
            .map(|g| g.as_ref())
    }

    /// Dispatch a file path to its grammar. An unknown or missing extension
    /// is `UnsupportedLanguage` — recoverable, the caller skips structural
    /// context for that file only.
    pub fn for_path(&self, path: &Path) -> Result<&dyn Grammar, ContextError> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.for_extension(ext))
            .ok_or_else(|| ContextError::unsupported(path))
    }

    /// Detect the language name for a file path based on its extension.
    pub fn detect_language(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        let grammar = self.for_extension(ext)?;
        // Return the first extension as the canonical language name.
        Some(grammar.file_extensions()[0])
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}
