use crate::grammar::{GrammarRegistry, LineRange};
use crate::resolver::ContextResolver;

use super::diff::changed_ranges;
use super::types::{ChangedFile, ContextSnippet, FallbackReason, FileContext};

// ---------------------------------------------------------------------------
// Line numbering
// ---------------------------------------------------------------------------

/// Prefix each line of `text` with its absolute 1-based file line number,
/// starting at row `first_line` (0-indexed). Generators anchor their inline
/// suggestions to these numbers.
pub fn add_line_numbers(text: &str, first_line: usize) -> String {
    text.lines()
        .enumerate()
        .map(|(idx, line)| format!("{}: {}", first_line + idx + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slice `range` out of `source` as raw text. Lines past end-of-file simply
/// do not appear — an empty result is fine, not an error.
fn raw_range_text(source: &str, range: LineRange) -> String {
    source
        .lines()
        .skip(range.start)
        .take(range.end - range.start + 1)
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// ContextBuilder
// ---------------------------------------------------------------------------

/// Builds the per-file review input: dispatch to a grammar, precheck
/// parseability, resolve the enclosing unit for each changed hunk, and
/// degrade per the documented fallbacks when any step cannot deliver.
pub struct ContextBuilder<'a> {
    registry: &'a GrammarRegistry,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(registry: &'a GrammarRegistry) -> Self {
        Self { registry }
    }

    /// Build context for one changed file. Never fails: every error class is
    /// file-scoped and recorded as a fallback on the returned `FileContext`.
    ///
    /// The two degraded classes are logged distinctly — "could not be
    /// parsed" and "no containing node" are different failure modes and the
    /// distinction matters when reading the logs of a review run.
    pub fn build(&self, file: &ChangedFile) -> FileContext {
        let path = std::path::Path::new(&file.path);
        let language = self.registry.detect_language(path).map(str::to_string);

        let grammar = match self.registry.for_path(path) {
            Ok(g) => g,
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "skipping structural context");
                return self.fallback(file, language, FallbackReason::UnsupportedLanguage);
            }
        };

        let Some(contents) = file.contents.as_deref() else {
            tracing::warn!(path = %file.path, "no contents supplied, using patch only");
            return self.fallback(file, language, FallbackReason::MissingContents);
        };

        let resolver = ContextResolver::new(grammar);
        let outcome = resolver.dry_run(contents);
        if !outcome.valid {
            let error = outcome.error.unwrap_or_else(|| "unknown".to_string());
            tracing::warn!(path = %file.path, error = %error, "file could not be parsed");
            return self.fallback(file, language, FallbackReason::Unparseable(error));
        }

        let ranges = file
            .patch
            .as_deref()
            .map(changed_ranges)
            .unwrap_or_default();

        let mut snippets = Vec::with_capacity(ranges.len());
        for range in ranges {
            // The dry run passed, so resolution can only fail if the two
            // disagree — treat that as unparseable for the whole file.
            let enclosing = match resolver.find_enclosing_context(contents, range) {
                Ok(ctx) => ctx,
                Err(e) => {
                    tracing::warn!(path = %file.path, error = %e, "resolution failed after dry run");
                    return self.fallback(file, language, FallbackReason::Unparseable(e.to_string()));
                }
            };

            let (first_line, text) = match &enclosing {
                Some(node) => (node.start_line, node.snippet(contents)),
                None => {
                    tracing::debug!(
                        path = %file.path,
                        start = range.start,
                        end = range.end,
                        "no containing node, using raw hunk lines"
                    );
                    (range.start, raw_range_text(contents, range))
                }
            };

            snippets.push(ContextSnippet {
                range,
                text: add_line_numbers(&text, first_line),
                enclosing,
            });
        }

        FileContext {
            path: file.path.clone(),
            language,
            snippets,
            fallback: None,
            patch: file.patch.clone(),
        }
    }

    fn fallback(
        &self,
        file: &ChangedFile,
        language: Option<String>,
        reason: FallbackReason,
    ) -> FileContext {
        FileContext {
            path: file.path.clone(),
            language,
            snippets: Vec::new(),
            fallback: Some(reason),
            patch: file.patch.clone(),
        }
    }
}
