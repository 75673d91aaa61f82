use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::grammar::GrammarRegistry;

use super::context::ContextBuilder;
use super::types::{BranchDetails, ChangedFile, CodeSuggestion, FileContext, Review};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Fetches a file's full contents at a given ref. `Ok(None)` means the file
/// does not exist there (deleted in the pull request, or a bad path from a
/// stale diff) — not an error.
#[async_trait]
pub trait FileContentSource: Send + Sync {
    async fn fetch(&self, branch: &BranchDetails, path: &str) -> anyhow::Result<Option<String>>;
}

/// The review-text generation step: context in, review out. Opaque to this
/// crate.
#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate(&self, files: &[FileContext]) -> anyhow::Result<Review>;
}

/// Posts review comments back to the host. At-least-once: a failed post may
/// be retried by the implementation, and per-comment errors are logged by
/// the pipeline rather than propagated.
#[async_trait]
pub trait CommentSink: Send + Sync {
    async fn post_general(&self, comment: &str) -> anyhow::Result<()>;
    async fn post_inline(&self, suggestion: &CodeSuggestion) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives one pull-request review: fan out context building across the
/// changed files, fan in, generate the review once, and apply it through
/// the sink.
pub struct ReviewPipeline {
    registry: Arc<GrammarRegistry>,
    generator: Arc<dyn ReviewGenerator>,
    sink: Arc<dyn CommentSink>,
}

impl ReviewPipeline {
    pub fn new(
        registry: Arc<GrammarRegistry>,
        generator: Arc<dyn ReviewGenerator>,
        sink: Arc<dyn CommentSink>,
    ) -> Self {
        Self {
            registry,
            generator,
            sink,
        }
    }

    /// Fill in missing file contents from the source. A fetch failure for
    /// one file leaves its contents `None` (it degrades to patch-only
    /// context later) and never aborts the others.
    pub async fn hydrate(
        &self,
        source: &dyn FileContentSource,
        branch: &BranchDetails,
        files: &mut [ChangedFile],
    ) {
        for file in files.iter_mut() {
            if file.contents.is_some() {
                continue;
            }
            match source.fetch(branch, &file.path).await {
                Ok(contents) => file.contents = contents,
                Err(e) => {
                    tracing::warn!(path = %file.path, error = %e, "failed to fetch contents");
                }
            }
        }
    }

    /// Build context for every changed file concurrently. Each file's
    /// resolution is pure and independent, so this is a plain fan-out/fan-in
    /// with no ordering requirement; results come back in input order.
    pub async fn build_contexts(&self, files: Vec<ChangedFile>) -> Vec<FileContext> {
        let mut set: JoinSet<(usize, FileContext)> = JoinSet::new();
        for (idx, file) in files.into_iter().enumerate() {
            let registry = Arc::clone(&self.registry);
            set.spawn_blocking(move || {
                let ctx = ContextBuilder::new(&registry).build(&file);
                (idx, ctx)
            });
        }

        let mut contexts: Vec<(usize, FileContext)> = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(pair) => contexts.push(pair),
                Err(e) => {
                    tracing::error!(error = %e, "context task panicked");
                }
            }
        }
        contexts.sort_by_key(|(idx, _)| *idx);
        contexts.into_iter().map(|(_, ctx)| ctx).collect()
    }

    /// Run the whole review for one pull request. The only fatal error is a
    /// generator failure; everything file-scoped has already degraded by
    /// the time the generator runs.
    pub async fn run(&self, files: Vec<ChangedFile>) -> anyhow::Result<Review> {
        let contexts = self.build_contexts(files).await;
        tracing::info!(
            files = contexts.len(),
            degraded = contexts.iter().filter(|c| c.fallback.is_some()).count(),
            "contexts built"
        );

        let review = self.generator.generate(&contexts).await?;
        self.apply(&review).await;
        Ok(review)
    }

    /// Post the review: one optional general comment plus the inline
    /// suggestions. Post failures are logged and swallowed — a lost comment
    /// must never abort the rest of the review.
    pub async fn apply(&self, review: &Review) {
        if let Some(comment) = review.comment.as_deref() {
            if let Err(e) = self.sink.post_general(comment).await {
                tracing::warn!(error = %e, "failed to post general comment");
            }
        }
        for suggestion in &review.suggestions {
            if let Err(e) = self.sink.post_inline(suggestion).await {
                tracing::warn!(
                    file = %suggestion.file,
                    line = suggestion.line_end,
                    error = %e,
                    "failed to post inline suggestion"
                );
            }
        }
    }
}
