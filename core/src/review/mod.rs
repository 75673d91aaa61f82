pub mod context;
pub mod diff;
pub mod pipeline;
pub mod types;

pub use context::ContextBuilder;
pub use pipeline::{CommentSink, FileContentSource, ReviewGenerator, ReviewPipeline};
pub use types::{
    BranchDetails, ChangedFile, CodeSuggestion, ContextSnippet, FallbackReason, FileContext,
    Review,
};
