use tree_sitter::{Node, Parser, Tree};

use crate::error::ContextError;
use crate::grammar::{ContextNode, Grammar, LineRange, ParseOutcome};

// ---------------------------------------------------------------------------
// ContextResolver
// ---------------------------------------------------------------------------

/// Resolves the enclosing syntactic unit for a changed-line range. Holds no
/// state beyond the grammar it dispatches through: every call parses fresh
/// and discards the tree before returning, so calls are independent and a
/// caller may fan out one resolution per file.
pub struct ContextResolver<'a> {
    grammar: &'a dyn Grammar,
}

impl<'a> ContextResolver<'a> {
    pub fn new(grammar: &'a dyn Grammar) -> Self {
        Self { grammar }
    }

    /// Parse `source` into a fresh tree, rejecting malformed input.
    ///
    /// Tree-sitter recovers from syntax errors by inserting ERROR/MISSING
    /// nodes instead of failing, which would hand the walk a partial tree.
    /// A tree with any error node is rejected here with the first error's
    /// position as the diagnostic, so downstream only ever sees well-formed
    /// trees.
    pub fn parse(&self, source: &str) -> Result<Tree, ContextError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.grammar.language())
            .map_err(|e| ContextError::parse(format!("failed to load grammar: {e}")))?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| ContextError::parse("parser returned no tree"))?;

        if tree.root_node().has_error() {
            let message = match first_error_node(&tree.root_node()) {
                Some(node) => format!(
                    "syntax error at line {}, column {}",
                    node.start_position().row + 1,
                    node.start_position().column + 1
                ),
                None => "syntax error".to_string(),
            };
            return Err(ContextError::parse(message));
        }
        Ok(tree)
    }

    /// Attempt a parse solely to test validity, discarding the tree. Total:
    /// any parser failure becomes `{valid: false, error}`. Shares the parse
    /// path with [`find_enclosing_context`](Self::find_enclosing_context),
    /// so the two agree on every input.
    pub fn dry_run(&self, source: &str) -> ParseOutcome {
        match self.parse(source) {
            Ok(_) => ParseOutcome::ok(),
            Err(e) => ParseOutcome::invalid(e.to_string()),
        }
    }

    /// Find the syntactic unit enclosing `range`.
    ///
    /// Walks every node of the tree in pre-order; among nodes whose
    /// normalized tag is function/class/module and whose line span fully
    /// contains the range, the one with the largest span wins — the caller
    /// wants the broadest unit of surrounding context, not the tightest.
    /// Equal spans keep the node encountered later in pre-order; equal-span
    /// candidates on the same path are nested, so this prefers the innermost
    /// (a class filling the whole file beats the module root). Deterministic
    /// for a given tree.
    ///
    /// `Ok(None)` means no node contains the range (e.g. the range lies past
    /// the last line of the file) and is a normal outcome, not an error.
    pub fn find_enclosing_context(
        &self,
        source: &str,
        range: LineRange,
    ) -> Result<Option<ContextNode>, ContextError> {
        let tree = self.parse(source)?;
        let root = tree.root_node();

        let mut best: Option<ContextNode> = None;
        let mut stack: Vec<Node> = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(tag) = self.grammar.node_tag(node.kind()) {
                let start = node.start_position();
                let end = node.end_position();
                // A node ending at column 0 of a row (the file root after a
                // trailing newline) does not occupy that row.
                let end_row = if end.column == 0 && end.row > start.row {
                    end.row - 1
                } else {
                    end.row
                };
                if start.row <= range.start && range.end <= end_row {
                    let span = end_row - start.row;
                    if best.as_ref().is_none_or(|b| span >= b.span()) {
                        best = Some(ContextNode {
                            tag,
                            kind: node.kind().to_string(),
                            start_line: start.row,
                            end_line: end_row,
                            start_column: start.column,
                            end_column: end.column,
                        });
                    }
                }
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }

        match &best {
            Some(ctx) => tracing::trace!(
                tag = ctx.tag.as_str(),
                kind = %ctx.kind,
                start = ctx.start_line,
                end = ctx.end_line,
                "resolved enclosing context"
            ),
            None => tracing::trace!(
                start = range.start,
                end = range.end,
                "no enclosing node for range"
            ),
        }
        Ok(best)
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error_node<'t>(root: &Node<'t>) -> Option<Node<'t>> {
    let mut stack: Vec<Node> = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    None
}
