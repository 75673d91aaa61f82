use tree_sitter::Language;

use super::{Grammar, NodeTag};

pub struct TypeScriptGrammar;
pub struct TsxGrammar;

impl Grammar for TypeScriptGrammar {
    fn language(&self) -> Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["ts", "js", "mjs", "cjs"]
    }

    fn node_tag(&self, kind: &str) -> Option<NodeTag> {
        ts_node_tag(kind)
    }
}

impl Grammar for TsxGrammar {
    fn language(&self) -> Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["tsx", "jsx"]
    }

    fn node_tag(&self, kind: &str) -> Option<NodeTag> {
        ts_node_tag(kind)
    }
}

/// Shared kind table — the TSX grammar is a superset of TypeScript's and
/// uses the same names for every construct we care about.
fn ts_node_tag(kind: &str) -> Option<NodeTag> {
    match kind {
        "function_declaration"
        | "function_expression"
        | "generator_function_declaration"
        | "arrow_function"
        | "method_definition" => Some(NodeTag::Function),
        "class_declaration" | "interface_declaration" => Some(NodeTag::Class),
        "program" | "internal_module" => Some(NodeTag::Module),
        _ => None,
    }
}
