use tree_sitter::Language;

use super::{Grammar, NodeTag};

pub struct GoGrammar;

impl Grammar for GoGrammar {
    fn language(&self) -> Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
    }

    fn node_tag(&self, kind: &str) -> Option<NodeTag> {
        match kind {
            "function_declaration" | "method_declaration" | "func_literal" => {
                Some(NodeTag::Function)
            }
            "type_declaration" => Some(NodeTag::Class),
            "source_file" => Some(NodeTag::Module),
            _ => None,
        }
    }
}
