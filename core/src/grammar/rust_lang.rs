use tree_sitter::Language;

use super::{Grammar, NodeTag};

pub struct RustGrammar;

impl Grammar for RustGrammar {
    fn language(&self) -> Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn node_tag(&self, kind: &str) -> Option<NodeTag> {
        match kind {
            "function_item" => Some(NodeTag::Function),
            // Type-shaped declarations all normalize to Class; an impl block
            // is the closest thing Rust has to a method-owning class body.
            "struct_item" | "enum_item" | "trait_item" | "impl_item" => Some(NodeTag::Class),
            "source_file" | "mod_item" => Some(NodeTag::Module),
            _ => None,
        }
    }
}
