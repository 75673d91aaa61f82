use tree_sitter::Language;

use super::{Grammar, NodeTag};

pub struct PythonGrammar;

impl Grammar for PythonGrammar {
    fn language(&self) -> Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn node_tag(&self, kind: &str) -> Option<NodeTag> {
        match kind {
            "function_definition" => Some(NodeTag::Function),
            "class_definition" => Some(NodeTag::Class),
            "module" => Some(NodeTag::Module),
            _ => None,
        }
    }
}
