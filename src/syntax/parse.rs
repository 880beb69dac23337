//! The external-parser seam.
//!
//! One parse call per snapshot, yielding a concrete syntax tree with byte
//! offsets. Everything downstream works on the tree plus the original text;
//! no other component touches the parser.

use thiserror::Error;
use tree_sitter::{Language, Parser, Tree};

/// Failure at the parser seam.
///
/// These are the only conditions the engine cannot absorb locally; the
/// orchestrator reacts by leaving the document unchanged.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("incompatible TypeScript grammar")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    NoTree,
}

/// Parse one TypeScript snapshot.
pub fn parse(text: &str) -> Result<Tree, ParseError> {
    let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    parser.parse(text, None).ok_or(ParseError::NoTree)
}
