//! Symbol extraction from AST and language parsing

pub mod ast_extractor;
pub mod language_parsers;
pub mod signature_analyzer;

pub use ast_extractor::ASTExtractor;
pub use language_parsers::LanguageParsers;
pub use signature_analyzer::SignatureAnalyzer;
