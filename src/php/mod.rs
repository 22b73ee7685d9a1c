//! Lightweight PHP source inspection
//!
//! A best-effort lexical scan, not a parser: it finds the declared class of a
//! file and reads a few literal values for usage examples. Everything the
//! resolver needs from file contents goes through this module.

pub mod declarations;
pub mod lexer;
pub mod literals;

pub use declarations::{ClassDeclaration, detect_declared_type, parse_class_declaration};
pub use literals::{command_name, first_returned_key, read_string_property};
