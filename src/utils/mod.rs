//! Shared helpers: short-code generation and Wildberries URL derivation.

pub mod codegen;
pub mod wildberries;
