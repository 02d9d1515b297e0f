// src/parser/mod.rs

pub mod error;
pub mod scan;
pub mod symbols;

pub use error::TheoryError;
pub use scan::{scan_root, RootSymbol};
