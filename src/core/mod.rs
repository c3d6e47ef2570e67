// File: src/core/mod.rs
pub mod compare;
pub mod engine;
pub mod reference;
pub mod rolling;
pub mod trie;
pub mod types;
pub mod vocab;
