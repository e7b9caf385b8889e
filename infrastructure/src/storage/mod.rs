//! File-backed storage adapters

pub mod conversations;
pub mod kv;
pub mod preferences;
