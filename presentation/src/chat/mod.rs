//! Interactive chat REPL

pub mod repl;
