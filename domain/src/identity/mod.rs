//! Identity and storage scoping

pub mod entities;
pub mod scope;
