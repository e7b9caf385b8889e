//! HTTP adapters for the remote chat service

pub mod auth;
pub mod chat;
pub mod protocol;
