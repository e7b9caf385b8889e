//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileChatConfig, FileConfig, FileServerConfig, FileStorageConfig};
pub use loader::ConfigLoader;
