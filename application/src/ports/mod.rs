//! Port definitions (interfaces to the outside world)

pub mod auth_gateway;
pub mod chat_gateway;
pub mod conversation_store;
pub mod preference_store;
