pub mod auth;
pub mod chat;
pub mod order;
pub mod stats;
