pub mod chat;
pub mod command;
pub mod command_adapter;
pub mod error;
pub mod health;
