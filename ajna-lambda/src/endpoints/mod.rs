pub mod chat;
pub mod devices;
pub mod health;
pub mod llm;
pub mod notify;
