pub mod chat;
pub mod device;
pub mod errors;
pub mod notifications;
