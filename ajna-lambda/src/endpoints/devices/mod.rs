pub mod heartbeat;
pub mod list;
pub mod register;
