pub mod authentication;
pub mod config;
pub mod logging;
pub mod requests;
pub mod responses;
