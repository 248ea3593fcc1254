pub mod cloudwatch_services;
pub mod device_registry;
pub mod generation_services;
pub mod notification_services;
