pub mod power_service;
pub mod system_resolver;
