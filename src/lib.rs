pub mod api;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
