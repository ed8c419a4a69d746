//! Configuration types module

pub mod app;
pub mod facades;
pub mod logging;
pub mod registry;

pub use app::AppConfig;
pub use facades::FacadeConfig;
pub use logging::LoggingConfig;
pub use registry::RegistryConfig;
