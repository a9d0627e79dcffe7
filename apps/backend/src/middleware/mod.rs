pub mod cors;
pub mod structured_logger;

pub use cors::cors_middleware;
pub use structured_logger::StructuredLogger;
