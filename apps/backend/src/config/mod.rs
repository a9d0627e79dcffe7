pub mod local;
pub mod server;

pub use local::LocalGameConfig;
pub use server::ServerConfig;
