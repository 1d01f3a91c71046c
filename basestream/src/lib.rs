// Export tokio for convenience
pub use tokio;

// Our modules
pub mod channels;
pub mod config;
pub mod consumers;
pub mod decoder;
pub mod errors;
pub mod grpc;
pub mod logging;
pub mod proto;
pub mod record;
pub mod submitter;
pub mod transport;
pub mod tx;
pub mod ws;
