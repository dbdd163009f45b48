// cloudbeaver-api: Async Rust client for the CloudBeaver GraphQL administration API

pub mod client;
pub mod error;
pub mod models;
pub mod teams;
pub mod transport;

pub use client::CloudBeaverClient;
pub use error::Error;
pub use models::Team;
pub use transport::TransportConfig;
