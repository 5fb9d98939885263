//! WordPress REST API access: endpoints, HTTP transport and content types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::WpClient;
pub use endpoints::Endpoints;
