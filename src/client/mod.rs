//! Transport adapters for the admin server.

pub mod http;

pub use http::HttpAdminClient;
