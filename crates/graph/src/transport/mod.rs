//! Transport layer for the Graph client.

pub mod http;

pub use http::HttpTransport;
