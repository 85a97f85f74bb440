//! Vision answer providers

pub mod http;

pub use http::HttpVisionProvider;
