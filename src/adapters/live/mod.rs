//! Live adapters that talk to real HTTP endpoints.

pub mod http_fetcher;
pub mod openai;
