//! campsync_client - caching API client and CLI for campsync.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;

pub use client::CampsyncClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
