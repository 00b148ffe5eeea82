//! Remote text-completion over HTTP.

pub mod client;

pub use client::HttpCompletionClient;
