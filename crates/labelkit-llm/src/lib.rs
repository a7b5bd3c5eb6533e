#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// OpenAiClassifier is used through ClassifierPort; its backend parameter stays internal.
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod parsing;

// ============================================================================
// Public API
// ============================================================================

pub use client::OpenAiClassifier;
pub use config::LlmClientConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
