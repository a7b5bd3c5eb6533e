#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use commands::{Commands, EvaluateArgs, RuntimeArgs, ServeArgs};
pub use logging::init_tracing;
pub use parser::Cli;
