//! Command handlers.

pub mod evaluate;
pub mod serve;
