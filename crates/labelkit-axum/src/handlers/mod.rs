//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for one API area. Handlers are thin
//! wrappers that delegate to the `AppCore` services.

pub mod criterias;
pub mod evaluations;
pub mod files;
pub mod labels;
pub mod objects;
pub mod projects;
pub mod prompts;
pub mod specs;
pub mod templates;
