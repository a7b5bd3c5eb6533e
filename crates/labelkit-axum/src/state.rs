//! Router state.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Core facade, object store and URL signer, cloned into every handler.
pub type AppState = Arc<AxumContext>;
