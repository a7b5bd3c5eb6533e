//! Built-in starter texts.

use axum::Json;
use labelkit_core::templates::{STARTER_INSPECTION_SPEC, STARTER_PROMPT_TEMPLATE};

use crate::dto::TemplatesResponse;

/// GET /api/templates
pub async fn starters() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        prompt_template: STARTER_PROMPT_TEMPLATE,
        inspection_spec: STARTER_INSPECTION_SPEC,
    })
}
