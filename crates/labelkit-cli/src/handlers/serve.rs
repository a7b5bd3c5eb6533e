//! Serve command handler.

use anyhow::Result;

use crate::commands::ServeArgs;

pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = args.runtime.to_server_config(args.port);
    if !args.cors_origins.is_empty() {
        config = config.with_allowed_origins(args.cors_origins);
    }
    labelkit_axum::start_server(config).await
}
