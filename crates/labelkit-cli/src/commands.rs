//! Subcommands and their shared argument groups.

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Run one evaluation in-process
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "LABELKIT_PORT", default_value_t = labelkit_axum::bootstrap::DEFAULT_PORT)]
    pub port: u16,

    /// Allowed CORS origins (all origins when omitted)
    #[arg(long = "cors-origin", env = "LABELKIT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Project id
    #[arg(long)]
    pub project: i64,

    /// Prompt template id
    #[arg(long)]
    pub prompt: i64,

    /// Inspection spec id
    #[arg(long)]
    pub spec: i64,

    /// Print the finished run with its detail rows as JSON
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

/// Database, storage and classifier settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct RuntimeArgs {
    /// SQLite database file
    #[arg(long, env = "LABELKIT_DATABASE", default_value = "data/labelkit.db")]
    pub database: PathBuf,

    /// Directory for dataset blobs (ignored when an S3 endpoint is set)
    #[arg(long, env = "LABELKIT_STORAGE_DIR", default_value = "data/objects")]
    pub storage_dir: PathBuf,

    /// Path-style S3-compatible gateway, e.g. http://localhost:9000
    #[arg(long, env = "LABELKIT_S3_ENDPOINT", requires = "s3_bucket")]
    pub s3_endpoint: Option<String>,

    #[arg(long, env = "LABELKIT_S3_BUCKET")]
    pub s3_bucket: Option<String>,

    /// Bearer token for the gateway
    #[arg(long, env = "LABELKIT_S3_TOKEN", hide_env_values = true)]
    pub s3_token: Option<String>,

    /// Externally reachable base URL used in download links
    #[arg(long, env = "LABELKIT_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Secret for signing download links
    #[arg(long, env = "LABELKIT_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Vision model used for classification
    #[arg(long, env = "LABELKIT_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Classification calls in flight per run
    #[arg(long, env = "LABELKIT_MAX_CONCURRENCY", default_value_t = labelkit_core::config::DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use crate::commands::Commands;
    use clap::Parser;

    #[test]
    fn test_evaluate_args() {
        let cli = Cli::parse_from([
            "labelkit", "evaluate", "--project", "1", "--prompt", "2", "--spec", "3", "--wait",
        ]);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!((args.project, args.prompt, args.spec), (1, 2, 3));
        assert!(args.wait);
    }

    #[test]
    fn test_evaluate_requires_ids() {
        assert!(Cli::try_parse_from(["labelkit", "evaluate", "--project", "1"]).is_err());
    }

    #[test]
    fn test_serve_s3_args() {
        let cli = Cli::parse_from([
            "labelkit",
            "serve",
            "--port",
            "8080",
            "--s3-endpoint",
            "http://minio:9000",
            "--s3-bucket",
            "labels",
            "--cors-origin",
            "https://a.example,https://b.example",
        ]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 8080);
        assert_eq!(args.runtime.s3_bucket.as_deref(), Some("labels"));
        assert_eq!(args.cors_origins.len(), 2);
    }

    #[test]
    fn test_s3_endpoint_requires_bucket() {
        let result = Cli::try_parse_from([
            "labelkit",
            "serve",
            "--s3-endpoint",
            "http://minio:9000",
        ]);
        // A bucket from the environment would satisfy the requirement.
        if std::env::var_os("LABELKIT_S3_BUCKET").is_none() {
            assert!(result.is_err());
        }
    }
}
