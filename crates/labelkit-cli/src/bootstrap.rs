//! Turns parsed arguments into the server configuration.

use labelkit_axum::{ServerConfig, StorageBackend};
use labelkit_core::EvaluationConfig;
use labelkit_llm::LlmClientConfig;

use crate::commands::RuntimeArgs;

impl RuntimeArgs {
    /// Build a [`ServerConfig`] for the given port.
    pub fn to_server_config(&self, port: u16) -> ServerConfig {
        let storage = match (&self.s3_endpoint, &self.s3_bucket) {
            (Some(endpoint), Some(bucket)) => StorageBackend::S3 {
                endpoint: endpoint.clone(),
                bucket: bucket.clone(),
                token: self.s3_token.clone(),
            },
            _ => StorageBackend::Filesystem(self.storage_dir.clone()),
        };

        let mut llm = LlmClientConfig::new()
            .with_model(self.model.clone())
            .with_optional_api_key(self.openai_api_key.clone());
        if let Some(base_url) = &self.openai_base_url {
            llm = llm.with_base_url(base_url.clone());
        }

        ServerConfig::with_defaults()
            .with_port(port)
            .with_database_path(self.database.clone())
            .with_storage(storage)
            .with_llm(llm)
            .with_evaluation(EvaluationConfig::default().with_max_concurrency(self.max_concurrency))
            .with_public_url(self.public_url.clone())
            .with_signing_secret(self.signing_secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> RuntimeArgs {
        RuntimeArgs {
            database: PathBuf::from("/tmp/l.db"),
            storage_dir: PathBuf::from("/tmp/objects"),
            s3_endpoint: None,
            s3_bucket: None,
            s3_token: None,
            public_url: None,
            signing_secret: Some("secret".to_string()),
            openai_base_url: Some("http://localhost:11434/v1".to_string()),
            openai_api_key: None,
            model: "llava".to_string(),
            max_concurrency: 3,
        }
    }

    #[test]
    fn test_filesystem_config() {
        let config = args().to_server_config(4000);
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/l.db"));
        assert!(matches!(config.storage, StorageBackend::Filesystem(ref p) if p == &PathBuf::from("/tmp/objects")));
        assert_eq!(config.evaluation.max_concurrency, 3);
        assert_eq!(config.llm.model(), "llava");
        assert_eq!(config.llm.base_url(), "http://localhost:11434/v1");
        assert_eq!(config.resolved_public_url(), "http://localhost:4000");
        assert_eq!(config.signing_secret.as_deref(), Some("secret"));
    }

    #[test]
    fn test_s3_config() {
        let mut args = args();
        args.s3_endpoint = Some("http://minio:9000".to_string());
        args.s3_bucket = Some("labels".to_string());
        let config = args.to_server_config(3000);
        assert!(matches!(
            config.storage,
            StorageBackend::S3 { ref bucket, .. } if bucket == "labels"
        ));
    }
}
