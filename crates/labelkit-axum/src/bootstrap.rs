//! Axum server bootstrap - the composition root.
//!
//! Database, object store, URL signer and classifier are constructed here
//! and nowhere else in the web adapter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use labelkit_core::{AppCore, ClassifierPort, EvaluationConfig, ObjectStorePort, Repos};
use labelkit_db::{CoreFactory, setup_database};
use labelkit_llm::{LlmClientConfig, OpenAiClassifier};
use labelkit_storage::{FsObjectStore, S3LikeStore, UrlSigner};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Where dataset blobs are kept.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Files under a local directory.
    Filesystem(PathBuf),
    /// Path-style HTTP object gateway.
    S3 {
        endpoint: String,
        bucket: String,
        token: Option<String>,
    },
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    pub storage: StorageBackend,
    pub llm: LlmClientConfig,
    pub evaluation: EvaluationConfig,
    /// HMAC secret for presigned download URLs. Generated at startup when unset.
    pub signing_secret: Option<String>,
    /// Externally reachable base URL, used in presigned download URLs.
    pub public_url: Option<String>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Local defaults: port 3000, `data/labelkit.db`, blobs under `data/objects`.
    pub fn with_defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: PathBuf::from("data").join("labelkit.db"),
            storage: StorageBackend::Filesystem(PathBuf::from("data").join("objects")),
            llm: LlmClientConfig::default(),
            evaluation: EvaluationConfig::default(),
            signing_secret: None,
            public_url: None,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_llm(mut self, llm: LlmClientConfig) -> Self {
        self.llm = llm;
        self
    }

    #[must_use]
    pub const fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    #[must_use]
    pub fn with_signing_secret(mut self, secret: Option<String>) -> Self {
        self.signing_secret = secret.filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn with_public_url(mut self, url: Option<String>) -> Self {
        self.public_url = url.filter(|u| !u.is_empty());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// Base URL for presigned links; defaults to `http://localhost:{port}`.
    pub fn resolved_public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Object store serving presigned downloads.
    pub store: Arc<dyn ObjectStorePort>,
    /// Signer that verifies presigned download URLs.
    pub signer: Arc<UrlSigner>,
}

/// Assemble the context from already-built adapters.
pub fn build_context(
    repos: Repos,
    store: Arc<dyn ObjectStorePort>,
    signer: Arc<UrlSigner>,
    classifier: Arc<dyn ClassifierPort>,
    evaluation: EvaluationConfig,
) -> AxumContext {
    let core = Arc::new(AppCore::new(
        repos,
        Arc::clone(&store),
        classifier,
        evaluation,
    ));
    AxumContext {
        core,
        store,
        signer,
    }
}

/// Build the object store for the configured backend.
pub async fn build_store(
    storage: &StorageBackend,
    signer: Arc<UrlSigner>,
) -> Result<Arc<dyn ObjectStorePort>> {
    let store: Arc<dyn ObjectStorePort> = match storage {
        StorageBackend::Filesystem(root) => Arc::new(
            FsObjectStore::open(root.clone(), signer)
                .await
                .with_context(|| format!("opening object directory {}", root.display()))?,
        ),
        StorageBackend::S3 {
            endpoint,
            bucket,
            token,
        } => Arc::new(
            S3LikeStore::new(endpoint.clone(), bucket.clone(), signer)?
                .with_bearer_token(token.clone()),
        ),
    };
    Ok(store)
}

/// Bootstrap the server with all services.
pub async fn bootstrap(config: ServerConfig) -> Result<AxumContext> {
    config.evaluation.validate()?;

    info!(
        database_path = %config.database_path.display(),
        storage = ?config.storage,
        model = %config.llm.model(),
        llm_base_url = %config.llm.base_url(),
        max_concurrency = config.evaluation.max_concurrency,
        "Axum bootstrap resolved configuration"
    );

    // 1. Database pool with full schema setup
    let pool = setup_database(&config.database_path).await?;
    let repos = CoreFactory::build_repos(pool);

    // 2. URL signer and object store
    let secret = config.signing_secret.clone().unwrap_or_else(|| {
        warn!("No signing secret configured; download URLs will not survive a restart");
        uuid::Uuid::new_v4().simple().to_string()
    });
    let signer = Arc::new(UrlSigner::new(secret, config.resolved_public_url()));
    let store = build_store(&config.storage, Arc::clone(&signer)).await?;

    // 3. Classifier
    if !config.llm.has_api_key() {
        warn!("No API key configured for the classifier; calls may be rejected");
    }
    let classifier: Arc<dyn ClassifierPort> = Arc::new(OpenAiClassifier::new(&config.llm)?);

    Ok(build_context(
        repos,
        store,
        signer,
        classifier,
        config.evaluation,
    ))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(config.clone()).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!("labelkit web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
