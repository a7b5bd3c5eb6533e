//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::config::EvaluationConfig;
use crate::ports::{ClassifierPort, ObjectStorePort, Repos};

use super::{
    CriteriaService, DatasetService, EvaluationService, LabelService, ProjectService,
    PromptService, SpecService,
};

/// The core application facade.
///
/// `AppCore` provides access to all core services. It's constructed at the
/// adapter's composition root (main.rs or bootstrap.rs) with concrete
/// implementations of repositories, the object store and the classifier.
///
/// # Example
///
/// ```ignore
/// let repos = labelkit_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, store, classifier, EvaluationConfig::default());
///
/// let started = core.evaluations().start(project_id, prompt_id, spec_id).await?;
/// ```
pub struct AppCore {
    projects: ProjectService,
    labels: LabelService,
    files: DatasetService,
    criterias: CriteriaService,
    specs: SpecService,
    prompts: PromptService,
    evaluations: EvaluationService,
    config: EvaluationConfig,
}

impl AppCore {
    /// Wire every service from the repository container and adapters.
    pub fn new(
        repos: Repos,
        store: Arc<dyn ObjectStorePort>,
        classifier: Arc<dyn ClassifierPort>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            projects: ProjectService::new(
                Arc::clone(&repos.projects),
                Arc::clone(&repos.labels),
                Arc::clone(&repos.files),
                Arc::clone(&store),
            ),
            labels: LabelService::new(
                Arc::clone(&repos.labels),
                Arc::clone(&repos.projects),
                Arc::clone(&repos.files),
            ),
            files: DatasetService::new(
                Arc::clone(&repos.files),
                Arc::clone(&repos.labels),
                Arc::clone(&repos.projects),
                Arc::clone(&store),
                config.presign_ttl,
            ),
            criterias: CriteriaService::new(
                Arc::clone(&repos.criterias),
                Arc::clone(&repos.projects),
                Arc::clone(&repos.files),
            ),
            specs: SpecService::new(Arc::clone(&repos.specs), Arc::clone(&repos.projects)),
            prompts: PromptService::new(Arc::clone(&repos.prompts), Arc::clone(&repos.projects)),
            evaluations: EvaluationService::new(
                repos.evaluations,
                repos.prompts,
                repos.specs,
                repos.labels,
                repos.files,
                store,
                classifier,
                &config,
            ),
            config,
        }
    }

    pub const fn projects(&self) -> &ProjectService {
        &self.projects
    }

    pub const fn labels(&self) -> &LabelService {
        &self.labels
    }

    /// Access the dataset file service.
    pub const fn files(&self) -> &DatasetService {
        &self.files
    }

    pub const fn criterias(&self) -> &CriteriaService {
        &self.criterias
    }

    /// Access the inspection spec service.
    pub const fn specs(&self) -> &SpecService {
        &self.specs
    }

    /// Access the prompt template service.
    pub const fn prompts(&self) -> &PromptService {
        &self.prompts
    }

    /// Access the evaluation service.
    pub const fn evaluations(&self) -> &EvaluationService {
        &self.evaluations
    }

    pub const fn config(&self) -> &EvaluationConfig {
        &self.config
    }
}
