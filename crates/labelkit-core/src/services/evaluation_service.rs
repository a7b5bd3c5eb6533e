//! Evaluation service - runs a compiled prompt against a project's dataset.
//!
//! `start` does the synchronous part: it resolves the prompt template and
//! inspection spec, compiles the final prompt, inserts a `running` run and
//! spawns the detached fan-out. The fan-out classifies every labeled file
//! through a bounded worker pool, writes one detail row per successful
//! classification and finally applies a single guarded terminal update.
//!
//! Per-file failures (object store, classifier, detail insert) are logged and
//! excluded from the score. They never fail the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::config::EvaluationConfig;
use crate::domain::{
    DatasetFile, EvalDetail, EvalResult, EvaluationOutcome, EvaluationWithDetails,
    NewEvalDetail, NewPromptEvaluation, PromptEvaluation, Score,
};
use crate::ports::{
    ClassificationRequest, ClassifierPort, CoreError, DatasetRepository, EvaluationRepository,
    InspectionSpecRepository, LabelRepository, ObjectStorePort, PromptTemplateRepository,
};
use crate::prompt;

use super::not_found;

// ============================================================================
// Public types
// ============================================================================

/// How the detached part of a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunCompletion {
    /// The terminal update was written.
    Completed(EvaluationOutcome),
    /// The run was deleted (or already terminal) before the terminal update.
    Abandoned,
    /// The terminal update could not be written; the run is left `running`.
    Unrecorded(EvaluationOutcome),
}

/// Handle to a run whose fan-out is in flight.
///
/// Dropping `completion` detaches the task; it keeps running.
#[derive(Debug)]
pub struct StartedEvaluation {
    pub run: PromptEvaluation,
    pub completion: JoinHandle<RunCompletion>,
}

// ============================================================================
// Service
// ============================================================================

pub struct EvaluationService {
    repo: Arc<dyn EvaluationRepository>,
    prompts: Arc<dyn PromptTemplateRepository>,
    specs: Arc<dyn InspectionSpecRepository>,
    labels: Arc<dyn LabelRepository>,
    files: Arc<dyn DatasetRepository>,
    store: Arc<dyn ObjectStorePort>,
    classifier: Arc<dyn ClassifierPort>,
    max_concurrency: usize,
}

impl EvaluationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: Arc<dyn EvaluationRepository>,
        prompts: Arc<dyn PromptTemplateRepository>,
        specs: Arc<dyn InspectionSpecRepository>,
        labels: Arc<dyn LabelRepository>,
        files: Arc<dyn DatasetRepository>,
        store: Arc<dyn ObjectStorePort>,
        classifier: Arc<dyn ClassifierPort>,
        config: &EvaluationConfig,
    ) -> Self {
        Self {
            repo,
            prompts,
            specs,
            labels,
            files,
            store,
            classifier,
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    /// Create a run and spawn its fan-out.
    ///
    /// Returns as soon as the `running` row exists. Fails with `NotFound` when
    /// the prompt template or spec is missing or belongs to another project;
    /// in that case nothing is written and nothing is spawned.
    pub async fn start(
        &self,
        project_id: i64,
        prompt_id: i64,
        spec_id: i64,
    ) -> Result<StartedEvaluation, CoreError> {
        let template = self
            .prompts
            .get(prompt_id)
            .await
            .map_err(not_found("Prompt template", prompt_id))?;
        if template.project_id != project_id {
            return Err(CoreError::NotFound(format!("Prompt template {prompt_id}")));
        }

        let spec = self
            .specs
            .get(spec_id)
            .await
            .map_err(not_found("Inspection spec", spec_id))?;
        if spec.project_id != project_id {
            return Err(CoreError::NotFound(format!("Inspection spec {spec_id}")));
        }

        let label_names: Vec<String> = self
            .labels
            .list_for_project(project_id)
            .await?
            .into_iter()
            .map(|l| l.name)
            .collect();

        let final_prompt = prompt::compile(&template.text, &spec.text, &label_names);

        let run = self
            .repo
            .insert_run(&NewPromptEvaluation {
                project_id,
                prompt_id,
                spec_id,
                final_prompt: final_prompt.clone(),
            })
            .await?;

        tracing::info!(
            run_id = run.id,
            project_id,
            prompt_id,
            spec_id,
            "Evaluation run created"
        );

        let fan_out = FanOut {
            run_id: run.id,
            project_id,
            prompt: Arc::from(final_prompt),
            labels: Arc::from(label_names),
            repo: Arc::clone(&self.repo),
            files: Arc::clone(&self.files),
            store: Arc::clone(&self.store),
            classifier: Arc::clone(&self.classifier),
            max_concurrency: self.max_concurrency,
            abandoned: AtomicBool::new(false),
        };
        let completion = tokio::spawn(Arc::new(fan_out).run());

        Ok(StartedEvaluation { run, completion })
    }

    /// List a project's runs, newest first.
    pub async fn list(&self, project_id: i64) -> Result<Vec<PromptEvaluation>, CoreError> {
        self.repo.list_runs(project_id).await.map_err(CoreError::from)
    }

    pub async fn get(&self, id: i64) -> Result<PromptEvaluation, CoreError> {
        self.repo.get_run(id).await.map_err(not_found("Evaluation", id))
    }

    /// Detail rows of a run, newest first.
    pub async fn details(&self, id: i64) -> Result<Vec<EvalDetail>, CoreError> {
        self.get(id).await?;
        self.repo.list_details(id).await.map_err(CoreError::from)
    }

    pub async fn get_with_details(&self, id: i64) -> Result<EvaluationWithDetails, CoreError> {
        let evaluation = self.get(id).await?;
        let details = self.repo.list_details(id).await?;
        Ok(EvaluationWithDetails {
            evaluation,
            details,
        })
    }

    /// Delete a run and its detail rows. An in-flight fan-out notices and stops.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo
            .delete_run(id)
            .await
            .map_err(not_found("Evaluation", id))?;
        tracing::info!(run_id = id, "Evaluation run deleted");
        Ok(())
    }
}

// ============================================================================
// Detached fan-out
// ============================================================================

/// State owned by one run's detached task.
struct FanOut {
    run_id: i64,
    project_id: i64,
    prompt: Arc<str>,
    labels: Arc<[String]>,
    repo: Arc<dyn EvaluationRepository>,
    files: Arc<dyn DatasetRepository>,
    store: Arc<dyn ObjectStorePort>,
    classifier: Arc<dyn ClassifierPort>,
    max_concurrency: usize,
    /// Set once any worker sees the run row gone.
    abandoned: AtomicBool,
}

/// Result of classifying every eligible file.
enum Settled {
    NoEligibleFiles,
    Scored(Score),
    Abandoned,
}

impl FanOut {
    async fn run(self: Arc<Self>) -> RunCompletion {
        let started = Instant::now();

        let outcome = match Arc::clone(&self).classify_all().await {
            Ok(Settled::Abandoned) => {
                tracing::info!(
                    run_id = self.run_id,
                    "Evaluation run deleted mid-flight; terminal update skipped"
                );
                return RunCompletion::Abandoned;
            }
            Ok(Settled::NoEligibleFiles) => {
                tracing::warn!(
                    run_id = self.run_id,
                    project_id = self.project_id,
                    "No labeled files to evaluate"
                );
                EvaluationOutcome::Failed {
                    num_dataset: None,
                    analysis_text: "Evaluation failed: the dataset has no labeled files"
                        .to_string(),
                }
            }
            Ok(Settled::Scored(score)) => {
                let outcome = EvaluationOutcome::from_score(score, rounded_secs(started.elapsed()));
                if score.total == 0 {
                    tracing::warn!(run_id = self.run_id, "Every classification call failed");
                }
                outcome
            }
            Err(e) => {
                tracing::error!(run_id = self.run_id, error = %e, "Evaluation run failed");
                EvaluationOutcome::failed(&e)
            }
        };

        match self.repo.complete_run(self.run_id, &outcome).await {
            Ok(true) => {
                tracing::info!(
                    run_id = self.run_id,
                    state = %outcome.state(),
                    score = ?outcome.score(),
                    duration_secs = ?outcome.duration_secs(),
                    num_dataset = ?outcome.num_dataset(),
                    "Evaluation run completed"
                );
                RunCompletion::Completed(outcome)
            }
            Ok(false) => {
                tracing::info!(
                    run_id = self.run_id,
                    "Evaluation run no longer running; terminal update skipped"
                );
                RunCompletion::Abandoned
            }
            Err(e) => {
                tracing::error!(
                    run_id = self.run_id,
                    error = %e,
                    "Failed to record evaluation outcome"
                );
                RunCompletion::Unrecorded(outcome)
            }
        }
    }

    /// Classify every eligible file through a bounded pool and tally the results.
    async fn classify_all(self: Arc<Self>) -> Result<Settled, CoreError> {
        let eligible: Vec<DatasetFile> = self
            .files
            .list_labeled(self.project_id)
            .await?
            .into_iter()
            .filter(DatasetFile::is_eligible)
            .collect();

        if eligible.is_empty() {
            return Ok(Settled::NoEligibleFiles);
        }

        tracing::debug!(
            run_id = self.run_id,
            files = eligible.len(),
            max_concurrency = self.max_concurrency,
            "Dispatching classifications"
        );

        let sem = Arc::new(Semaphore::new(self.max_concurrency));
        let mut handles = Vec::with_capacity(eligible.len());

        for file in eligible {
            let permit = Arc::clone(&sem)
                .acquire_owned()
                .await
                .map_err(|e| CoreError::Internal(format!("worker pool closed: {e}")))?;
            let this = Arc::clone(&self);
            let file_id = file.id;
            let h = tokio::spawn(async move {
                let _permit = permit;
                this.classify_file(file).await
            });
            handles.push((file_id, h));
        }

        let mut score = Score::default();
        for (file_id, h) in handles {
            match h.await {
                Ok(Ok(Some(result))) => score.record(result),
                Ok(Ok(None)) => {}
                Ok(Err(e)) => {
                    tracing::warn!(
                        run_id = self.run_id,
                        file_id,
                        error = %e,
                        "Classification failed for file; excluded from score"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        run_id = self.run_id,
                        file_id,
                        error = %e,
                        "Classification task aborted; excluded from score"
                    );
                }
            }
        }

        if self.abandoned.load(Ordering::Acquire) {
            return Ok(Settled::Abandoned);
        }
        Ok(Settled::Scored(score))
    }

    /// Classify one file and write its detail row.
    ///
    /// Returns `Ok(None)` when the run was deleted and the file was skipped.
    async fn classify_file(&self, file: DatasetFile) -> Result<Option<EvalResult>, CoreError> {
        if self.abandoned.load(Ordering::Acquire) {
            return Ok(None);
        }
        if !self.repo.run_exists(self.run_id).await? {
            self.abandoned.store(true, Ordering::Release);
            return Ok(None);
        }

        let Some(human_label) = file.human_label.as_deref() else {
            return Ok(None);
        };

        let image = self.store.get(&file.file_name).await?;
        let answer = self
            .classifier
            .classify(ClassificationRequest {
                prompt: self.prompt.to_string(),
                image,
                mime_type: file.effective_mime_type().to_string(),
                labels: self.labels.to_vec(),
            })
            .await?;

        let llm_label = answer.classification.trim().to_lowercase();
        let result = EvalResult::judge(&llm_label, human_label);

        self.repo
            .insert_detail(&NewEvalDetail {
                file_id: file.id,
                prompt_eval_id: self.run_id,
                llm_label,
                llm_reason: answer.explanation,
                result,
            })
            .await?;

        tracing::debug!(
            run_id = self.run_id,
            file_id = file.id,
            result = result.as_str(),
            "File classified"
        );
        Ok(Some(result))
    }
}

/// Elapsed wall-clock time in whole seconds, rounded half up.
fn rounded_secs(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis().saturating_add(500) / 1000).unwrap_or(i64::MAX)
}
