//! Evaluation run domain types.
//!
//! A run moves through a three-state machine:
//!
//! ```text
//! running ──► finished
//!    │
//!    └──────► failed
//! ```
//!
//! Both terminal states are final. A second terminal update is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// State machine
// ============================================================================

/// Lifecycle state of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationState {
    Running,
    Failed,
    Finished,
}

/// Rejected state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid evaluation transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: EvaluationState,
    pub to: EvaluationState,
}

impl EvaluationState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Finished => "finished",
        }
    }

    /// Parse a state from its stored representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "failed" => Some(Self::Failed),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Finished)
    }

    /// Validate a transition. Only `running` may move, and only to a terminal state.
    pub const fn transition(self, to: Self) -> Result<Self, InvalidTransition> {
        match (self, to) {
            (Self::Running, Self::Failed | Self::Finished) => Ok(to),
            _ => Err(InvalidTransition { from: self, to }),
        }
    }
}

impl std::fmt::Display for EvaluationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Tally of scored per-file outcomes.
///
/// Files whose classification failed are not part of the tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

/// Coarse accuracy band used for the human-readable run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Perfect,
    Good,
    NeedsImprovement,
    Poor,
}

impl AccuracyBand {
    #[must_use]
    pub const fn sentence(&self) -> &'static str {
        match self {
            Self::Perfect => "The prompt performed perfectly on all test cases.",
            Self::Good => "The prompt performed well but there's room for improvement.",
            Self::NeedsImprovement => {
                "The prompt needs significant improvements to be more accurate."
            }
            Self::Poor => "The prompt performed poorly and needs major revisions.",
        }
    }
}

impl Score {
    /// Record one scored outcome.
    pub const fn record(&mut self, result: EvalResult) {
        self.total += 1;
        if matches!(result, EvalResult::Correct) {
            self.correct += 1;
        }
    }

    /// Accuracy as a percentage in `0..=100`, or `None` when nothing was scored.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(f64::from(self.correct) * 100.0 / f64::from(self.total))
    }

    #[must_use]
    pub fn band(&self) -> Option<AccuracyBand> {
        let pct = self.percentage()?;
        Some(if self.correct == self.total {
            AccuracyBand::Perfect
        } else if pct > 80.0 {
            AccuracyBand::Good
        } else if pct > 50.0 {
            AccuracyBand::NeedsImprovement
        } else {
            AccuracyBand::Poor
        })
    }

    /// Human-readable summary stored on finished runs.
    #[must_use]
    pub fn analysis_text(&self) -> Option<String> {
        let pct = self.percentage()?;
        let band = self.band()?;
        Some(format!(
            "Evaluation completed with {} correct out of {} total evaluations ({pct:.1}% accuracy). {}",
            self.correct,
            self.total,
            band.sentence()
        ))
    }
}

// ============================================================================
// Runs
// ============================================================================

/// One execution of a compiled prompt against a project's dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEvaluation {
    pub id: i64,
    pub project_id: i64,
    pub prompt_id: i64,
    pub spec_id: i64,
    pub final_prompt: String,
    pub state: EvaluationState,
    /// Accuracy percentage in `0..=100`. Set only on finished runs.
    pub score: Option<f64>,
    /// Wall-clock seconds, rounded. Set only on finished runs.
    pub duration_secs: Option<i64>,
    pub num_dataset: Option<i64>,
    pub analysis_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a run. Runs are always created in `running` state.
#[derive(Debug, Clone)]
pub struct NewPromptEvaluation {
    pub project_id: i64,
    pub prompt_id: i64,
    pub spec_id: i64,
    pub final_prompt: String,
}

/// Terminal update applied to a running run.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    Finished {
        score: f64,
        duration_secs: i64,
        num_dataset: i64,
        analysis_text: String,
    },
    Failed {
        num_dataset: Option<i64>,
        analysis_text: String,
    },
}

impl EvaluationOutcome {
    /// Build the outcome for a settled fan-out.
    ///
    /// A tally with nothing scored is a failure with no score.
    #[must_use]
    pub fn from_score(score: Score, duration_secs: i64) -> Self {
        match (score.percentage(), score.analysis_text()) {
            (Some(pct), Some(analysis_text)) => Self::Finished {
                score: pct,
                duration_secs,
                num_dataset: i64::from(score.total),
                analysis_text,
            },
            _ => Self::Failed {
                num_dataset: Some(0),
                analysis_text: "Evaluation failed: every classification call failed".to_string(),
            },
        }
    }

    /// Run-level failure with an explanatory message.
    #[must_use]
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed {
            num_dataset: None,
            analysis_text: format!("Evaluation failed: {reason}"),
        }
    }

    #[must_use]
    pub const fn state(&self) -> EvaluationState {
        match self {
            Self::Finished { .. } => EvaluationState::Finished,
            Self::Failed { .. } => EvaluationState::Failed,
        }
    }

    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        match self {
            Self::Finished { score, .. } => Some(*score),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub const fn duration_secs(&self) -> Option<i64> {
        match self {
            Self::Finished { duration_secs, .. } => Some(*duration_secs),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub const fn num_dataset(&self) -> Option<i64> {
        match self {
            Self::Finished { num_dataset, .. } => Some(*num_dataset),
            Self::Failed { num_dataset, .. } => *num_dataset,
        }
    }

    #[must_use]
    pub fn analysis_text(&self) -> &str {
        match self {
            Self::Finished { analysis_text, .. } | Self::Failed { analysis_text, .. } => {
                analysis_text
            }
        }
    }
}

// ============================================================================
// Per-file details
// ============================================================================

/// Whether the classifier agreed with the human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalResult {
    Correct,
    Incorrect,
}

impl EvalResult {
    /// Compare a classifier label with the ground truth, ignoring case.
    #[must_use]
    pub fn judge(llm_label: &str, human_label: &str) -> Self {
        if llm_label.trim().to_lowercase() == human_label.trim().to_lowercase() {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "correct" => Some(Self::Correct),
            "incorrect" => Some(Self::Incorrect),
            _ => None,
        }
    }
}

/// Per-file outcome row belonging to a run. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalDetail {
    pub id: i64,
    pub file_id: i64,
    pub prompt_eval_id: i64,
    /// Classifier label, lowercased.
    pub llm_label: String,
    pub llm_reason: String,
    pub result: EvalResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvalDetail {
    pub file_id: i64,
    pub prompt_eval_id: i64,
    pub llm_label: String,
    pub llm_reason: String,
    pub result: EvalResult,
}

/// A run together with its detail rows.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationWithDetails {
    #[serde(flatten)]
    pub evaluation: PromptEvaluation,
    pub details: Vec<EvalDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_moves_to_either_terminal_state() {
        assert_eq!(
            EvaluationState::Running.transition(EvaluationState::Finished),
            Ok(EvaluationState::Finished)
        );
        assert_eq!(
            EvaluationState::Running.transition(EvaluationState::Failed),
            Ok(EvaluationState::Failed)
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in [EvaluationState::Finished, EvaluationState::Failed] {
            for to in [
                EvaluationState::Running,
                EvaluationState::Finished,
                EvaluationState::Failed,
            ] {
                assert!(from.transition(to).is_err(), "{from} -> {to} must be rejected");
            }
        }
        assert!(
            EvaluationState::Running
                .transition(EvaluationState::Running)
                .is_err()
        );
    }

    #[test]
    fn test_state_round_trips_through_storage_string() {
        for state in [
            EvaluationState::Running,
            EvaluationState::Failed,
            EvaluationState::Finished,
        ] {
            assert_eq!(EvaluationState::parse(state.as_str()), Some(state));
        }
        assert_eq!(EvaluationState::parse("pending"), None);
    }

    #[test]
    fn test_score_three_of_five_is_sixty_percent() {
        let mut score = Score::default();
        for result in [
            EvalResult::Correct,
            EvalResult::Incorrect,
            EvalResult::Correct,
            EvalResult::Incorrect,
            EvalResult::Correct,
        ] {
            score.record(result);
        }
        assert_eq!(score.correct, 3);
        assert_eq!(score.total, 5);
        let pct = score.percentage().unwrap();
        assert!((pct - 60.0).abs() < f64::EPSILON);
        assert_eq!(score.band(), Some(AccuracyBand::NeedsImprovement));
    }

    #[test]
    fn test_empty_score_has_no_percentage() {
        let score = Score::default();
        assert_eq!(score.percentage(), None);
        assert_eq!(score.analysis_text(), None);
    }

    #[test]
    fn test_bands_follow_thresholds() {
        let band = |correct, total| Score { correct, total }.band();
        assert_eq!(band(4, 4), Some(AccuracyBand::Perfect));
        assert_eq!(band(9, 10), Some(AccuracyBand::Good));
        assert_eq!(band(8, 10), Some(AccuracyBand::NeedsImprovement));
        assert_eq!(band(5, 10), Some(AccuracyBand::Poor));
        assert_eq!(band(0, 3), Some(AccuracyBand::Poor));
    }

    #[test]
    fn test_analysis_text_format() {
        let text = Score {
            correct: 2,
            total: 3,
        }
        .analysis_text()
        .unwrap();
        assert_eq!(
            text,
            "Evaluation completed with 2 correct out of 3 total evaluations (66.7% accuracy). \
             The prompt needs significant improvements to be more accurate."
        );
    }

    #[test]
    fn test_outcome_from_empty_score_is_failed_without_score() {
        let outcome = EvaluationOutcome::from_score(Score::default(), 4);
        assert_eq!(outcome.state(), EvaluationState::Failed);
        assert_eq!(outcome.score(), None);
        assert_eq!(outcome.duration_secs(), None);
        assert_eq!(outcome.num_dataset(), Some(0));
    }

    #[test]
    fn test_outcome_from_score_is_finished() {
        let outcome = EvaluationOutcome::from_score(
            Score {
                correct: 1,
                total: 2,
            },
            7,
        );
        assert_eq!(outcome.state(), EvaluationState::Finished);
        assert_eq!(outcome.score(), Some(50.0));
        assert_eq!(outcome.duration_secs(), Some(7));
        assert_eq!(outcome.num_dataset(), Some(2));
    }

    #[test]
    fn test_judge_ignores_case() {
        assert_eq!(EvalResult::judge("PASS", "pass"), EvalResult::Correct);
        assert_eq!(EvalResult::judge("fail", "Pass"), EvalResult::Incorrect);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&EvaluationState::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
    }
}
