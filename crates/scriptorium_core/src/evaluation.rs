//! Evaluation types: the structured score/feedback record attached 1:1 to
//! a scene.

use crate::{EvaluationId, SceneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a detected cliché.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClicheKind {
    /// Overused line of dialogue
    #[default]
    Dialogue,
    /// Overused plot device
    Plot,
    /// Stock character beat
    Character,
    /// Predictable ending
    Ending,
    /// Worn-out transition
    Transition,
}

/// Axis an issue belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueCategory {
    /// Creativity
    Creativity,
    /// Character/voice consistency
    Consistency,
    /// Emotional delivery
    Emotion,
    /// Pacing and rhythm
    Pacing,
    /// Dialogue quality
    Dialogue,
    /// Scene structure
    #[default]
    Structure,
    /// Whole-scene concerns
    Overall,
}

/// How serious an issue is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    /// Worth knowing
    Info,
    /// Should probably be fixed
    #[default]
    Warning,
    /// Must be fixed
    Error,
}

/// A cliché found in scene content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClicheDetection {
    /// Category of cliché
    pub kind: ClicheKind,
    /// The text that matched
    pub detected_text: String,
    /// Why this counts as a cliché
    pub explanation: String,
    /// Suggested replacements
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// An issue found during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationIssue {
    /// Axis the issue belongs to
    pub category: IssueCategory,
    /// Severity
    pub severity: Severity,
    /// Description of the issue
    pub message: String,
    /// Line the issue refers to, if known
    pub line: Option<u32>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

/// The five bounded axis scores, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    /// Originality of expression and development
    pub creativity: f64,
    /// Character voice and world consistency
    pub consistency: f64,
    /// Emotional delivery
    pub emotion: f64,
    /// Pacing and rhythm
    pub pacing: f64,
    /// Dialogue naturalness
    pub dialogue: f64,
}

impl AxisScores {
    /// All axes at the neutral 0.5 used when judgment is unavailable.
    pub const NEUTRAL: AxisScores = AxisScores {
        creativity: 0.5,
        consistency: 0.5,
        emotion: 0.5,
        pacing: 0.5,
        dialogue: 0.5,
    };

    /// Unweighted mean of the five axes.
    pub fn mean(&self) -> f64 {
        (self.creativity + self.consistency + self.emotion + self.pacing + self.dialogue) / 5.0
    }
}

/// A stored evaluation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Unique id
    pub id: EvaluationId,
    /// The scene this evaluation belongs to (1:1)
    pub scene_id: SceneId,
    /// Axis scores
    pub scores: AxisScores,
    /// Aggregate score
    pub overall_score: f64,
    /// Whether any cliché was detected
    pub cliche_detected: bool,
    /// Detected clichés
    pub cliches: Vec<ClicheDetection>,
    /// Issues found
    pub issues: Vec<EvaluationIssue>,
    /// Free-text summary of the evaluation
    pub summary: String,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// What worked well
    pub strengths: Vec<String>,
    /// Identity of the evaluator (model name or "static")
    pub evaluator: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An evaluation ready to be stored; replaces any prior evaluation for the
/// scene wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvaluation {
    /// The scene this evaluation belongs to
    pub scene_id: SceneId,
    /// Axis scores
    pub scores: AxisScores,
    /// Aggregate score
    pub overall_score: f64,
    /// Whether any cliché was detected
    pub cliche_detected: bool,
    /// Detected clichés
    pub cliches: Vec<ClicheDetection>,
    /// Issues found
    pub issues: Vec<EvaluationIssue>,
    /// Free-text summary of the evaluation
    pub summary: String,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// What worked well
    pub strengths: Vec<String>,
    /// Identity of the evaluator
    pub evaluator: Option<String>,
}

impl NewEvaluation {
    /// Whether any issue carries error severity.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl Evaluation {
    /// Whether any issue carries error severity.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}
