//! Scene evaluation.
//!
//! Scoring is deliberately split from generation: the evaluator holds its
//! own (optional) driver and never shares sampling settings with the
//! generator. Two entry points:
//!
//! - [`SceneEvaluator::quick_evaluate`] — static pattern analysis only, a
//!   pure function of content.
//! - [`SceneEvaluator::evaluate`] — static analysis merged with external
//!   judgment. Any capability or parse failure substitutes a neutral
//!   default; this path never errors.

use crate::context::CharacterProfile;
use crate::extraction::extract_json;
use crate::prompt;
use derive_getters::Getters;
use regex::Regex;
use scriptorium_core::{
    AxisScores, ClicheDetection, ClicheKind, Evaluation, EvaluationIssue, IssueCategory,
    NewEvaluation, SceneId, Severity, TextRequest,
};
use scriptorium_interface::LanguageDriver;
use std::sync::{Arc, LazyLock};

/// Static table of known overused phrases, by category.
const DIALOGUE_CLICHES: &[&str] = &[
    "i can't believe this",
    "this can't be happening",
    "you don't say",
    "it was meant to be",
    "this is only the beginning",
    "we're not so different",
];
const PLOT_CLICHES: &[&str] = &[
    "it was all a dream",
    "long-lost twin",
    "back from the dead",
    "the villain was family all along",
];
const TRANSITION_CLICHES: &[&str] = &[
    "suddenly",
    "at that very moment",
    "little did they know",
    "and then one day",
];

/// Content shorter than this draws a structural warning.
const MIN_SCENE_CHARS: usize = 100;

/// Quick-score formula constants: start high, pay per finding, clamp.
const QUICK_BASE: f64 = 0.7;
const QUICK_CLICHE_PENALTY: f64 = 0.1;
const QUICK_ISSUE_PENALTY: f64 = 0.05;
const QUICK_FLOOR: f64 = 0.3;

static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*""#).expect("valid quoted-span pattern"));

/// Tunable evaluation parameters.
///
/// The cliché penalty and the revision threshold are inherited heuristics
/// with no documented derivation; they are configuration, not constants.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct EvaluatorConfig {
    /// Creativity penalty per detected cliché
    cliche_penalty_step: f64,
    /// Upper bound on the total cliché penalty
    cliche_penalty_cap: f64,
    /// Overall score below which a scene needs revision
    revision_threshold: f64,
    /// Sampling temperature for the judgment call
    judgment_temperature: f32,
    /// Token budget for the judgment call
    judgment_max_tokens: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            cliche_penalty_step: 0.1,
            cliche_penalty_cap: 0.3,
            revision_threshold: 0.6,
            judgment_temperature: 0.3,
            judgment_max_tokens: 1500,
        }
    }
}

impl EvaluatorConfig {
    /// Override the revision threshold.
    pub fn with_revision_threshold(mut self, threshold: f64) -> Self {
        self.revision_threshold = threshold;
        self
    }

    /// Override the cliché penalty step and cap.
    pub fn with_cliche_penalty(mut self, step: f64, cap: f64) -> Self {
        self.cliche_penalty_step = step;
        self.cliche_penalty_cap = cap;
        self
    }

    /// Override the judgment sampling parameters.
    pub fn with_judgment_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.judgment_temperature = temperature;
        self.judgment_max_tokens = max_tokens;
        self
    }
}

/// Result of the pattern-only quick pass.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickEvaluation {
    /// Heuristic composite score in [0.3, 1.0]
    pub quick_score: f64,
    /// Number of clichés matched
    pub cliche_count: usize,
    /// Number of structural issues found
    pub issue_count: usize,
    /// The matched clichés
    pub cliches: Vec<ClicheDetection>,
    /// The structural issues
    pub issues: Vec<EvaluationIssue>,
    /// Whether a full evaluation is worth running
    pub needs_full_evaluation: bool,
}

struct RuleAnalysis {
    cliches: Vec<ClicheDetection>,
    issues: Vec<EvaluationIssue>,
}

/// External judgment, already converted to domain types.
struct Judgment {
    scores: AxisScores,
    cliches: Vec<ClicheDetection>,
    issues: Vec<EvaluationIssue>,
    summary: String,
    strengths: Vec<String>,
    suggestions: Vec<String>,
    evaluator: Option<String>,
}

impl Judgment {
    /// The neutral default used whenever judgment is unavailable.
    fn unavailable() -> Self {
        Self {
            scores: AxisScores::NEUTRAL,
            cliches: Vec::new(),
            issues: Vec::new(),
            summary: "Automatic evaluation was unavailable.".to_string(),
            strengths: Vec::new(),
            suggestions: vec![
                "Re-run the evaluation once a judgment model is configured.".to_string(),
            ],
            evaluator: Some("static".to_string()),
        }
    }
}

/// State-free scene scorer.
pub struct SceneEvaluator {
    driver: Option<Arc<dyn LanguageDriver>>,
    config: EvaluatorConfig,
}

impl SceneEvaluator {
    /// Create an evaluator. Without a driver only the static analysis
    /// runs; full evaluation then reports neutral axis scores.
    pub fn new(driver: Option<Arc<dyn LanguageDriver>>) -> Self {
        Self {
            driver,
            config: EvaluatorConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The active config.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Pattern-only analysis, no external call.
    ///
    /// Deterministic: identical content always yields identical counts
    /// and score.
    pub fn quick_evaluate(&self, content: &str) -> QuickEvaluation {
        let analysis = rule_analysis(content);
        let cliche_count = analysis.cliches.len();
        let issue_count = analysis.issues.len();
        let quick_score = (QUICK_BASE
            - cliche_count as f64 * QUICK_CLICHE_PENALTY
            - issue_count as f64 * QUICK_ISSUE_PENALTY)
            .clamp(QUICK_FLOOR, 1.0);
        QuickEvaluation {
            quick_score,
            cliche_count,
            issue_count,
            cliches: analysis.cliches,
            issues: analysis.issues,
            needs_full_evaluation: cliche_count > 0 || issue_count > 0,
        }
    }

    /// Full evaluation: static analysis merged with external judgment.
    ///
    /// Never fails: when the judgment capability is missing, errors, or
    /// returns unparseable output, a neutral default substitutes and the
    /// condition is logged.
    #[tracing::instrument(skip(self, content, context, characters), fields(content_len = content.len()))]
    pub async fn evaluate(
        &self,
        scene_id: SceneId,
        content: &str,
        context: Option<&str>,
        characters: &[CharacterProfile],
    ) -> NewEvaluation {
        let rule = rule_analysis(content);
        let judgment = self.judge(content, context, characters).await;
        self.merge(scene_id, rule, judgment)
    }

    /// Whether a stored evaluation calls for a rewrite: overall score
    /// below the threshold, or any error-severity issue.
    pub fn needs_revision(&self, evaluation: &Evaluation) -> bool {
        evaluation.overall_score < self.config.revision_threshold || evaluation.has_errors()
    }

    async fn judge(
        &self,
        content: &str,
        context: Option<&str>,
        characters: &[CharacterProfile],
    ) -> Judgment {
        let Some(driver) = &self.driver else {
            tracing::debug!("No judgment capability configured, using neutral default");
            return Judgment::unavailable();
        };

        let request = TextRequest::new(prompt::render_judgment_prompt(content, context, characters))
            .with_temperature(self.config.judgment_temperature)
            .with_max_tokens(self.config.judgment_max_tokens);

        let response = match driver.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Judgment call failed, using neutral default");
                return Judgment::unavailable();
            }
        };

        match extract_json(&response).ok().and_then(|json| {
            serde_json::from_str::<JudgmentPayload>(&json).ok()
        }) {
            Some(payload) => payload.into_judgment(driver.model_name()),
            None => {
                tracing::warn!("Judgment response was not parseable JSON, using neutral default");
                Judgment::unavailable()
            }
        }
    }

    fn merge(&self, scene_id: SceneId, rule: RuleAnalysis, judgment: Judgment) -> NewEvaluation {
        let mut cliches = rule.cliches;
        cliches.extend(judgment.cliches);
        let mut issues = rule.issues;
        issues.extend(judgment.issues);

        let mut scores = judgment.scores;
        if !cliches.is_empty() {
            let penalty = (cliches.len() as f64 * self.config.cliche_penalty_step)
                .min(self.config.cliche_penalty_cap);
            scores.creativity = (scores.creativity - penalty).max(0.0);
        }

        NewEvaluation {
            scene_id,
            overall_score: scores.mean(),
            scores,
            cliche_detected: !cliches.is_empty(),
            cliches,
            issues,
            summary: judgment.summary,
            suggestions: judgment.suggestions,
            strengths: judgment.strengths,
            evaluator: judgment.evaluator,
        }
    }
}

/// Scan content against every participating character's forbidden-action
/// list, flagging each match as an error-severity consistency issue.
///
/// This is the downstream validation pass run over drafted or generated
/// content before it is accepted; it is intentionally independent of the
/// scoring pipeline.
pub fn check_forbidden_actions(
    content: &str,
    characters: &[CharacterProfile],
) -> Vec<EvaluationIssue> {
    let lowered = content.to_lowercase();
    let mut violations = Vec::new();
    for character in characters {
        for action in &character.forbidden_actions {
            if lowered.contains(&action.to_lowercase()) {
                violations.push(EvaluationIssue {
                    category: IssueCategory::Consistency,
                    severity: Severity::Error,
                    message: format!(
                        "'{}' appears in the scene but is forbidden for {}",
                        action, character.name
                    ),
                    line: None,
                    suggestion: Some(format!(
                        "Rework the moment so {} stays within their limits",
                        character.name
                    )),
                });
            }
        }
    }
    violations
}

fn rule_analysis(content: &str) -> RuleAnalysis {
    let lowered = content.to_lowercase();
    let mut cliches = Vec::new();
    for (kind, patterns) in [
        (ClicheKind::Dialogue, DIALOGUE_CLICHES),
        (ClicheKind::Plot, PLOT_CLICHES),
        (ClicheKind::Transition, TRANSITION_CLICHES),
    ] {
        for pattern in patterns {
            if lowered.contains(pattern) {
                cliches.push(ClicheDetection {
                    kind,
                    detected_text: pattern.to_string(),
                    explanation: format!("'{}' is a heavily overused phrase", pattern),
                    alternatives: Vec::new(),
                });
            }
        }
    }

    let mut issues = Vec::new();
    if content.chars().count() < MIN_SCENE_CHARS {
        issues.push(EvaluationIssue {
            category: IssueCategory::Structure,
            severity: Severity::Warning,
            message: "Scene is very short; it likely needs more development".to_string(),
            line: None,
            suggestion: None,
        });
    }

    // Dialogue density is informational today; the ratio is computed so
    // callers inspecting spans can reason about it in logs.
    let quoted = QUOTED_SPAN.find_iter(content).count();
    let line_count = content.lines().count().max(1);
    tracing::trace!(
        quoted,
        line_count,
        ratio = quoted as f64 / line_count as f64,
        "Dialogue density"
    );

    RuleAnalysis { cliches, issues }
}

fn half() -> f64 {
    0.5
}

/// Raw judgment payload as the model returns it. Cliché and issue entries
/// are kept as loose JSON and converted leniently: a malformed entry is
/// dropped, an unknown enum value falls back to its default.
#[derive(Debug, serde::Deserialize)]
struct JudgmentPayload {
    #[serde(default = "half")]
    creativity_score: f64,
    #[serde(default = "half")]
    consistency_score: f64,
    #[serde(default = "half")]
    emotion_score: f64,
    #[serde(default = "half")]
    pacing_score: f64,
    #[serde(default = "half")]
    dialogue_score: f64,
    #[serde(default)]
    cliches: Vec<serde_json::Value>,
    #[serde(default)]
    issues: Vec<serde_json::Value>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl JudgmentPayload {
    fn into_judgment(self, model_name: &str) -> Judgment {
        let scores = AxisScores {
            creativity: self.creativity_score.clamp(0.0, 1.0),
            consistency: self.consistency_score.clamp(0.0, 1.0),
            emotion: self.emotion_score.clamp(0.0, 1.0),
            pacing: self.pacing_score.clamp(0.0, 1.0),
            dialogue: self.dialogue_score.clamp(0.0, 1.0),
        };

        let cliches = self
            .cliches
            .iter()
            .filter_map(|value| {
                let text = value.get("text")?.as_str()?.to_string();
                Some(ClicheDetection {
                    kind: str_field(value, "type")
                        .parse::<ClicheKind>()
                        .unwrap_or_default(),
                    detected_text: text,
                    explanation: str_field(value, "explanation").to_string(),
                    alternatives: string_list(value, "alternatives"),
                })
            })
            .collect();

        let issues = self
            .issues
            .iter()
            .filter_map(|value| {
                let message = value.get("message")?.as_str()?.to_string();
                Some(EvaluationIssue {
                    category: str_field(value, "category")
                        .parse::<IssueCategory>()
                        .unwrap_or_default(),
                    severity: str_field(value, "severity")
                        .parse::<Severity>()
                        .unwrap_or_default(),
                    message,
                    line: value.get("line").and_then(|v| v.as_u64()).map(|n| n as u32),
                    suggestion: value
                        .get("suggestion")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                })
            })
            .collect();

        Judgment {
            scores,
            cliches,
            issues,
            summary: if self.summary.is_empty() {
                "Evaluation complete.".to_string()
            } else {
                self.summary
            },
            strengths: self.strengths,
            suggestions: self.suggestions,
            evaluator: Some(model_name.to_string()),
        }
    }
}

fn str_field<'a>(value: &'a serde_json::Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn string_list(value: &serde_json::Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
