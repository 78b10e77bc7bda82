//! Prompt assembly.
//!
//! All prompt text lives here: the guidance tables that translate scene
//! metadata enums into writing directions, and the renderers that stitch
//! context, learning feedback and scene parameters into the final prompt.
//! The section order in [`render_generation_prompt`] is fixed; the
//! generator and evaluator never concatenate prompt fragments themselves.

use crate::context::{CharacterProfile, ContextBundle};
use crate::generator::SceneSpec;
use crate::learning::LearningContext;
use scriptorium_core::{ConflictKind, DialogDensity, Scene, SceneKind};

/// Best-scene previews shown in the learned-style block.
const LEARNING_EXAMPLES: usize = 2;
/// Preview truncation inside the learned-style block.
const LEARNING_PREVIEW_CHARS: usize = 300;
/// How much of the original scene a variation prompt quotes.
const VARIATION_SOURCE_CHARS: usize = 1500;

/// Writing guidance per scene kind.
pub(crate) fn scene_kind_guidance(kind: SceneKind) -> &'static str {
    match kind {
        SceneKind::Opening => "Opening - hook the audience and introduce the topic",
        SceneKind::Talk => "Main discussion - dig into the topic in depth",
        SceneKind::NewsSummary => "News recap - summarize developments crisply",
        SceneKind::Highlight => "Highlight - the key point, maximum impact",
        SceneKind::Closing => "Closing - wrap up and tease what comes next",
        SceneKind::Transition => "Transition - bridge two segments smoothly",
        SceneKind::Interview => "Interview - questions that draw the guest out",
        SceneKind::Narration => "Narration - voice-over carrying the story",
        SceneKind::Action => "Action - movement and events over talk",
        SceneKind::Dialogue => "Dialogue scene - natural conversation between characters",
    }
}

/// Writing guidance per conflict kind.
pub(crate) fn conflict_guidance(conflict: ConflictKind) -> &'static str {
    match conflict {
        ConflictKind::Relationship => "Express friction arising between the characters",
        ConflictKind::Internal => "Express a character's inner dilemma",
        ConflictKind::External => "Express pressure from outside circumstances",
        ConflictKind::Ideological => "Express a clash of values or beliefs",
        ConflictKind::Comedic => "Express comedic friction and misunderstandings",
        ConflictKind::None => "Proceed without conflict, keep it easy",
    }
}

/// Writing guidance per dialogue density.
pub(crate) fn density_guidance(density: DialogDensity) -> &'static str {
    match density {
        DialogDensity::High => "Mostly dialogue, keep stage directions minimal",
        DialogDensity::Medium => "Balance dialogue with stage directions",
        DialogDensity::Low => "Mostly narration and description, dialogue sparse",
    }
}

/// Fixed authorial rules appended to every generation prompt.
const AUTHORIAL_RULES: &str = "\
## Writing Rules
1. Keep every character exactly in the voice and personality given above
2. Never use anything from the forbidden list
3. Respect the world rules at all times
4. Avoid cliches; reach for fresh, specific expression
5. Let the emotional flow develop naturally
6. Write dialogue as 'Name: line' and stage directions in (parentheses)
7. Write in the project's language";

/// Render the full generation prompt.
///
/// Section order: project/episode header, world rules, character profiles
/// (mined dialogue examples preferred over stored ones), style guide,
/// forbidden list, prior-scene summaries, unresolved callbacks, learned
/// style block (only with history), scene instructions, authorial rules.
pub(crate) fn render_generation_prompt(
    bundle: &ContextBundle,
    learning: &LearningContext,
    spec: &SceneSpec,
) -> String {
    let mut out = String::new();
    out.push_str(
        "You are a professional scriptwriter. You study the project's prior scripts and \
         their feedback, then write the next scene better than what came before.\n\n",
    );

    out.push_str("## Project\n");
    out.push_str(&format!("- Title: {}\n", bundle.project.title));
    out.push_str(&format!("- Format: {}\n", bundle.project.kind));
    if let Some(tone) = &bundle.project.tone {
        out.push_str(&format!("- Tone: {}\n", tone));
    }
    if let Some(episode) = &bundle.episode {
        out.push_str(&format!("- Episode EP{}: {}\n", episode.number, episode.title));
        if let Some(topic) = &episode.main_topic {
            out.push_str(&format!("- Main topic: {}\n", topic));
        }
    }
    out.push('\n');

    if !bundle.world_rules.is_empty() {
        out.push_str("## World Rules (must be respected)\n");
        for rule in &bundle.world_rules {
            out.push_str(&format!("- {}\n", rule));
        }
        out.push('\n');
    }

    out.push_str("## Characters\n");
    let selected = bundle.selected_characters(Some(&spec.character_ids));
    if selected.is_empty() {
        out.push_str("No character information available.\n");
    }
    for profile in selected {
        out.push_str(&character_block(profile, learning));
    }
    out.push('\n');

    if !bundle.style_guide.is_empty() {
        out.push_str("## Style Guide\n");
        out.push_str(&bundle.style_guide);
        out.push_str("\n\n");
    }

    if !bundle.forbidden.is_empty() {
        out.push_str("## Forbidden Elements (never use)\n");
        for item in &bundle.forbidden {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');
    }

    if !bundle.previous_scenes.is_empty() {
        out.push_str("## Previous Scenes\n");
        for scene in &bundle.previous_scenes {
            out.push_str(&format!("- Scene {}: {}\n", scene.number, scene.summary));
        }
        out.push('\n');
    }

    if !bundle.unresolved_callbacks.is_empty() {
        out.push_str("## Unresolved Plot Threads (consider paying off)\n");
        for callback in bundle.unresolved_callbacks.iter().take(5) {
            out.push_str(&format!("- {}\n", callback.content));
        }
        out.push('\n');
    }

    if learning.has_history() {
        out.push_str(&learning_block(learning));
    }

    out.push_str("## Scene Instructions\n");
    out.push_str(&format!("- Goal: {}\n", spec.goal));
    out.push_str(&format!("- Scene type: {}\n", scene_kind_guidance(spec.kind)));
    if !spec.emotion_curve.is_empty() {
        let curve: Vec<String> = spec.emotion_curve.iter().map(|b| b.to_string()).collect();
        out.push_str(&format!("- Emotional flow: {}\n", curve.join(" -> ")));
    }
    out.push_str(&format!("- Conflict: {}\n", conflict_guidance(spec.conflict)));
    out.push_str(&format!(
        "- Dialogue density: {}\n",
        density_guidance(spec.dialog_density)
    ));
    out.push_str(&format!(
        "- Target length: about {} characters\n",
        spec.target_length
    ));
    if let Some(extra) = &spec.additional_instructions {
        out.push_str(&format!("- Additional instructions: {}\n", extra));
    }
    out.push('\n');

    out.push_str(AUTHORIAL_RULES);
    out.push_str("\n\nWrite the scene:");
    out
}

/// One character's profile block, preferring dialogue examples mined from
/// this project's actual scripts over the statically stored examples.
fn character_block(profile: &CharacterProfile, learning: &LearningContext) -> String {
    let mut block = format!("### {} ({})\n", profile.name, profile.role);
    if !profile.personality.is_empty() {
        block.push_str(&format!("Personality: {}\n", profile.personality));
    }
    if !profile.speech_pattern.is_empty() {
        block.push_str(&format!("Voice: {}\n", profile.speech_pattern));
    }
    if let Some(state) = &profile.current_state {
        block.push_str(&format!("Current state: {}\n", state));
    }
    if let Some(mined) = learning.character_examples.get(&profile.name) {
        block.push_str(&format!("Lines from produced scripts: {}\n", mined.join(" / ")));
    } else if !profile.speech_examples.is_empty() {
        let examples: Vec<&str> = profile
            .speech_examples
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        block.push_str(&format!("Example lines: {}\n", examples.join(" / ")));
    }
    block
}

/// The learned-style block: what earlier scenes did well and badly.
fn learning_block(learning: &LearningContext) -> String {
    let mut block = format!(
        "## Learned Style ({} prior scenes analyzed, average score {:.0}%)\n",
        learning.scene_count,
        learning.avg_score * 100.0
    );

    block.push_str("### Keep doing (highly rated in prior scripts):\n");
    if learning.strengths_to_keep.is_empty() {
        block.push_str("- Natural conversational flow\n");
    }
    for strength in &learning.strengths_to_keep {
        block.push_str(&format!("- {}\n", strength));
    }

    block.push_str("### Avoid (flagged in prior feedback):\n");
    if learning.issues_to_avoid.is_empty() {
        block.push_str("- Stale, predictable phrasing\n");
    }
    for issue in &learning.issues_to_avoid {
        block.push_str(&format!("- {}\n", issue));
    }

    for (i, best) in learning.best_scenes.iter().take(LEARNING_EXAMPLES).enumerate() {
        let preview: String = best.preview.chars().take(LEARNING_PREVIEW_CHARS).collect();
        block.push_str(&format!(
            "### Reference script {} ({}, scored {:.0}%):\n```\n{}...\n```\n",
            i + 1,
            best.kind,
            best.score * 100.0,
            preview
        ));
    }
    block.push('\n');
    block
}

/// Render the judgment prompt: five axis scores plus structured findings,
/// JSON only.
pub(crate) fn render_judgment_prompt(
    content: &str,
    context: Option<&str>,
    characters: &[CharacterProfile],
) -> String {
    let mut out = String::new();
    out.push_str(
        "You are a professional script critic. Analyze the scene below and respond with \
         a single JSON object, nothing else.\n\n",
    );

    if let Some(context) = context {
        out.push_str("## Context\n");
        out.push_str(context);
        out.push_str("\n\n");
    }

    if !characters.is_empty() {
        out.push_str("## Characters\n");
        for profile in characters {
            out.push_str(&format!(
                "- {}: {}\n",
                profile.name,
                if profile.speech_pattern.is_empty() {
                    "N/A"
                } else {
                    &profile.speech_pattern
                }
            ));
        }
        out.push('\n');
    }

    out.push_str("## Scene\n");
    let clipped: String = content.chars().take(3000).collect();
    out.push_str(&clipped);
    out.push_str("\n\n");

    out.push_str(
        "## Scoring axes (each 0.0-1.0)\n\
         1. creativity_score: original expression, development that surprises\n\
         2. consistency_score: character voice and personality held steady\n\
         3. emotion_score: emotion lands effectively\n\
         4. pacing_score: speed and rhythm fit the scene\n\
         5. dialogue_score: dialogue is natural and distinct\n\n\
         ## Output format (JSON)\n\
         ```json\n\
         {\n\
           \"creativity_score\": 0.0,\n\
           \"consistency_score\": 0.0,\n\
           \"emotion_score\": 0.0,\n\
           \"pacing_score\": 0.0,\n\
           \"dialogue_score\": 0.0,\n\
           \"cliches\": [{\"type\": \"dialogue|plot|character|ending|transition\", \
         \"text\": \"...\", \"explanation\": \"...\", \"alternatives\": [\"...\"]}],\n\
           \"issues\": [{\"category\": \"creativity|consistency|emotion|pacing|dialogue|structure\", \
         \"severity\": \"info|warning|error\", \"message\": \"...\", \"suggestion\": \"...\"}],\n\
           \"summary\": \"two or three sentences\",\n\
           \"strengths\": [\"...\"],\n\
           \"suggestions\": [\"...\"]\n\
         }\n\
         ```\n\n\
         Output ONLY valid JSON:",
    );
    out
}

/// Render a regeneration prompt: hold the stored structure constant, beat
/// the stored content.
pub(crate) fn render_regeneration_prompt(
    bundle: &ContextBundle,
    learning: &LearningContext,
    scene: &Scene,
    modification_request: Option<&str>,
) -> String {
    let mut out = bundle.render(scene.goal.as_deref(), Some(&scene.character_ids));
    out.push('\n');

    if learning.has_history() {
        out.push_str(&learning_block(learning));
    }

    out.push_str("## Existing Scene\n```\n");
    out.push_str(&scene.content);
    out.push_str("\n```\n\n## Revision Request\n");
    out.push_str(
        modification_request
            .unwrap_or("Rewrite this as a more creative, more original version."),
    );
    out.push_str("\n\n## Structure To Keep\n");
    out.push_str(&format!(
        "- Scene goal: {}\n",
        scene.goal.as_deref().unwrap_or("unchanged")
    ));
    let curve: Vec<String> = scene.emotion_curve.iter().map(|b| b.to_string()).collect();
    out.push_str(&format!("- Emotional flow: {}\n", curve.join(" -> ")));
    out.push_str(&format!("- Conflict: {}\n", conflict_guidance(scene.conflict)));
    out.push_str(&format!(
        "- Dialogue density: {}\n",
        density_guidance(scene.dialog_density)
    ));
    out.push_str(
        "\nKeep that structure, apply the revision request, and write a version better \
         than the existing scene:",
    );
    out
}

/// Render a variation prompt: same goal and cast, different style.
pub(crate) fn render_variation_prompt(
    bundle: &ContextBundle,
    scene: &Scene,
    style: &str,
) -> String {
    let mut out = bundle.render(scene.goal.as_deref(), Some(&scene.character_ids));
    out.push_str("\n## Original Scene\n");
    let clipped: String = scene.content.chars().take(VARIATION_SOURCE_CHARS).collect();
    out.push_str(&clipped);
    out.push_str("\n\n## Variation Style\n");
    out.push_str(style);
    out.push_str(
        "\n\n## Keep Unchanged\n\
         - The scene goal\n\
         - The participating characters\n\
         - The core content\n\n\
         Write the variation in the requested style, changing tone and expression while \
         keeping the heart of the original:",
    );
    out
}
