//! Deterministic fallback scripts.
//!
//! When no generation capability is configured, or the configured one
//! fails at call time, the generator still has to return usable content.
//! These fixed templates, keyed by scene kind, guarantee that: they fold
//! in the participant names, the scene goal and a note about learned
//! strengths, and they never fail.

use crate::learning::LearningContext;
use scriptorium_core::SceneKind;

/// Produce template content for a scene.
pub(crate) fn template_scene(
    kind: SceneKind,
    character_names: &[String],
    goal: &str,
    learning: &LearningContext,
) -> String {
    let mut names: Vec<String> = character_names.to_vec();
    if names.is_empty() {
        names = vec!["Host A".to_string(), "Host B".to_string()];
    }
    if names.len() < 2 {
        names.push("Host".to_string());
    }
    let (a, b) = (&names[0], &names[1]);

    let style_note = if learning.strengths_to_keep.is_empty() {
        String::new()
    } else {
        let kept: Vec<&str> = learning
            .strengths_to_keep
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        format!("\n\n(style notes: {})", kept.join(", "))
    };

    let body = match kind {
        SceneKind::Opening => format!(
            "{a}: (to camera, full of energy) Hello and welcome back!\n\n\
             {b}: We have a genuinely interesting one today.\n\n\
             {a}: We do. {goal}\n\n\
             {b}: (to the audience) Stay with us to the end and this will all make sense.\n\n\
             {a}: Shall we get right into it?\n\n\
             {b}: Let's go!"
        ),
        SceneKind::Highlight => format!(
            "{a}: (emphatic) This is the heart of it, right here.\n\n\
             {b}: {goal}\n\n\
             {a}: If you remember one thing today, make it this.\n\n\
             {b}: (cutting in) It really is that important.\n\n\
             {a}: Let's run it back once more...\n\n\
             {b}: That's the one.\n\n\
             {a}: Do not miss this part."
        ),
        SceneKind::Talk => format!(
            "{a}: Alright, let's get into the meat of it.\n\n\
             {b}: {goal}\n\n\
             {a}: And here's why that matters...\n\n\
             {b}: It makes sense once you see the context.\n\n\
             {a}: (checking notes) Look at this part here.\n\n\
             {b}: Ah, there it is. That's the key point.\n\n\
             {a}: Now it should be clicking for everyone."
        ),
        SceneKind::Closing => format!(
            "{a}: Let's pull today's thread together.\n\n\
             {b}: First: {goal}\n\n\
             {a}: That was the core of it.\n\n\
             {b}: Next week we're back with something even better.\n\n\
             {a}: Thanks for watching!\n\n\
             (together) See you next time!"
        ),
        // Everything else reads well as a plain conversation beat.
        _ => format!(
            "{a}: This part feels like the crux of it.\n\n\
             {b}: Agreed. {goal}\n\n\
             {a}: There's one detail here worth slowing down for.\n\n\
             {b}: (nodding) That part really matters.\n\n\
             {a}: Let me unpack it a little.\n\n\
             {b}: (glancing at the notes) Right here, see...\n\n\
             {a}: Ah, that's exactly it!"
        ),
    };

    format!("{body}{style_note}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_interpolate_names_and_goal() {
        let learning = LearningContext::default();
        let names = vec!["Mara".to_string(), "Joon".to_string()];
        let script = template_scene(SceneKind::Opening, &names, "explain the blackout", &learning);
        assert!(script.contains("Mara:"));
        assert!(script.contains("Joon:"));
        assert!(script.contains("explain the blackout"));
    }

    #[test]
    fn templates_cover_every_kind_without_empty_output() {
        let learning = LearningContext::default();
        for kind in [
            SceneKind::Opening,
            SceneKind::Talk,
            SceneKind::NewsSummary,
            SceneKind::Highlight,
            SceneKind::Closing,
            SceneKind::Transition,
            SceneKind::Interview,
            SceneKind::Narration,
            SceneKind::Action,
            SceneKind::Dialogue,
        ] {
            let script = template_scene(kind, &[], "the goal", &learning);
            assert!(!script.is_empty());
            assert!(script.contains("Host A:"));
        }
    }

    #[test]
    fn single_participant_gets_a_partner() {
        let learning = LearningContext::default();
        let script = template_scene(
            SceneKind::Dialogue,
            &["Solo".to_string()],
            "goal",
            &learning,
        );
        assert!(script.contains("Solo:"));
        assert!(script.contains("Host:"));
    }

    #[test]
    fn learned_strengths_become_a_style_note() {
        let learning = LearningContext {
            strengths_to_keep: vec!["crisp banter".to_string(), "clean exits".to_string()],
            ..Default::default()
        };
        let script = template_scene(SceneKind::Talk, &[], "goal", &learning);
        assert!(script.contains("style notes: crisp banter, clean exits"));
    }
}
