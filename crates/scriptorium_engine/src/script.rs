//! Episode full-script assembly.
//!
//! Concatenates an episode's scenes into one readable script with `---`
//! separators between scenes. [`split_full_script`] inverts the
//! assembly: for scenes whose content does not itself contain the
//! separator line, splitting recovers exactly the per-scene content.

use scriptorium_core::{Episode, EpisodeId, Scene};
use serde::{Deserialize, Serialize};

/// Separator line between scenes in the assembled script.
pub const SCENE_SEPARATOR: &str = "---";

/// An assembled episode script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullScript {
    /// Episode id
    pub episode_id: EpisodeId,
    /// Episode title
    pub title: String,
    /// The assembled script text
    pub script: String,
    /// Number of scenes included
    pub scene_count: usize,
    /// Sum of scene word counts
    pub total_words: usize,
}

/// Assemble an episode's scenes (already ordered by scene number) into a
/// full script.
pub fn assemble_full_script(episode: &Episode, scenes: &[Scene]) -> FullScript {
    let mut lines: Vec<String> = Vec::new();
    for scene in scenes {
        let mut header = format!(
            "## Scene {}: {}",
            scene.number,
            scene.title.as_deref().unwrap_or("")
        );
        header.push_str(&format!(" ({})", scene.kind));
        lines.push(header);
        if let Some(goal) = &scene.goal {
            lines.push(format!("**Goal**: {}", goal));
        }
        lines.push(String::new());
        lines.push(scene.content.clone());
        lines.push(String::new());
        lines.push(SCENE_SEPARATOR.to_string());
        lines.push(String::new());
    }

    FullScript {
        episode_id: episode.id,
        title: episode.title.clone(),
        script: lines.join("\n"),
        scene_count: scenes.len(),
        total_words: scenes.iter().map(|s| s.word_count).sum(),
    }
}

/// Split an assembled script back into per-scene content substrings.
///
/// Each scene block is the header lines, a blank line, then the content;
/// this drops the header block and returns the content. Exact for any set
/// of scenes whose content contains no separator line.
pub fn split_full_script(script: &str) -> Vec<String> {
    script
        .split(&format!("\n{}\n", SCENE_SEPARATOR))
        .map(|segment| segment.trim_matches('\n'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .split_once("\n\n")
                .map(|(_, body)| body)
                .unwrap_or("")
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scriptorium_core::{ConflictKind, DialogDensity, SceneKind};

    fn episode() -> Episode {
        Episode {
            id: 1,
            project_id: 1,
            number: 1,
            title: "Pilot".to_string(),
            summary: None,
            status: Default::default(),
            main_topic: None,
            sub_topics: Vec::new(),
            target_runtime_minutes: None,
            actual_runtime_minutes: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn scene(number: u32, content: &str) -> Scene {
        Scene {
            id: number as i64,
            episode_id: 1,
            number,
            display_id: format!("S01E01_SC{:02}", number),
            kind: SceneKind::Dialogue,
            title: Some(format!("Scene {}", number)),
            goal: Some(format!("goal {}", number)),
            emotion_curve: Vec::new(),
            conflict: ConflictKind::None,
            dialog_density: DialogDensity::Medium,
            character_ids: Vec::new(),
            content: content.to_string(),
            ai_generated: false,
            human_edited: false,
            generation_prompt: None,
            writer_notes: None,
            word_count: content.chars().count(),
            version: 1,
            parent_scene_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip_recovers_scene_content() {
        let scenes = vec![
            scene(1, "Mara: First line.\n(beat)\nJoon: Reply."),
            scene(2, "A single paragraph of narration."),
            scene(3, "Mara: Closing line."),
        ];
        let full = assemble_full_script(&episode(), &scenes);
        let recovered = split_full_script(&full.script);
        let expected: Vec<String> = scenes.iter().map(|s| s.content.clone()).collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn assembled_script_counts_scenes_and_words() {
        let scenes = vec![scene(1, "abcde"), scene(2, "fghij")];
        let full = assemble_full_script(&episode(), &scenes);
        assert_eq!(full.scene_count, 2);
        assert_eq!(full.total_words, 10);
        assert!(full.script.contains("## Scene 1"));
        assert!(full.script.contains(SCENE_SEPARATOR));
    }

    #[test]
    fn scene_without_goal_still_round_trips() {
        let mut s = scene(1, "content without goal header");
        s.goal = None;
        let full = assemble_full_script(&episode(), &[s]);
        let recovered = split_full_script(&full.script);
        assert_eq!(recovered, vec!["content without goal header".to_string()]);
    }

    #[test]
    fn empty_episode_yields_empty_script() {
        let full = assemble_full_script(&episode(), &[]);
        assert!(full.script.is_empty());
        assert!(split_full_script(&full.script).is_empty());
    }
}
