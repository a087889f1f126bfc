//! The active-recall tutor agent.
//!
//! Three modes over a concept library: learn (the agent explains), quiz (the
//! agent asks), and teach-back (the caller explains). Mode switching and
//! concept selection are keyword driven, with no completion calls; each mode
//! speaks with its own voice profile, which the transport layer applies when
//! synthesis is attached.

use std::path::Path;

use serde::Deserialize;

/// Where the concept library lives unless overridden.
pub const DEFAULT_CONTENT_FILE: &str = "tutor_concepts.json";

/// One teachable concept from the content file.
#[derive(Debug, Clone, Deserialize)]
pub struct Concept {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sample_question: String,
}

/// Loads the concept library. A missing or unreadable file yields an empty
/// library rather than an error; the tutor still runs, it just has nothing
/// to teach.
pub fn load_concepts(path: &Path) -> Vec<Concept> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "concept file unavailable");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(concepts) => concepts,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "concept file malformed");
            Vec::new()
        }
    }
}

/// The tutor's three teaching modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorMode {
    Learn,
    Quiz,
    TeachBack,
}

/// A synthesis voice, one per mode so callers hear which mode they are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    pub name: &'static str,
    pub model: &'static str,
}

impl TutorMode {
    pub fn voice(self) -> VoiceProfile {
        match self {
            TutorMode::Learn => VoiceProfile {
                name: "Matthew",
                model: "en-US-matthew",
            },
            TutorMode::Quiz => VoiceProfile {
                name: "Alicia",
                model: "en-US-alicia",
            },
            TutorMode::TeachBack => VoiceProfile {
                name: "Ken",
                model: "en-US-ken",
            },
        }
    }
}

/// A live tutoring conversation.
///
/// Purely deterministic: utterances switch modes, pick concepts, or get a
/// mode-appropriate acknowledgement. Nothing here is async and nothing is
/// shared, so the session is plain mutable state.
pub struct TutorSession {
    concepts: Vec<Concept>,
    mode: Option<TutorMode>,
    current: Option<usize>,
}

impl TutorSession {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self {
            concepts,
            mode: None,
            current: None,
        }
    }

    pub fn greeting(&self) -> &'static str {
        "Hello! I'm your active recall coach. Would you like to learn, be quizzed, \
         or teach a concept back to me?"
    }

    /// The voice the current mode speaks with, once a mode is chosen.
    pub fn voice(&self) -> Option<VoiceProfile> {
        self.mode.map(TutorMode::voice)
    }

    /// Handles one utterance: mode keywords first, then concept selection,
    /// then a mode-appropriate follow-up.
    pub fn handle_utterance(&mut self, text: &str) -> String {
        let lower = text.to_lowercase();

        // Mode switching wins over everything, any time.
        if lower.contains("learn") {
            return self.switch_mode(TutorMode::Learn);
        }
        if lower.contains("quiz") {
            return self.switch_mode(TutorMode::Quiz);
        }
        if lower.contains("teach") {
            return self.switch_mode(TutorMode::TeachBack);
        }

        // Concept selection by id or title.
        if let Some(index) = self.concepts.iter().position(|concept| {
            lower.contains(&concept.id.to_lowercase())
                || lower.contains(&concept.title.to_lowercase())
        }) {
            self.current = Some(index);
            return self.present_concept(index);
        }

        match self.mode {
            Some(TutorMode::Quiz) => {
                "Nice! Want another question, or switch modes?".to_string()
            }
            Some(TutorMode::TeachBack) => {
                "Thanks for explaining! That shows good understanding. \
                 Want to try another concept?"
                    .to_string()
            }
            Some(TutorMode::Learn) => {
                format!(
                    "Which concept would you like? I can cover {}.",
                    self.concept_menu()
                )
            }
            None => "Let's pick a mode first: learn, quiz, or teach back?".to_string(),
        }
    }

    fn switch_mode(&mut self, mode: TutorMode) -> String {
        self.mode = Some(mode);
        tracing::info!(?mode, voice = mode.voice().name, "tutor mode switched");
        match mode {
            TutorMode::Learn => format!(
                "Great, you're in learn mode! Which concept? I can cover {}.",
                self.concept_menu()
            ),
            TutorMode::Quiz => {
                "Okay, quiz mode! Which concept should I quiz you on?".to_string()
            }
            TutorMode::TeachBack => {
                "You're in teach-back mode! Which concept will you teach me?".to_string()
            }
        }
    }

    fn present_concept(&self, index: usize) -> String {
        let concept = &self.concepts[index];
        match self.mode {
            Some(TutorMode::Learn) | None => format!(
                "Here's the concept: {} Would you like another concept, or to \
                 switch modes?",
                concept.summary
            ),
            Some(TutorMode::Quiz) => concept.sample_question.clone(),
            Some(TutorMode::TeachBack) => format!(
                "Okay, teach this back to me: {}",
                concept.sample_question
            ),
        }
    }

    fn concept_menu(&self) -> String {
        if self.concepts.is_empty() {
            return "nothing yet; the concept file is empty".to_string();
        }
        self.concepts
            .iter()
            .map(|concept| concept.title.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
