use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the visible conversation. Turns are append-only: once
/// pushed onto the transcript they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Learner competence band assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Foundational,
    Competent,
    Advanced,
}

impl Tier {
    /// Canonicalizes a backend tier/persona label. The backend is loose about
    /// the top band (`advanced`, `expert`, `mastery`, free-form persona
    /// names), so everything that is not foundational or competent lands on
    /// `Advanced`.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("foundational") {
            Tier::Foundational
        } else if label.eq_ignore_ascii_case("competent") {
            Tier::Competent
        } else {
            Tier::Advanced
        }
    }

    /// Capitalized name for the sidebar label.
    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Foundational => "Foundational",
            Tier::Competent => "Competent",
            Tier::Advanced => "Advanced",
        }
    }
}

/// Per-session metadata carried across turns. Mutated only by a successful
/// step response and wiped on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub tier: Option<Tier>,
    pub intent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_labels_canonicalize_case_insensitively() {
        assert_eq!(Tier::from_label("Foundational"), Tier::Foundational);
        assert_eq!(Tier::from_label("COMPETENT"), Tier::Competent);
        assert_eq!(Tier::from_label("advanced"), Tier::Advanced);
        assert_eq!(Tier::from_label("expert"), Tier::Advanced);
        assert_eq!(Tier::from_label("mastery"), Tier::Advanced);
    }
}
