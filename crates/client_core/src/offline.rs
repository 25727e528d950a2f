//! Canned tiered replies for demo runs that never touch the backend.

use shared::domain::Tier;

pub const EMPTY_QUESTION_PROMPT: &str = "Please enter a question.";

const FOUNDATIONAL_REPLY: &str = "Classification assigns input data into predefined categories. \
     It is evaluated using metrics such as accuracy, precision, recall, and F1-score.";

const COMPETENT_REPLY: &str = "Classification models are evaluated using accuracy, precision, \
     recall, and F1-score. Accuracy measures overall correctness, precision measures the \
     correctness of positive predictions, and recall measures the ability to identify actual \
     positives.";

const ADVANCED_REPLY: &str = "Classification models decision boundaries in feature space using \
     probabilistic or margin-based approaches.";

/// Deterministically selects one of three fixed answers by tier. The
/// question only matters for the emptiness check; every tier other than
/// foundational or competent takes the advanced branch.
pub fn canned_reply(tier: Tier, question: &str) -> &'static str {
    if question.trim().is_empty() {
        return EMPTY_QUESTION_PROMPT;
    }
    match tier {
        Tier::Foundational => FOUNDATIONAL_REPLY,
        Tier::Competent => COMPETENT_REPLY,
        Tier::Advanced => ADVANCED_REPLY,
    }
}

#[cfg(test)]
#[path = "tests/offline_tests.rs"]
mod tests;
