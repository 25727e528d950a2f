use serde::{Deserialize, Serialize};

/// Body of a step request. `answer: null` asks the backend for the first
/// step of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    pub answer: Option<String>,
}

/// One backend tutoring step. Every field is optional: the backend sends
/// whatever the current phase produced (onboarding assessment, explanation,
/// checkpoint question) and the client degrades field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Multiple-choice options during the onboarding assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    /// Mastery score for the current subtopic, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_request_serializes_null_answer() {
        let body = serde_json::to_string(&StepRequest { answer: None }).expect("serialize");
        assert_eq!(body, r#"{"answer":null}"#);
    }

    #[test]
    fn step_response_decodes_with_missing_and_unknown_fields() {
        let step: StepResponse =
            serde_json::from_str(r#"{"question":"Which best describes you?","server_ts":1}"#)
                .expect("decode");
        assert_eq!(step.question.as_deref(), Some("Which best describes you?"));
        assert_eq!(step.tier, None);
        assert_eq!(step.explanation, None);
    }

    #[test]
    fn step_response_decodes_null_fields_as_absent() {
        let step: StepResponse =
            serde_json::from_str(r#"{"explanation":null,"tier":"competent","score":0.3}"#)
                .expect("decode");
        assert_eq!(step.explanation, None);
        assert_eq!(step.tier.as_deref(), Some("competent"));
        assert_eq!(step.score, Some(0.3));
    }
}
