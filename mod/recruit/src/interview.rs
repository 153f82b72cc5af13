use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

pub const INTERVIEW_MODES: &[&str] = &["onsite", "remote", "phone"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub candidate_id: String,
    pub interviewer: String,
    #[serde(default)]
    pub round: i64,
    /// RFC 3339 timestamp.
    pub scheduled_at: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDraft {
    pub candidate_id: String,
    pub interviewer: String,
    #[serde(default)]
    pub round: i64,
    pub scheduled_at: String,
    #[serde(default)]
    pub mode: String,
}

impl Default for InterviewDraft {
    fn default() -> Self {
        Self {
            candidate_id: String::new(),
            interviewer: String::new(),
            round: 1,
            scheduled_at: String::new(),
            mode: "remote".to_string(),
        }
    }
}

impl Draft for InterviewDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("candidateId", &self.candidate_id)
            .require("interviewer", &self.interviewer)
            .require("scheduledAt", &self.scheduled_at)
            .range_i64("round", self.round, 1, 20);
        if !INTERVIEW_MODES.contains(&self.mode.as_str()) {
            rules.fail("mode", "must be onsite, remote, or phone");
        }
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for Interview {
    type Draft = InterviewDraft;
    const MODULE: &'static str = "interviews";
    const ENDPOINT: &'static str = "interviews";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Interview";
    const PLURAL: &'static str = "interviews";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.interviewer.clone(), self.candidate_id.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "candidateId" => Some(self.candidate_id.clone()),
            "mode" => Some(self.mode.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn draft(&self) -> InterviewDraft {
        InterviewDraft {
            candidate_id: self.candidate_id.clone(),
            interviewer: self.interviewer.clone(),
            round: self.round,
            scheduled_at: self.scheduled_at.clone(),
            mode: self.mode.clone(),
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "CANDIDATE", "ROUND", "WHEN", "MODE", "STATUS"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.candidate_id.clone(),
            self.round.to_string(),
            self.scheduled_at.clone(),
            self.mode.clone(),
            self.status.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_must_be_positive() {
        let draft = InterviewDraft {
            candidate_id: "c1".into(),
            interviewer: "Priya".into(),
            round: 0,
            scheduled_at: "2026-09-01T10:00:00Z".into(),
            mode: "remote".into(),
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "round");
    }

    #[test]
    fn test_mode_is_closed_set() {
        let draft = InterviewDraft {
            candidate_id: "c1".into(),
            interviewer: "Priya".into(),
            scheduled_at: "2026-09-01T10:00:00Z".into(),
            mode: "carrier-pigeon".into(),
            ..InterviewDraft::default()
        };
        assert!(draft.validate().iter().any(|e| e.field == "mode"));
    }
}
