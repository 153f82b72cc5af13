use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

/// Stages a candidate moves through.
pub const CANDIDATE_STATUSES: &[&str] = &[
    "applied",
    "screening",
    "interviewing",
    "offered",
    "hired",
    "rejected",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub position: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub position: String,
    #[serde(default)]
    pub status: String,
}

impl Default for CandidateDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            position: String::new(),
            status: "applied".to_string(),
        }
    }
}

impl Draft for CandidateDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("firstName", &self.first_name)
            .require("lastName", &self.last_name)
            .require("email", &self.email)
            .email("email", &self.email)
            .min_len("phone", &self.phone, 7)
            .require("position", &self.position);
        if !CANDIDATE_STATUSES.contains(&self.status.as_str()) {
            rules.fail("status", "is not a known candidate status");
        }
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for Candidate {
    type Draft = CandidateDraft;
    const MODULE: &'static str = "candidates";
    const ENDPOINT: &'static str = "candidates";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Candidate";
    const PLURAL: &'static str = "candidates";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn search_text(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.email.clone(),
            self.position.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            "position" => Some(self.position.clone()),
            _ => None,
        }
    }

    fn draft(&self) -> CandidateDraft {
        CandidateDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            status: self.status.clone(),
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "EMAIL", "POSITION", "STATUS"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            self.position.clone(),
            self.status.clone(),
        ]
    }
}
