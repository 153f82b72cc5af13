use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub dial_code: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub dial_code: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for CountryDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("code", &self.code)
            .min_len("code", &self.code, 2)
            .max_len("code", &self.code, 3);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for Country {
    type Draft = CountryDraft;
    const MODULE: &'static str = "countries";
    const ENDPOINT: &'static str = "countries";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Country";
    const PLURAL: &'static str = "countries";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn draft(&self) -> CountryDraft {
        CountryDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            dial_code: self.dial_code.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "DIAL", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.dial_code.clone(),
            self.is_active.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_name_and_code() {
        let errors = CountryDraft::default().validate();
        assert!(errors.iter().any(|e| e.field == "name"));
        assert!(errors.iter().any(|e| e.field == "code"));
    }

    #[test]
    fn test_code_length_bounds() {
        let draft = CountryDraft {
            name: "India".into(),
            code: "INDIA".into(),
            ..CountryDraft::default()
        };
        assert_eq!(draft.validate().len(), 1);

        let draft = CountryDraft {
            name: "India".into(),
            code: "IN".into(),
            ..CountryDraft::default()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_wire_format() {
        let raw = r#"{"id":"c1","name":"India","code":"IN","dialCode":"+91","isActive":true,
                      "createdAt":"2025-01-01T00:00:00Z","createdBy":"u1"}"#;
        let country: Country = serde_json::from_str(raw).unwrap();
        assert_eq!(country.code, "IN");
        assert_eq!(country.audit.created_by.as_deref(), Some("u1"));
        assert_eq!(Country::collection_path(), "/api/v1/org/countries");
    }

    #[test]
    fn test_edit_draft_seeds_from_record() {
        let country = Country {
            id: "c1".into(),
            name: "India".into(),
            code: "IN".into(),
            dial_code: "+91".into(),
            is_active: true,
            audit: Audit::default(),
        };
        let draft = country.draft();
        assert_eq!(draft.name, "India");
        assert_eq!(draft.dial_code, "+91");
    }
}
