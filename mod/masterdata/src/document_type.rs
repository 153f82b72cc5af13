use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

/// A document type candidates can be asked for (passport, degree, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Grouping used by the document checklist ("identity", "education").
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for DocumentTypeDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("code", &self.code)
            .require("category", &self.category);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for DocumentType {
    type Draft = DocumentTypeDraft;
    const MODULE: &'static str = "document-types";
    const ENDPOINT: &'static str = "document-types";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Document type";
    const PLURAL: &'static str = "document types";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone(), self.category.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn draft(&self) -> DocumentTypeDraft {
        DocumentTypeDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            category: self.category.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "CATEGORY", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.category.clone(),
            self.is_active.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use openhr_core::Filter;

    use super::*;

    #[test]
    fn test_category_filter() {
        let docs = vec![
            DocumentType {
                id: "d1".into(),
                name: "Passport".into(),
                code: "PASSPORT".into(),
                category: "identity".into(),
                is_active: true,
                audit: Audit::default(),
            },
            DocumentType {
                id: "d2".into(),
                name: "Degree".into(),
                code: "DEGREE".into(),
                category: "education".into(),
                is_active: true,
                audit: Audit::default(),
            },
        ];
        let hits = Filter::default().with("category", "identity").apply(&docs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "PASSPORT");
    }
}
