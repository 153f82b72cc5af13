//! The simple lookup sets: genders, religions, blood groups, marital
//! statuses, education levels.
//!
//! All five share one shape (name, code, display order, active flag) and
//! one set of rules, so the record/draft/descriptor boilerplate is
//! stamped out by a macro. Only the module code and display names vary.

use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

macro_rules! lookup_resource {
    ($record:ident, $draft:ident, $module:literal, $singular:literal, $plural:literal) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $record {
            pub id: String,
            pub name: String,
            pub code: String,
            #[serde(default)]
            pub display_order: i64,
            #[serde(default)]
            pub is_active: bool,
            #[serde(flatten)]
            pub audit: Audit,
        }

        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $draft {
            pub name: String,
            pub code: String,
            #[serde(default)]
            pub display_order: i64,
            #[serde(default)]
            pub is_active: bool,
        }

        impl Draft for $draft {
            fn validate(&self) -> Vec<FieldError> {
                let mut rules = FieldRules::new();
                rules
                    .require("name", &self.name)
                    .require("code", &self.code)
                    .range_i64("displayOrder", self.display_order, 0, 999);
                rules.finish().err().unwrap_or_default()
            }
        }

        impl Resource for $record {
            type Draft = $draft;
            const MODULE: &'static str = $module;
            const ENDPOINT: &'static str = $module;
            const SCOPE: Scope = Scope::Org;
            const SINGULAR: &'static str = $singular;
            const PLURAL: &'static str = $plural;

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

            fn draft(&self) -> $draft {
                $draft {
                    name: self.name.clone(),
                    code: self.code.clone(),
                    display_order: self.display_order,
                    is_active: self.is_active,
                }
            }

            fn columns() -> &'static [Column] {
                &["ID", "NAME", "CODE", "ORDER", "ACTIVE"]
            }

            fn row(&self) -> Vec<String> {
                vec![
                    self.id.clone(),
                    self.name.clone(),
                    self.code.clone(),
                    self.display_order.to_string(),
                    self.is_active.to_string(),
                ]
            }
        }
    };
}

lookup_resource!(Gender, GenderDraft, "genders", "Gender", "genders");
lookup_resource!(Religion, ReligionDraft, "religions", "Religion", "religions");
lookup_resource!(
    BloodGroup,
    BloodGroupDraft,
    "blood-groups",
    "Blood group",
    "blood groups"
);
lookup_resource!(
    MaritalStatus,
    MaritalStatusDraft,
    "marital-statuses",
    "Marital status",
    "marital statuses"
);
lookup_resource!(
    EducationLevel,
    EducationLevelDraft,
    "education-levels",
    "Education level",
    "education levels"
);
