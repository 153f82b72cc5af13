use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

/// A subscription plan offered to organizations, managed from the
/// super-admin portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Monthly or yearly price in the platform currency.
    #[serde(default)]
    pub price: f64,
    /// "monthly" or "yearly".
    #[serde(default)]
    pub billing_period: String,
    #[serde(default)]
    pub max_users: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlanDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub billing_period: String,
    #[serde(default)]
    pub max_users: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for SubscriptionPlanDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("code", &self.code)
            .at_least_f64("price", self.price, 0.0)
            .range_i64("maxUsers", self.max_users, 1, 100_000);
        if self.billing_period != "monthly" && self.billing_period != "yearly" {
            rules.fail("billingPeriod", "must be monthly or yearly");
        }
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for SubscriptionPlan {
    type Draft = SubscriptionPlanDraft;
    const MODULE: &'static str = "subscription-plans";
    const ENDPOINT: &'static str = "subscription-plans";
    const SCOPE: Scope = Scope::Admin;
    const SINGULAR: &'static str = "Subscription plan";
    const PLURAL: &'static str = "subscription plans";

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
            "billingPeriod" => Some(self.billing_period.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn draft(&self) -> SubscriptionPlanDraft {
        SubscriptionPlanDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            price: self.price,
            billing_period: self.billing_period.clone(),
            max_users: self.max_users,
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "PRICE", "PERIOD", "MAX USERS", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            format!("{:.2}", self.price),
            self.billing_period.clone(),
            self.max_users.to_string(),
            self.is_active.to_string(),
        ]
    }
}
