use serde::{Deserialize, Serialize};

/// Response envelope shared by every OpenHR API endpoint.
///
/// A response with `success: false` is an application-level failure even
/// when the transport status is 2xx — callers must branch on the flag,
/// never on the HTTP status alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Shorthand for a successful envelope, used by test fixtures.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Shorthand for a failed envelope with a message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Pagination block returned by paged list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// List payload: some resources return a bare array, others a paged
/// `{items, pagination}` object. Both decode into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Paged {
        items: Vec<T>,
        pagination: Pagination,
    },
}

impl<T> ListPayload<T> {
    /// The records, regardless of payload shape.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) => items,
            ListPayload::Paged { items, .. } => items,
        }
    }

    /// Pagination metadata, if the endpoint is paged.
    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ListPayload::Plain(_) => None,
            ListPayload::Paged { pagination, .. } => Some(pagination),
        }
    }
}

/// Parameters for list operations, serialized as query parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ListParams {
    /// Page number (1-based).
    pub page: usize,

    /// Page size.
    #[serde(rename = "perPage")]
    pub per_page: usize,

    /// Server-side search query, if the endpoint supports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
            q: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_failure_decodes_without_data() {
        let raw = r#"{"success":false,"message":"name already taken"}"#;
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("name already taken"));
    }

    #[test]
    fn test_list_payload_plain() {
        let raw = r#"[{"id":"1"},{"id":"2"}]"#;
        let payload: ListPayload<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(payload.pagination().is_none());
        assert_eq!(payload.into_items().len(), 2);
    }

    #[test]
    fn test_list_payload_paged() {
        let raw = r#"{"items":[{"id":"1"}],"pagination":{"page":1,"perPage":50,"total":1,"totalPages":1}}"#;
        let payload: ListPayload<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.pagination().unwrap().total, 1);
        assert_eq!(payload.into_items().len(), 1);
    }

    #[test]
    fn test_list_params_field_names() {
        let params = ListParams {
            page: 2,
            per_page: 25,
            q: Some("mumbai".into()),
        };
        let v = serde_json::to_value(&params).unwrap();
        assert_eq!(v["page"], 2);
        assert_eq!(v["perPage"], 25);
        assert_eq!(v["q"], "mumbai");
    }
}
