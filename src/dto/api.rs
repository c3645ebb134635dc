//! Response envelope returned by the back-office REST endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::services::{ServiceError, ServiceResult};

/// `{ success, data, message }` wrapper used by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, turning a reported failure into an error.
    pub fn into_result(self) -> ServiceResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ServiceError::Backend(
                self.message
                    .unwrap_or_else(|| "response carried no data".to_string()),
            )),
            (false, _) => Err(ServiceError::Backend(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            )),
        }
    }
}

/// Payload of a search endpoint: one page of records and the total count.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(alias = "records", alias = "docs")]
    pub items: Vec<Value>,
    #[serde(alias = "totalDocs", alias = "count")]
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn successful_envelope_yields_data() {
        let response: ApiResponse<SearchPage> = serde_json::from_value(json!({
            "success": true,
            "data": {"items": [{"_id": "a"}], "total": 7},
            "message": "ok"
        }))
        .unwrap();

        let page = response.into_result().unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn accepts_alternative_field_names() {
        let page: SearchPage =
            serde_json::from_value(json!({"docs": [], "totalDocs": 3})).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn failure_carries_backend_message() {
        let response: ApiResponse<SearchPage> = serde_json::from_value(json!({
            "success": false,
            "message": "Employee not found"
        }))
        .unwrap();

        match response.into_result() {
            Err(ServiceError::Backend(message)) => assert_eq!(message, "Employee not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_an_error() {
        let response: ApiResponse<SearchPage> =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert!(response.data.is_none());
        assert!(response.message.is_none());
        assert!(matches!(
            response.into_result(),
            Err(ServiceError::Backend(_))
        ));
    }
}
