//! Success envelope shared by all endpoints.

use serde::Serialize;

/// `{"result":"ok","data":...}`, or `{"result":"ok"}` when there is no data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            result: "ok",
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        Self {
            result: "ok",
            data: None,
        }
    }
}
