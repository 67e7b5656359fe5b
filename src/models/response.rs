use serde::Serialize;

/// Success envelope shared by every endpoint.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T: Serialize> {
    pub code: u8,
    pub msg: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            code: 1,
            msg: "success",
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        ApiResponse {
            code: 1,
            msg: "success",
            data: None,
        }
    }
}
