/// What came back for an [`ApiRequest`](super::ApiRequest).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub duration_ms: u64,
    pub size_bytes: usize,
}

impl ApiResponse {
    /// Parses the body as JSON, `None` when it is not JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}
