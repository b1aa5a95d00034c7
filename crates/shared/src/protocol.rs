use serde::{Deserialize, Serialize};

/// Body of `GET /status` on the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status_code: u16,
    pub status: String,
    #[serde(default)]
    pub products_count: usize,
}

impl StatusResponse {
    pub fn is_healthy(&self) -> bool {
        self.status_code == 200
    }
}
