use serde::{Deserialize, Serialize};

/// Body of every non-2xx answer.
///
/// For authorization failures `message` holds the machine-readable code
/// (e.g. `authorization_header_missing`), otherwise a short human string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// A flash-style confirmation returned by booking writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<SearchItem>,
    pub search_term: String,
}
