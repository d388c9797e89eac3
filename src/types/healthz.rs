use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthzResponse {
    pub now: u64,
    pub time_zone: String,
    pub client_ip: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub success: bool,
    pub name: String,
    pub version: String,
    pub now: String,
}
