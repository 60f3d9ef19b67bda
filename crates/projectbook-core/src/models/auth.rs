use serde::{Deserialize, Serialize};

/// Body returned by `POST /token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
