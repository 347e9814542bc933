use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted skin-assessment outcome. `result` is always present: either
/// the structured object the model produced or `{"rawText": ...}` when its
/// reply did not parse as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: Uuid,
    pub image_name: Option<String>,
    pub result: serde_json::Value,
    pub notes: Option<String>,
    pub refer_to_derm: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
