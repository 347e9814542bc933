use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalysisRequest {
    pub image_name: Option<String>,
    pub result: serde_json::Value,
    pub notes: Option<String>,
    #[serde(default)]
    pub refer_to_derm: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnalysisRequest {
    pub image_name: Option<String>,
    pub result: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub refer_to_derm: Option<bool>,
}

// `prompt` stays optional so a missing field produces our 400 body instead
// of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}
