use serde::{Deserialize, Serialize};

use crate::nudges::repo_types::{NudgeRecord, NudgeResponse, NudgeType};

#[derive(Debug, Serialize)]
pub struct NudgesResponse {
    pub nudges: Vec<NudgeRecord>,
    pub unread: usize,
}

#[derive(Debug, Deserialize)]
pub struct TriggerNudgeRequest {
    #[serde(rename = "type")]
    pub kind: NudgeType,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub response: NudgeResponse,
}
