use serde::{Deserialize, Serialize};

/// Body of `POST /applications`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApplyDescriptor {
    pub post_id: u64,
    pub applicant_id: u64,
    pub message: String,
}

/// Body of `PATCH /applications/:id`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ApplicationStatusDescriptor {
    pub status: super::ApplicationStatus,
}

/// Query of `GET /applications`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<u64>,
}

impl ApplicationQuery {
    pub fn matches(&self, application: &super::Application) -> bool {
        self.post_id.map_or(true, |id| application.post_id == id)
            && self
                .applicant_id
                .map_or(true, |id| application.applicant_id == id)
    }
}
