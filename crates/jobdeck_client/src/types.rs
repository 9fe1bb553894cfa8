use serde::Deserialize;
use thiserror::Error;

/// One job's detail fields exactly as the server reports them. Field
/// names on the wire are the server's capitalized spellings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobDetail {
    #[serde(rename = "Taskid")]
    pub taskid: String,
    #[serde(rename = "Ownerid", default)]
    pub ownerid: String,
    #[serde(rename = "Desc", default)]
    pub desc: String,
    #[serde(rename = "Submitaddr", default)]
    pub submit_addr: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Age", default)]
    pub age_ms: u64,
    #[serde(rename = "Starttime", default)]
    pub starttime_ms: i64,
    #[serde(rename = "Endtime", default)]
    pub endtime_ms: i64,
    #[serde(rename = "ResCode", default)]
    pub res_code: String,
    #[serde(rename = "TrmCode", default)]
    pub trm_code: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
