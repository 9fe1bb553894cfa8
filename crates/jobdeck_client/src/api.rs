use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{map_reqwest_error, ApiError, JobDetail};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The remote job-server contract. Callers batch detail fetches
/// themselves; this trait is one request per call.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Task ids for a scope, ordered by descending age. `None` lists
    /// every job on the server.
    async fn list_job_ids(&self, owner: Option<&str>) -> Result<Vec<String>, ApiError>;
    async fn fetch_job_details(&self, task_ids: &[String]) -> Result<Vec<JobDetail>, ApiError>;
    /// Returns the task ids the server actually deleted.
    async fn delete_jobs(&self, task_ids: &[String]) -> Result<Vec<String>, ApiError>;
    /// Returns the task ids the server actually stopped.
    async fn stop_jobs(&self, task_ids: &[String]) -> Result<Vec<String>, ApiError>;
    /// Uploads a problem file; the response body is the new task id.
    async fn submit_job(&self, name: &str, bytes: Vec<u8>) -> Result<String, ApiError>;
    async fn start_job(&self, task_id: &str) -> Result<(), ApiError>;
}

/// The server's request envelope: `{"Reqstr": <op>, "Reqdata": {...}}`
/// posted to `/users/api/request`.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    #[serde(rename = "Reqstr")]
    reqstr: &'a str,
    #[serde(rename = "Reqdata")]
    reqdata: T,
}

#[derive(Serialize)]
struct ByUser<'a> {
    #[serde(rename = "Userid")]
    userid: &'a str,
}

#[derive(Serialize)]
struct ByTaskids<'a> {
    #[serde(rename = "Taskids")]
    taskids: &'a [String],
}

#[derive(Serialize)]
struct ByJobids<'a> {
    #[serde(rename = "Jobids")]
    jobids: &'a [String],
}

#[derive(Serialize)]
struct Empty {}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestJobApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::InvalidBaseUrl(settings.base_url));
        }
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T: Serialize, R: DeserializeOwned>(
        &self,
        reqstr: &str,
        reqdata: T,
    ) -> Result<R, ApiError> {
        let response = self
            .client
            .post(self.url("/users/api/request"))
            .json(&Envelope { reqstr, reqdata })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        response
            .json::<R>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn list_job_ids(&self, owner: Option<&str>) -> Result<Vec<String>, ApiError> {
        match owner {
            // The owner-scoped query answers with full details; order by
            // descending age and keep only the ids so both scopes feed
            // the same batched detail-fetch path.
            Some(userid) => {
                let mut details: Vec<JobDetail> =
                    self.request("job-info", ByUser { userid }).await?;
                details.sort_by(|a, b| b.age_ms.cmp(&a.age_ms));
                Ok(details.into_iter().map(|d| d.taskid).collect())
            }
            None => self.request("job-list", Empty {}).await,
        }
    }

    async fn fetch_job_details(&self, task_ids: &[String]) -> Result<Vec<JobDetail>, ApiError> {
        self.request("job-info", ByTaskids { taskids: task_ids })
            .await
    }

    async fn delete_jobs(&self, task_ids: &[String]) -> Result<Vec<String>, ApiError> {
        self.request("delete-jobs", ByJobids { jobids: task_ids })
            .await
    }

    async fn stop_jobs(&self, task_ids: &[String]) -> Result<Vec<String>, ApiError> {
        self.request("stop-jobs", ByJobids { jobids: task_ids })
            .await
    }

    async fn submit_job(&self, name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("/api/submit"))
            .query(&[("jobname", name)])
            .body(bytes)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        let task_id = response
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let task_id = task_id.trim().to_string();
        if task_id.is_empty() {
            return Err(ApiError::Decode("empty task id in response".to_string()));
        }
        Ok(task_id)
    }

    async fn start_job(&self, task_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.url("/api/solve-background"))
            .query(&[("token", task_id)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
