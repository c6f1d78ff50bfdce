//! Client for the gym's membership API.

use crate::errors::ApiError;
use crate::models::{AuthResponse, ClassSession, Student, WorkoutRecord};
use crate::normalize::{auth_from_value, classes_from_value, normalize_workouts, student_from_value};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

#[async_trait]
pub trait MembershipApi: Send + Sync {
    async fn workout_history(&self, registration: u64) -> Result<Vec<WorkoutRecord>, ApiError>;

    async fn student(&self, registration: u64) -> Result<Option<Student>, ApiError>;

    /// Classes scheduled on `date` (`YYYY-MM-DD`).
    async fn classes_on(&self, date: &str) -> Result<Vec<ClassSession>, ApiError>;

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
}

#[derive(Clone, Debug)]
pub struct ReqwestMembershipApi {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestMembershipApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}/", self.base_url)
    }

    /// GET an endpoint and decode whatever JSON it answers with. Error
    /// statuses are not rejected here: their bodies go through the same
    /// normalization as successful ones.
    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let resp = self.client.get(self.url(endpoint)).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "membership api answered with an error status");
        }
        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl MembershipApi for ReqwestMembershipApi {
    async fn workout_history(&self, registration: u64) -> Result<Vec<WorkoutRecord>, ApiError> {
        let body = self
            .get_json("historico", &[("matricula", registration.to_string())])
            .await?;
        let records = normalize_workouts(&body);
        debug!(registration, count = records.len(), "loaded workout history");
        Ok(records)
    }

    async fn student(&self, registration: u64) -> Result<Option<Student>, ApiError> {
        let body = self
            .get_json("alunos", &[("matricula", registration.to_string())])
            .await?;
        Ok(student_from_value(&body))
    }

    async fn classes_on(&self, date: &str) -> Result<Vec<ClassSession>, ApiError> {
        let body = self
            .get_json("aulas_by_date", &[("data", date.to_string())])
            .await?;
        Ok(classes_from_value(&body))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let resp = self
            .client
            .post(self.url("autenticar"))
            .query(&[("email", email), ("senha", password)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = resp.json::<Value>().await?;
        Ok(auth_from_value(&body))
    }
}
