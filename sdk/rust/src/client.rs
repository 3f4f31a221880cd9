use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStudent {
    pub id: u32,
    #[serde(flatten)]
    pub student: Student,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 404 with its error body.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub struct StudentClient {
    client: Client,
    base_url: String,
}

impl StudentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Greeting from `GET /`.
    pub async fn greeting(&self) -> Result<String, SdkError> {
        let body: MessageBody = self.send(self.client.get(self.url("/"))).await?;
        Ok(body.message)
    }

    pub async fn list(&self) -> Result<BTreeMap<u32, Student>, SdkError> {
        self.send(self.client.get(self.url("/students"))).await
    }

    pub async fn get(&self, id: u32) -> Result<Student, SdkError> {
        self.send(self.client.get(self.url(&format!("/students/{}", id)))).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Student, SdkError> {
        let req = self.client.get(self.url("/students/name")).query(&[("name", name)]);
        self.send(req).await
    }

    pub async fn find_by_name_and_age(&self, name: &str, age: i64) -> Result<Student, SdkError> {
        let req = self
            .client
            .get(self.url(&format!("/students/age/{}", age)))
            .query(&[("name", name)]);
        self.send(req).await
    }

    pub async fn create(&self, student: &Student) -> Result<CreatedStudent, SdkError> {
        self.send(self.client.post(self.url("/student")).json(student)).await
    }

    pub async fn replace(&self, id: u32, student: &Student) -> Result<Student, SdkError> {
        let req = self.client.put(self.url(&format!("/student/{}", id))).json(student);
        self.send(req).await
    }

    /// Partial update; unset, empty and `"string"` fields are ignored server-side.
    pub async fn patch(&self, id: u32, student: &Student) -> Result<Student, SdkError> {
        let req = self.client.patch(self.url(&format!("/student/{}", id))).json(student);
        self.send(req).await
    }

    /// Delete a student, returning the server's confirmation message.
    pub async fn delete(&self, id: u32) -> Result<String, SdkError> {
        let req = self.client.delete(self.url(&format!("/student/{}", id)));
        let body: MessageBody = self.send(req).await?;
        Ok(body.message)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, SdkError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await?;
        if status == StatusCode::NOT_FOUND {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(SdkError::NotFound(message));
        }
        Err(SdkError::Status { status, body: text })
    }
}
