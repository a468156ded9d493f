//! HTTP client for the quiz API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Jurisdiction, Question, WrongAnswer};
use crate::protocol::{
    ErrorResponse, ExplainRequest, ExplainResponse, QuestionsResponse, StudyGuideRequest,
    StudyGuideResponse, TotalCountResponse,
};

/// Outlasts the server's own generation bounds so its 408 arrives first.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    /// The server gave up waiting on the text generator.
    #[error("{0}")]
    Timeout(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub struct QuizApiClient {
    client: Client,
    base_url: String,
}

impl QuizApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of questions in the server's bank.
    pub async fn total_count(&self) -> Result<usize, ClientError> {
        let response = self
            .send(
                self.client
                    .get(self.url("/questions"))
                    .query(&[("totalCount", "true")]),
            )
            .await?;
        let body: TotalCountResponse = decode(response).await?;
        Ok(body.total_count)
    }

    pub async fn questions(
        &self,
        count: usize,
        state: Option<Jurisdiction>,
    ) -> Result<Vec<Question>, ClientError> {
        let mut query = vec![("count", count.to_string())];
        if let Some(state) = state {
            query.push(("state", state.code().to_string()));
        }

        let response = self
            .send(self.client.get(self.url("/questions")).query(&query))
            .await?;
        let body: QuestionsResponse = decode(response).await?;
        Ok(body.questions)
    }

    pub async fn explain(&self, question: &Question) -> Result<String, ClientError> {
        let body: ExplainResponse = self.post("/explain", &ExplainRequest::from(question)).await?;
        Ok(body.explanation)
    }

    pub async fn study_guide(
        &self,
        wrong_questions: Vec<WrongAnswer>,
        score: u32,
        total_questions: usize,
    ) -> Result<StudyGuideResponse, ClientError> {
        let request = StudyGuideRequest {
            wrong_questions,
            score,
            total_questions,
        };
        self.post("/study-guide", &request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        decode(response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                ClientError::Connection(format!("Cannot connect to {}", self.base_url))
            } else if e.is_timeout() {
                ClientError::Timeout("The server did not respond in time.".to_string())
            } else {
                ClientError::Http(e)
            }
        })
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(error_from_status(status, &text));
    }

    serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
}

fn error_from_status(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    if status == StatusCode::REQUEST_TIMEOUT {
        ClientError::Timeout(message)
    } else {
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_status_maps_to_timeout() {
        let err = error_from_status(
            StatusCode::REQUEST_TIMEOUT,
            r#"{"error":"Please try again."}"#,
        );
        assert!(matches!(err, ClientError::Timeout(ref m) if m == "Please try again."));
    }

    #[test]
    fn test_server_error_keeps_message() {
        let err = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"No wrong questions provided"}"#,
        );
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No wrong questions provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = QuizApiClient::new("http://localhost:8712/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8712");
        assert_eq!(client.url("/health"), "http://localhost:8712/health");
    }
}
