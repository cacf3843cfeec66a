//! HTTP client for communicating with agenda-server

use async_trait::async_trait;
use serde::Deserialize;

use agenda_core::protocol::{
    CompleteScheduleRequest, CreateScheduleRequest, DeleteScheduleRequest, UpdateScheduleRequest,
};
use agenda_core::{AgendaError, AgendaResult, ScheduleApi, ScheduleCollection};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// HTTP implementation of `ScheduleApi` against agenda-server.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error body returned by the server
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Map response statuses back onto domain errors: 404 means the tuple
    /// matched nothing, 422 means the server rejected the payload.
    async fn check(&self, response: reqwest::Response) -> AgendaResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("server answered {status}"),
        };

        match status {
            reqwest::StatusCode::NOT_FOUND => Err(AgendaError::ScheduleNotFound(message)),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY => Err(AgendaError::Validation(message)),
            _ => Err(AgendaError::Transport(message)),
        }
    }
}

fn transport(err: reqwest::Error) -> AgendaError {
    AgendaError::Transport(err.to_string())
}

#[async_trait]
impl ScheduleApi for HttpClient {
    async fn fetch_all(&self) -> AgendaResult<ScheduleCollection> {
        let response = self
            .http
            .get(self.url("/schedules"))
            .send()
            .await
            .map_err(transport)?;

        self.check(response)
            .await?
            .json::<ScheduleCollection>()
            .await
            .map_err(|err| AgendaError::Serialization(err.to_string()))
    }

    async fn create(&self, req: CreateScheduleRequest) -> AgendaResult<()> {
        let response = self
            .http
            .post(self.url("/schedules"))
            .json(&req)
            .send()
            .await
            .map_err(transport)?;

        self.check(response).await?;
        Ok(())
    }

    async fn update(&self, req: UpdateScheduleRequest) -> AgendaResult<()> {
        let response = self
            .http
            .put(self.url("/schedules"))
            .json(&req)
            .send()
            .await
            .map_err(transport)?;

        self.check(response).await?;
        Ok(())
    }

    async fn delete(&self, req: DeleteScheduleRequest) -> AgendaResult<()> {
        let response = self
            .http
            .delete(self.url("/schedules"))
            .json(&req)
            .send()
            .await
            .map_err(transport)?;

        self.check(response).await?;
        Ok(())
    }

    async fn complete(&self, req: CompleteScheduleRequest) -> AgendaResult<()> {
        let response = self
            .http
            .post(self.url("/complete_schedule"))
            .json(&req)
            .send()
            .await
            .map_err(transport)?;

        self.check(response).await?;
        Ok(())
    }
}
