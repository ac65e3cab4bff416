//! HTTP client for the career recommendation backend.
//!
//! The backend is an external collaborator: this crate only knows the four
//! page-facing endpoints (plus skill autocomplete) and how to classify their
//! responses. Anything that fails below the HTTP layer surfaces as a
//! [`ClientError`]; anything the server answered is an outcome value.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    multipart::{Form, Part},
    Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::CareerId,
    endpoints,
    protocol::{
        AssessmentForm, CareerDetail, CareerDetailsResponse, ProcessResumeResponse,
        UserDataResponse, UserSnapshot,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::{ClientError, Result};

/// Multipart field name of the resume file input.
pub const RESUME_FIELD: &str = "resume_file";
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Accepted,
    Rejected { status: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResumeOutcome {
    Processed { skills: Vec<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserDataOutcome {
    Unauthorized,
    Loaded(UserSnapshot),
    Unavailable { status: u16, error: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CareerDetailsOutcome {
    Found(Box<CareerDetail>),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Ok(Self {
            filename,
            mime_type,
            bytes,
        })
    }
}

#[async_trait]
pub trait CareerBackend: Send + Sync {
    async fn submit_assessment(&self, form: &AssessmentForm) -> Result<AssessmentOutcome>;
    async fn process_resume(&self, upload: &ResumeUpload) -> Result<ResumeOutcome>;
    async fn load_user_data(&self) -> Result<UserDataOutcome>;
    async fn career_details(&self, career_id: CareerId) -> Result<CareerDetailsOutcome>;
    async fn skills_autocomplete(&self, query: &str) -> Result<Vec<String>>;
}

pub struct HttpCareerBackend {
    http: Client,
    base_url: Url,
}

impl HttpCareerBackend {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::build(server_url, None)
    }

    /// Sends `cookie` verbatim with every request, e.g. a Flask `session=...` pair.
    pub fn with_session_cookie(server_url: &str, cookie: &str) -> Result<Self> {
        Self::build(server_url, Some(cookie))
    }

    fn build(server_url: &str, cookie: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(server_url).map_err(|source| ClientError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })?;
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let http = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Endpoint paths are absolute, so any path on the base url is replaced.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path.trim_start_matches('/')),
                source,
            })
    }
}

async fn decode_body<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[async_trait]
impl CareerBackend for HttpCareerBackend {
    async fn submit_assessment(&self, form: &AssessmentForm) -> Result<AssessmentOutcome> {
        let body = form
            .form_pairs()
            .into_iter()
            .fold(Form::new(), |body, (name, value)| body.text(name, value));
        let response = self
            .http
            .post(self.endpoint(endpoints::SUBMIT_ASSESSMENT)?)
            .multipart(body)
            .send()
            .await?;
        let status = response.status();
        debug!(status = status.as_u16(), "assessment submitted");
        if status.is_success() {
            Ok(AssessmentOutcome::Accepted)
        } else {
            Ok(AssessmentOutcome::Rejected {
                status: status.as_u16(),
            })
        }
    }

    async fn process_resume(&self, upload: &ResumeUpload) -> Result<ResumeOutcome> {
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone());
        if let Some(mime_type) = &upload.mime_type {
            part = part.mime_str(mime_type)?;
        }
        let response = self
            .http
            .post(self.endpoint(endpoints::PROCESS_RESUME)?)
            .multipart(Form::new().part(RESUME_FIELD, part))
            .send()
            .await?;
        debug!(
            status = response.status().as_u16(),
            filename = %upload.filename,
            size_bytes = upload.bytes.len(),
            "resume upload answered"
        );
        let body: ProcessResumeResponse = decode_body(response, endpoints::PROCESS_RESUME).await?;
        if body.success {
            Ok(ResumeOutcome::Processed {
                skills: body.skills,
            })
        } else {
            Ok(ResumeOutcome::Failed {
                error: body.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            })
        }
    }

    async fn load_user_data(&self) -> Result<UserDataOutcome> {
        let response = self
            .http
            .get(self.endpoint(endpoints::USER_DATA)?)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(UserDataOutcome::Unauthorized);
        }

        match decode_body::<UserDataResponse>(response, endpoints::USER_DATA).await {
            Ok(body) if body.success => Ok(UserDataOutcome::Loaded(body.into())),
            Ok(body) => Ok(UserDataOutcome::Unavailable {
                status: status.as_u16(),
                error: body.error,
            }),
            Err(ClientError::Decode { .. }) if !status.is_success() => {
                Ok(UserDataOutcome::Unavailable {
                    status: status.as_u16(),
                    error: None,
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn career_details(&self, career_id: CareerId) -> Result<CareerDetailsOutcome> {
        let path = endpoints::career_details(career_id);
        let response = self.http.get(self.endpoint(&path)?).send().await?;
        let status = response.status();

        match decode_body::<CareerDetailsResponse>(response, &path).await {
            Ok(CareerDetailsResponse::Detail(detail)) => Ok(CareerDetailsOutcome::Found(detail)),
            Ok(CareerDetailsResponse::Failure { error }) => {
                warn!(%career_id, status = status.as_u16(), %error, "career details rejected");
                Ok(CareerDetailsOutcome::Failed { error })
            }
            Err(ClientError::Decode { .. }) if !status.is_success() => {
                Ok(CareerDetailsOutcome::Failed {
                    error: format!("HTTP {}", status.as_u16()),
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn skills_autocomplete(&self, query: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.endpoint(endpoints::SKILLS_AUTOCOMPLETE)?)
            .query(&[("q", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            warn!(
                status = response.status().as_u16(),
                "skill autocomplete unavailable"
            );
            return Ok(Vec::new());
        }
        decode_body(response, endpoints::SKILLS_AUTOCOMPLETE).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
