//! Named, file-backed fake responses.
//!
//! A fixture named `users/index` lives at `{fixture_path}/users/index.json` and holds
//! a [`RecordedResponse`]:
//!
//! ```json
//! {
//!   "statusCode": 200,
//!   "headers": { "Content-Type": "application/json" },
//!   "data": "{\"id\":1}"
//! }
//! ```
//!
//! Bodies that are not valid UTF-8 are stored base64-encoded with
//! `"encoding": "base64"`.

use super::fake_response::FakeResponse;
use super::mock_response::MockResponse;
use super::storage::Storage;
use crate::config::MockConfig;
use crate::error::{Result, TavernError};
use crate::repositories::body::{Body, BodyRepository, StreamHandle, StringBodyRepository};
use crate::repositories::ArrayStore;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Encoding of [`RecordedResponse::data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataEncoding {
    /// Binary body, base64 encoded
    Base64,
}

/// A response as persisted in a fixture file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedResponse {
    status_code: u16,
    #[serde(default)]
    headers: ArrayStore,
    #[serde(default)]
    data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoding: Option<DataEncoding>,
}

impl RecordedResponse {
    /// Record a response, base64-encoding bodies that are not UTF-8
    pub fn new(status_code: u16, headers: ArrayStore, body: &[u8]) -> Self {
        let (data, encoding) = match std::str::from_utf8(body) {
            Ok(text) => (text.to_string(), None),
            Err(_) => (STANDARD.encode(body), Some(DataEncoding::Base64)),
        };
        RecordedResponse {
            status_code,
            headers,
            data,
            encoding,
        }
    }

    /// Record a fake response. Stream bodies are rewound afterwards.
    pub fn from_fake_response<F: FakeResponse>(response: &F) -> Result<Self> {
        Ok(Self::new(
            response.status(),
            response.headers().clone(),
            &response.body().to_bytes()?,
        ))
    }

    /// Record a real response. Header values that are not visible ASCII are skipped.
    pub fn from_http<B: AsRef<[u8]>>(response: &http::Response<B>) -> Self {
        let mut headers = ArrayStore::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.add(name.as_str(), value);
            }
        }
        Self::new(response.status().as_u16(), headers, response.body().as_ref())
    }

    /// Parse a fixture file
    pub fn from_json(contents: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(contents)?)
    }

    /// Serialize for a fixture file
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Recorded status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Recorded headers
    pub fn headers(&self) -> &ArrayStore {
        &self.headers
    }

    /// Stored body text (base64 when [`encoding`](Self::encoding) says so)
    pub fn data(&self) -> &str {
        &self.data
    }

    /// How `data` is encoded
    pub fn encoding(&self) -> Option<DataEncoding> {
        self.encoding
    }

    /// The decoded body
    pub fn body_bytes(&self) -> Result<Bytes> {
        match self.encoding {
            None => Ok(Bytes::copy_from_slice(self.data.as_bytes())),
            Some(DataEncoding::Base64) => Ok(Bytes::from(STANDARD.decode(&self.data)?)),
        }
    }

    /// Replay as a fake response. Text bodies become string bodies, binary ones streams.
    pub fn into_mock_response(self) -> Result<MockResponse> {
        let body = match self.encoding {
            None => Body::String(StringBodyRepository::new(self.data)),
            Some(DataEncoding::Base64) => {
                let bytes = STANDARD.decode(&self.data)?;
                Body::from_payload(StreamHandle::memory(bytes))?
            }
        };
        Ok(MockResponse::new(body, self.status_code, self.headers))
    }
}

/// A named fixture file.
///
/// # Examples
///
/// ```
/// use tavern_http::{BodyRepository, FakeResponse, Fixture, MockConfig, MockResponse, RecordedResponse};
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = MockConfig { fixture_path: dir.path().into(), ..Default::default() };
/// let fixture = Fixture::with_config("users/show", config).unwrap();
///
/// assert!(fixture.mock_response().unwrap().is_none());
///
/// let live = MockResponse::make("{\"id\":1}", 200, [("Content-Type", "application/json")]).unwrap();
/// fixture.store(&RecordedResponse::from_fake_response(&live).unwrap()).unwrap();
///
/// let replay = fixture.mock_response().unwrap().unwrap();
/// assert_eq!(replay.status(), 200);
/// assert_eq!(replay.body().contents().unwrap(), "{\"id\":1}");
/// ```
#[derive(Debug, Clone)]
pub struct Fixture {
    name: String,
    storage: Storage,
    config: MockConfig,
}

impl Fixture {
    /// Open the fixture `name` with the process-wide [`MockConfig`]
    pub fn new(name: &str) -> Result<Self> {
        Self::with_config(name, MockConfig::global())
    }

    /// Open the fixture `name` with an explicit config.
    ///
    /// Fails with [`TavernError::DirectoryNotFound`] when the fixture directory is
    /// missing and the config does not ask for it to be created, and with
    /// [`TavernError::InvalidArgument`] for empty names or names escaping the directory.
    pub fn with_config(name: &str, config: MockConfig) -> Result<Self> {
        validate_name(name)?;
        let storage = Storage::new(
            &config.fixture_path,
            config.create_missing_fixture_directory,
        )?;
        Ok(Fixture {
            name: name.to_string(),
            storage,
            config,
        })
    }

    /// Fixture name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name relative to the fixture directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Full path of the fixture file
    pub fn path(&self) -> PathBuf {
        self.storage.path_for(self.file_name())
    }

    /// Whether the fixture has been recorded
    pub fn exists(&self) -> bool {
        self.storage.exists(self.file_name())
    }

    /// Load the recorded response.
    ///
    /// Returns `Ok(None)` when nothing is recorded yet, unless the config sets
    /// `throw_on_missing_fixtures`, in which case it fails with
    /// [`TavernError::FixtureMissing`].
    pub fn mock_response(&self) -> Result<Option<MockResponse>> {
        if !self.exists() {
            if self.config.throw_on_missing_fixtures {
                return Err(TavernError::FixtureMissing {
                    name: self.name.clone(),
                });
            }
            if self.config.enable_logging {
                tracing::debug!("Fixture {} has not been recorded", self.name);
            }
            return Ok(None);
        }

        let recorded = RecordedResponse::from_json(&self.storage.get(self.file_name())?)?;
        if self.config.enable_logging {
            tracing::debug!(
                "Loaded fixture {} (status {})",
                self.name,
                recorded.status_code()
            );
        }
        recorded.into_mock_response().map(Some)
    }

    /// Persist a recording, replacing any previous one
    pub fn store(&self, recorded: &RecordedResponse) -> Result<()> {
        self.storage.put(self.file_name(), recorded.to_json()?)?;
        if self.config.enable_logging {
            tracing::debug!("Stored fixture {} at {}", self.name, self.path().display());
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TavernError::invalid_argument("Fixture name must not be empty"));
    }
    let escapes = Path::new(name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(TavernError::invalid_argument(format!(
            "Fixture name \"{}\" must be a relative path inside the fixture directory",
            name
        )));
    }
    Ok(())
}
