//! Scripted collaborators for engine tests. Compiled only for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::extract::{ArchiveExtractor, ExtractError};

use super::transport::{FetchError, Transport};

enum Script {
    Ok(Vec<u8>),
    NotFound,
    ServerError,
    FailThenOk { remaining: u32, body: Vec<u8> },
}

impl Script {
    fn respond(&mut self, url: &str) -> Result<Bytes, FetchError> {
        match self {
            Script::Ok(body) => Ok(Bytes::from(body.clone())),
            Script::NotFound => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
            Script::ServerError => Err(FetchError::HttpStatus {
                status: 503,
                url: url.to_string(),
            }),
            Script::FailThenOk { remaining, body } => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Err(FetchError::HttpStatus {
                        status: 503,
                        url: url.to_string(),
                    })
                } else {
                    Ok(Bytes::from(body.clone()))
                }
            }
        }
    }
}

/// Transport whose responses are scripted per URL, with a default for
/// everything else. Records every fetch in call order.
pub struct ScriptedTransport {
    default: Mutex<Script>,
    overrides: Mutex<HashMap<String, Script>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(default: Script) -> Self {
        Self {
            default: Mutex::new(default),
            overrides: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn always_ok(body: &[u8]) -> Self {
        Self::new(Script::Ok(body.to_vec()))
    }

    pub fn not_found() -> Self {
        Self::new(Script::NotFound)
    }

    pub fn always_server_error() -> Self {
        Self::new(Script::ServerError)
    }

    pub fn fail_then_ok(failures: u32, body: &[u8]) -> Self {
        Self::new(Script::FailThenOk {
            remaining: failures,
            body: body.to_vec(),
        })
    }

    pub fn with_ok(self, url: &str, body: &[u8]) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(url.to_string(), Script::Ok(body.to_vec()));
        self
    }

    pub fn with_not_found(self, url: &str) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(url.to_string(), Script::NotFound);
        self
    }

    pub fn with_server_error(self, url: &str) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(url.to_string(), Script::ServerError);
        self
    }

    /// Total fetches across every URL.
    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self.log.lock().unwrap().push(url.to_string());
        let mut overrides = self.overrides.lock().unwrap();
        match overrides.get_mut(url) {
            Some(script) => script.respond(url),
            None => self.default.lock().unwrap().respond(url),
        }
    }
}

/// Extractor that records each call and snapshots the archive's on-disk
/// contents at call time, so tests can assert the write-before-extract
/// ordering.
#[derive(Default)]
pub struct RecordingExtractor {
    log: Mutex<Vec<(PathBuf, PathBuf, Vec<u8>)>>,
}

impl RecordingExtractor {
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(a, d, _)| (a.clone(), d.clone()))
            .collect()
    }

    pub fn contents_at_call(&self, index: usize) -> Vec<u8> {
        self.log.lock().unwrap()[index].2.clone()
    }
}

#[async_trait]
impl ArchiveExtractor for RecordingExtractor {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        let contents = std::fs::read(archive)?;
        self.log.lock().unwrap().push((
            archive.to_path_buf(),
            destination.to_path_buf(),
            contents,
        ));
        Ok(())
    }
}

/// Extractor that always reports a corrupt archive.
pub struct FailingExtractor;

#[async_trait]
impl ArchiveExtractor for FailingExtractor {
    async fn extract(&self, _archive: &Path, _destination: &Path) -> Result<(), ExtractError> {
        Err(ExtractError::Archive(zip::result::ZipError::InvalidArchive(
            "not a zip",
        )))
    }
}
