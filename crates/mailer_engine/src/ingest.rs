use futures_util::future::try_join_all;
use mailer_core::{IngestFailure, ParsedFile, SourceFile};
use mailer_logging::{mailer_info, mailer_warn};

use crate::decode::{decode_source, DecodeError, DecodeSettings};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("batch rejected: {0}")]
    Decode(#[from] DecodeError),
}

impl From<IngestError> for IngestFailure {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Decode(decode) => IngestFailure {
                file_name: decode.file_name().to_string(),
                reason: decode.to_string(),
            },
        }
    }
}

#[async_trait::async_trait]
pub trait FileDecoder: Send + Sync {
    async fn decode(&self, source: &SourceFile) -> Result<ParsedFile, DecodeError>;
}

/// Decodes filesystem paths and base64 data URLs.
#[derive(Debug, Clone, Default)]
pub struct ContentDecoder {
    settings: DecodeSettings,
}

impl ContentDecoder {
    pub fn new(settings: DecodeSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl FileDecoder for ContentDecoder {
    async fn decode(&self, source: &SourceFile) -> Result<ParsedFile, DecodeError> {
        decode_source(source, &self.settings).await
    }
}

/// Decode every file of a batch concurrently.
///
/// All decodes are started before any is awaited. The result keeps the input order,
/// and the first failure rejects the whole batch.
pub async fn ingest_batch(
    decoder: &dyn FileDecoder,
    files: &[SourceFile],
) -> Result<Vec<ParsedFile>, IngestError> {
    let pending = files.iter().map(|file| decoder.decode(file));
    match try_join_all(pending).await {
        Ok(parsed) => {
            let entries: usize = parsed.iter().map(ParsedFile::entry_count).sum();
            mailer_info!("Ingested {} file(s), {} entries", parsed.len(), entries);
            Ok(parsed)
        }
        Err(err) => {
            mailer_warn!("Ingestion aborted: {}", err);
            Err(err.into())
        }
    }
}
