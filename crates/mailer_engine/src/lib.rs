//! Mailer engine: file decoding, batch ingestion and submission IO.
mod decode;
mod engine;
mod ingest;
mod submit;
mod types;

pub use decode::{
    decode_data_url, decode_source, decode_text, split_entries, DecodeError, DecodeSettings,
};
pub use engine::{EngineConfig, EngineHandle};
pub use ingest::{ingest_batch, ContentDecoder, FileDecoder, IngestError};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_ENDPOINT};
pub use types::EngineEvent;
