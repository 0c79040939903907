use base64::{engine::general_purpose, Engine as _};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use mailer_core::{ParsedFile, SourceContent, SourceFile};
use mailer_logging::mailer_debug;

#[derive(Debug, Clone)]
pub struct DecodeSettings {
    /// Upper bound for the raw (base64-decoded) size of one file.
    pub max_bytes: u64,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{file}: could not read file: {message}")]
    Io { file: String, message: String },
    #[error("{file}: content is not a base64 data URL")]
    DataUrl { file: String },
    #[error("{file}: invalid base64 payload: {message}")]
    Base64 { file: String, message: String },
    #[error("{file}: failed to decode bytes with {encoding}")]
    Encoding { file: String, encoding: String },
    #[error("{file}: file too large (max {max_bytes}, actual {actual})")]
    TooLarge {
        file: String,
        max_bytes: u64,
        actual: u64,
    },
}

impl DecodeError {
    pub fn file_name(&self) -> &str {
        match self {
            DecodeError::Io { file, .. }
            | DecodeError::DataUrl { file }
            | DecodeError::Base64 { file, .. }
            | DecodeError::Encoding { file, .. }
            | DecodeError::TooLarge { file, .. } => file,
        }
    }
}

/// Read, decode and split one file into its entries.
pub async fn decode_source(
    source: &SourceFile,
    settings: &DecodeSettings,
) -> Result<ParsedFile, DecodeError> {
    let bytes = read_source(source, settings).await?;
    let text = decode_text(&bytes).map_err(|encoding| DecodeError::Encoding {
        file: source.name().to_string(),
        encoding: encoding.name().to_string(),
    })?;
    let entries = split_entries(&text);
    mailer_debug!(
        "Decoded {}: {} bytes, {} entries",
        source.name(),
        bytes.len(),
        entries.len()
    );
    Ok(ParsedFile::new(source.clone(), entries))
}

async fn read_source(
    source: &SourceFile,
    settings: &DecodeSettings,
) -> Result<Vec<u8>, DecodeError> {
    let file = source.name();
    let io_error = |err: std::io::Error| DecodeError::Io {
        file: file.to_string(),
        message: err.to_string(),
    };
    let bytes = match source.content() {
        SourceContent::Path(path) => {
            let meta = tokio::fs::metadata(path).await.map_err(io_error)?;
            check_size(file, meta.len(), settings)?;
            tokio::fs::read(path).await.map_err(io_error)?
        }
        SourceContent::DataUrl(url) => {
            let payload = data_url_payload(file, url)?;
            check_size(file, decoded_len(payload), settings)?;
            decode_payload(file, payload)?
        }
    };
    check_size(file, bytes.len() as u64, settings)?;
    Ok(bytes)
}

fn check_size(file: &str, actual: u64, settings: &DecodeSettings) -> Result<(), DecodeError> {
    if actual > settings.max_bytes {
        return Err(DecodeError::TooLarge {
            file: file.to_string(),
            max_bytes: settings.max_bytes,
            actual,
        });
    }
    Ok(())
}

/// Extract the payload of a `data:<mime>;base64,<payload>` URL and decode it.
pub fn decode_data_url(file: &str, url: &str) -> Result<Vec<u8>, DecodeError> {
    decode_payload(file, data_url_payload(file, url)?)
}

fn data_url_payload<'a>(file: &str, url: &'a str) -> Result<&'a str, DecodeError> {
    url.split_once("base64,")
        .map(|(_, payload)| payload.trim())
        .ok_or_else(|| DecodeError::DataUrl {
            file: file.to_string(),
        })
}

/// Size the payload decodes to, without decoding it. Exact for well-formed base64.
fn decoded_len(payload: &str) -> u64 {
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count() as u64;
    (payload.len() as u64 * 3 / 4).saturating_sub(padding)
}

fn decode_payload(file: &str, payload: &str) -> Result<Vec<u8>, DecodeError> {
    general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| DecodeError::Base64 {
            file: file.to_string(),
            message: err.to_string(),
        })
}

/// Decode raw bytes into UTF-8 using: BOM -> strict UTF-8 -> chardetng fallback.
///
/// Returns the encoding that was tried when the bytes do not decode cleanly.
pub fn decode_text(bytes: &[u8]) -> Result<String, &'static Encoding> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    // 2) Plain UTF-8, the common case
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    // 3) chardetng detection for legacy single-byte exports
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<String, &'static Encoding> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(enc);
    }
    Ok(text.into_owned())
}

/// Trim the whole text, then split on `\n`.
///
/// Interior blank lines yield empty entries; a trailing newline does not.
pub fn split_entries(text: &str) -> Vec<String> {
    text.trim().split('\n').map(ToOwned::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_interior_blank_lines() {
        assert_eq!(
            split_entries("a@x.com\n\nb@x.com\n"),
            vec!["a@x.com", "", "b@x.com"]
        );
    }

    #[test]
    fn split_of_blank_text_is_single_empty_entry() {
        assert_eq!(split_entries("  \n \n"), vec![""]);
    }

    #[test]
    fn split_does_not_trim_individual_lines() {
        assert_eq!(
            split_entries(" a@x.com \r\n b@x.com "),
            vec!["a@x.com \r", " b@x.com"]
        );
    }

    #[test]
    fn data_url_without_base64_marker_is_rejected() {
        let err = decode_data_url("list.txt", "data:text/plain,a@x.com").unwrap_err();
        assert_eq!(
            err,
            DecodeError::DataUrl {
                file: "list.txt".to_string()
            }
        );
        assert_eq!(err.file_name(), "list.txt");
    }

    #[test]
    fn decoded_len_accounts_for_padding() {
        for text in [&b""[..], b"a", b"ab", b"abc", b"a@x.com\nb@x.com"] {
            let encoded = general_purpose::STANDARD.encode(text);
            assert_eq!(decoded_len(&encoded), text.len() as u64, "{encoded}");
        }
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFa@x.com";
        assert_eq!(decode_text(bytes).unwrap(), "a@x.com");
    }

    #[test]
    fn latin1_bytes_fall_back_to_detection() {
        let text = decode_text(b"jos\xe9\nmaria@x.com").unwrap();
        let entries = split_entries(&text);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("jos"));
        assert_eq!(entries[0].chars().count(), 4);
        assert_eq!(entries[1], "maria@x.com");
    }
}
