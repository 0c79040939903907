use std::fs;

use base64::{engine::general_purpose, Engine as _};
use mailer_core::SourceFile;
use mailer_engine::{decode_source, DecodeError, DecodeSettings};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn data_url(text: &[u8]) -> String {
    format!(
        "data:text/plain;base64,{}",
        general_purpose::STANDARD.encode(text)
    )
}

#[tokio::test]
async fn data_url_content_is_decoded_and_split() {
    let source = SourceFile::from_data_url("first.txt", data_url(b"a@x.com\nb@x.com\n"));

    let parsed = decode_source(&source, &DecodeSettings::default())
        .await
        .expect("decode ok");

    assert_eq!(parsed.name(), "first.txt");
    assert_eq!(parsed.entries(), ["a@x.com", "b@x.com"]);
    assert_eq!(parsed.entry_count(), 2);
}

#[tokio::test]
async fn file_without_trailing_newline_yields_single_entry() {
    let source = SourceFile::from_data_url("second.txt", data_url(b"c@x.com"));

    let parsed = decode_source(&source, &DecodeSettings::default())
        .await
        .unwrap();

    assert_eq!(parsed.entries(), ["c@x.com"]);
}

#[tokio::test]
async fn interior_blank_line_becomes_empty_entry() {
    let source = SourceFile::from_data_url("gaps.txt", data_url(b"\n  a@x.com\n\nb@x.com\n\n"));

    let parsed = decode_source(&source, &DecodeSettings::default())
        .await
        .unwrap();

    assert_eq!(parsed.entries(), ["a@x.com", "", "b@x.com"]);
    assert_eq!(parsed.entry_count(), 3);
}

#[tokio::test]
async fn path_content_is_read_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("list.txt");
    fs::write(&path, "a@x.com\r\nb@x.com\r\n").unwrap();

    let parsed = decode_source(&SourceFile::from_path(&path), &DecodeSettings::default())
        .await
        .unwrap();

    assert_eq!(parsed.name(), "list.txt");
    // Only the whole text is trimmed; inner carriage returns stay on their lines.
    assert_eq!(parsed.entries(), ["a@x.com\r", "b@x.com"]);
}

#[tokio::test]
async fn missing_file_reports_io_error_with_name() {
    let temp = TempDir::new().unwrap();
    let source = SourceFile::from_path(temp.path().join("gone.txt"));

    let err = decode_source(&source, &DecodeSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DecodeError::Io { .. }));
    assert_eq!(err.file_name(), "gone.txt");
}

#[tokio::test]
async fn malformed_base64_is_rejected() {
    let source = SourceFile::from_data_url("bad.txt", "data:text/plain;base64,@@not base64@@");

    let err = decode_source(&source, &DecodeSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DecodeError::Base64 { .. }));
}

#[tokio::test]
async fn invalid_bytes_after_bom_are_an_encoding_error() {
    let source = SourceFile::from_data_url("broken.txt", data_url(b"\xEF\xBB\xBFa@x.com\xFF"));

    let err = decode_source(&source, &DecodeSettings::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DecodeError::Encoding {
            file: "broken.txt".to_string(),
            encoding: "UTF-8".to_string(),
        }
    );
}

#[tokio::test]
async fn oversized_file_is_rejected_before_reading() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("big.txt");
    fs::write(&path, "0123456789a").unwrap();
    let settings = DecodeSettings { max_bytes: 10 };

    let err = decode_source(&SourceFile::from_path(&path), &settings)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DecodeError::TooLarge {
            file: "big.txt".to_string(),
            max_bytes: 10,
            actual: 11,
        }
    );
}

#[tokio::test]
async fn oversized_data_url_is_rejected() {
    let source = SourceFile::from_data_url("big.txt", data_url(&[b'a'; 40]));
    let settings = DecodeSettings { max_bytes: 10 };

    let err = decode_source(&source, &settings).await.unwrap_err();

    assert_eq!(
        err,
        DecodeError::TooLarge {
            file: "big.txt".to_string(),
            max_bytes: 10,
            actual: 40,
        }
    );
}

#[tokio::test]
async fn oversized_data_url_is_rejected_before_decoding() {
    // Not valid base64; the size limit trips first.
    let url = format!("data:text/plain;base64,{}", "!!!!".repeat(20));
    let source = SourceFile::from_data_url("junk.txt", url);
    let settings = DecodeSettings { max_bytes: 10 };

    let err = decode_source(&source, &settings).await.unwrap_err();

    assert!(matches!(err, DecodeError::TooLarge { actual: 60, .. }), "{err:?}");
}

#[tokio::test]
async fn data_url_at_size_limit_is_accepted() {
    let source = SourceFile::from_data_url("edge.txt", data_url(b"a@x.com\nb1"));
    let settings = DecodeSettings { max_bytes: 10 };

    let parsed = decode_source(&source, &settings).await.unwrap();

    assert_eq!(parsed.entries(), ["a@x.com", "b1"]);
}
