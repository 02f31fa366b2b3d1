//! Data model for the document retrieval workflow.
//!
//! Everything here lives for a single user-triggered action. References
//! come from the API, payloads come from one fetch, and nothing is cached
//! or persisted across actions.

use serde::{Deserialize, Serialize};

/// Broad media classification of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Pdf,
    File,
}

/// Client-side record identifying one medical file, independent of where
/// it is actually stored.
///
/// `stored_path` may be a full URL, a cloud-relative path (`/uploads/...`),
/// or an API-relative path; classification is purely syntactic and happens
/// in [`crate::resolver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReference {
    pub id: String,
    pub stored_path: String,
    pub display_name: String,
    pub media_type: MediaType,
}

/// Raw document content plus its declared content type, held only for the
/// duration of one view operation.
#[derive(Debug, Clone)]
pub struct RetrievedPayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl RetrievedPayload {
    pub fn new(bytes: Vec<u8>, content_type: &str) -> Self {
        Self {
            bytes,
            content_type: content_type.to_string(),
        }
    }

    /// File extension for a transient handle.
    ///
    /// The declared content type wins; when it is missing or generic the
    /// magic bytes decide.
    pub fn extension(&self) -> &'static str {
        let declared = self.content_type.split(';').next().unwrap_or("").trim();
        match declared {
            "application/pdf" => "pdf",
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            _ => detect_extension(&self.bytes),
        }
    }
}

/// Detect file extension from magic bytes.
fn detect_extension(bytes: &[u8]) -> &'static str {
    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
        "jpg"
    } else if bytes.len() >= 8 && bytes[0..8] == PNG_MAGIC {
        "png"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "webp"
    } else if bytes.len() >= 5 && &bytes[0..5] == b"%PDF-" {
        "pdf"
    } else {
        "bin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MediaType::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&MediaType::Pdf).unwrap(), "\"pdf\"");
        assert_eq!(serde_json::to_string(&MediaType::File).unwrap(), "\"file\"");
    }

    #[test]
    fn document_reference_round_trips() {
        let json = r#"{
            "id": "doc-42",
            "stored_path": "/uploads/x/y.png",
            "display_name": "Blood panel",
            "media_type": "image"
        }"#;
        let doc: DocumentReference = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "doc-42");
        assert_eq!(doc.media_type, MediaType::Image);
    }

    #[test]
    fn extension_prefers_declared_content_type() {
        let payload = RetrievedPayload::new(b"not actually a pdf".to_vec(), "application/pdf");
        assert_eq!(payload.extension(), "pdf");
    }

    #[test]
    fn extension_ignores_content_type_parameters() {
        let payload = RetrievedPayload::new(vec![], "image/jpeg; charset=binary");
        assert_eq!(payload.extension(), "jpg");
    }

    #[test]
    fn extension_falls_back_to_magic_bytes() {
        let payload =
            RetrievedPayload::new(b"%PDF-1.4 ...".to_vec(), "application/octet-stream");
        assert_eq!(payload.extension(), "pdf");
    }

    #[test]
    fn detect_extension_jpeg() {
        assert_eq!(detect_extension(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpg");
    }

    #[test]
    fn detect_extension_png() {
        assert_eq!(
            detect_extension(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            "png"
        );
    }

    #[test]
    fn detect_extension_webp() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBP");
        assert_eq!(detect_extension(&bytes), "webp");
    }

    #[test]
    fn detect_extension_unknown() {
        assert_eq!(detect_extension(&[0x00, 0x01, 0x02]), "bin");
    }
}
