//! Remote document operations — list, upload, share, delete.
//!
//! The viewing workflow lives in [`crate::retrieval`]; this client covers
//! the remaining document flows against the same API. Every call is
//! bearer-authenticated, and the missing-token check happens before any
//! request goes out.

use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::models::DocumentReference;
use crate::retrieval::fetch::{build_http_client, map_send_error, FetchError};

/// Maximum upload size (4 MB), enforced before the request is built.
const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

#[derive(Serialize)]
struct UploadRequest<'a> {
    metadata: UploadMetadata,
    file: UploadFile<'a>,
}

#[derive(Serialize)]
struct UploadMetadata {
    upload_id: Uuid,
    captured_at: String,
}

#[derive(Serialize)]
struct UploadFile<'a> {
    name: &'a str,
    /// Base64 data URL (e.g. `data:application/pdf;base64,JVBE...`).
    data: String,
    size_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
struct ShareRequest<'a> {
    recipient: &'a str,
}

#[derive(Deserialize)]
struct ListResponse {
    documents: Vec<DocumentReference>,
}

/// HTTP client for the document API's non-viewing operations.
pub struct DocumentsClient {
    api_base: String,
    client: reqwest::Client,
}

impl DocumentsClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_base: config.api_base().to_string(),
            client: build_http_client(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// `GET /documents` — the caller's document references.
    pub async fn list(&self, token: &str) -> Result<Vec<DocumentReference>, FetchError> {
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let url = self.endpoint("documents");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| map_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ListResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(parsed.documents)
    }

    /// `POST /documents/upload` — send one file as a base64 data URL.
    ///
    /// Oversized files are rejected here, before any bytes leave the
    /// device.
    pub async fn upload(
        &self,
        token: &str,
        display_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, FetchError> {
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(FetchError::InvalidRequest(format!(
                "'{}' exceeds the 4 MB upload limit ({} bytes)",
                display_name,
                bytes.len()
            )));
        }

        let body = UploadRequest {
            metadata: UploadMetadata {
                upload_id: Uuid::new_v4(),
                captured_at: chrono::Utc::now().to_rfc3339(),
            },
            file: UploadFile {
                name: display_name,
                data: encode_data_url(content_type, bytes),
                size_bytes: bytes.len(),
            },
        };

        let url = self.endpoint("documents/upload");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Client(e.to_string()))?;
        tracing::info!(
            document_id = %parsed.document_id,
            size = bytes.len(),
            "document uploaded"
        );
        Ok(parsed)
    }

    /// `POST /documents/{id}/share` — grant a recipient access.
    pub async fn share(
        &self,
        token: &str,
        document_id: &str,
        recipient: &str,
    ) -> Result<(), FetchError> {
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let url = self.endpoint(&format!("documents/{document_id}/share"));
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&ShareRequest { recipient })
            .send()
            .await
            .map_err(|e| map_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!(document_id, recipient, "document shared");
        Ok(())
    }

    /// `DELETE /documents/{id}`.
    pub async fn delete(&self, token: &str, document_id: &str) -> Result<(), FetchError> {
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let url = self.endpoint(&format!("documents/{document_id}"));
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| map_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!(document_id, "document deleted");
        Ok(())
    }
}

/// Encode raw bytes as a base64 data URL.
fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DocumentsClient {
        DocumentsClient::new(&ApiConfig::new(
            "https://api.example.com",
            "https://res.example.com/up/v1",
        ))
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        assert_eq!(
            client().endpoint("documents/doc-42/share"),
            "https://api.example.com/documents/doc-42/share"
        );
    }

    #[test]
    fn encode_data_url_embeds_content_type() {
        let url = encode_data_url("application/pdf", b"hello");
        assert!(url.starts_with("data:application/pdf;base64,"));
        let encoded = url.split(',').nth(1).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[tokio::test]
    async fn list_requires_token() {
        let err = client().list("").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential));
    }

    #[tokio::test]
    async fn upload_requires_token() {
        let err = client()
            .upload("", "scan.pdf", "application/pdf", b"%PDF-")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential));
    }

    #[tokio::test]
    async fn upload_rejects_oversized_file_before_sending() {
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = client()
            .upload("tok", "scan.pdf", "application/pdf", &big)
            .await
            .unwrap_err();
        match err {
            FetchError::InvalidRequest(msg) => assert!(msg.contains("4 MB")),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn share_and_delete_require_token() {
        assert!(matches!(
            client().share("", "doc-42", "dr@example.com").await,
            Err(FetchError::MissingCredential)
        ));
        assert!(matches!(
            client().delete("", "doc-42").await,
            Err(FetchError::MissingCredential)
        ));
    }
}
