// Media uploader: download an image from a URL, check it really is an image
// and hand the bytes to the upload endpoint.

use tracing::{debug, info};

use crate::api::XApi;
use crate::error::{XpostError, XpostResult};

/// Opaque identifier returned by the media endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaId(pub String);

impl MediaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fetch `image_url` and upload it. Any failure is final: callers abort the
/// post rather than falling back to text only.
pub fn upload_image<A: XApi + ?Sized>(api: &A, image_url: &str) -> XpostResult<MediaId> {
    let image = api.fetch_image(image_url)?;
    if !image.content_type.starts_with("image/") {
        return Err(XpostError::Validation(format!(
            "URL {image_url} is not an image (content-type: {})",
            if image.content_type.is_empty() { "none" } else { image.content_type.as_str() }
        )));
    }
    debug!(content_type = %image.content_type, len = image.bytes.len(), "Uploading image");

    let response = api.upload_media(image.bytes)?;
    let media_id = response
        .media_id_string
        .filter(|id| !id.is_empty())
        .ok_or_else(|| XpostError::Validation("No media id in the upload response".into()))?;
    info!(media_id = %media_id, "Image uploaded");
    Ok(MediaId(media_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    #[test]
    fn uploads_image_and_returns_id() {
        let api = FakeApi::new().with_image("image/jpeg", b"jpeg").with_media_id("77");
        let id = upload_image(&api, "https://img.example/a.jpg").unwrap();
        assert_eq!(id, MediaId("77".into()));
        assert_eq!(api.calls(), vec!["fetch https://img.example/a.jpg", "upload 4 bytes"]);
    }

    #[test]
    fn rejects_non_image_content_without_uploading() {
        let api = FakeApi::new().with_image("text/html; charset=utf-8", b"<html>");
        let err = upload_image(&api, "https://example.com/").unwrap_err();
        match err {
            XpostError::Validation(msg) => assert!(msg.contains("text/html"), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.calls(), vec!["fetch https://example.com/"]);
    }

    #[test]
    fn missing_media_id_is_validation_error() {
        let api = FakeApi::new().with_image("image/png", b"png");
        let err = upload_image(&api, "https://img.example/b.png").unwrap_err();
        assert!(matches!(err, XpostError::Validation(_)));
    }

    #[test]
    fn upstream_failure_propagates() {
        let api = FakeApi::new()
            .with_image("image/png", b"png")
            .fail_upload(413, "too large");
        let err = upload_image(&api, "https://img.example/c.png").unwrap_err();
        assert_eq!(err.upstream_body(), Some("too large"));
    }
}
