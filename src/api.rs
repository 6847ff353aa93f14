// API client module: a small blocking HTTP client for the X endpoints this
// tool needs (media upload, create post, delete post) plus the plain image
// download that feeds the upload. Every call returns an explicit
// `XpostResult`; nothing here prints to the terminal.

use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{XpostError, XpostResult};
use crate::oauth::OAuthSigner;

/// Payload for `POST /2/tweets`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<PostReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<PostMedia>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostReply {
    pub in_reply_to_tweet_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostMedia {
    pub media_ids: Vec<String>,
}

/// `{"data": {"id": ...}}` from a successful create.
#[derive(Deserialize, Debug)]
struct CreatePostResponse {
    data: Option<CreatedPost>,
}

#[derive(Deserialize, Debug)]
struct CreatedPost {
    id: String,
}

/// The bits of the v1.1 upload response we read.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUploadResponse {
    #[serde(default)]
    pub media_id_string: Option<String>,
}

/// A downloaded file and the content type the server declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The remote operations the poster and deleter depend on.
pub trait XApi {
    /// Download `url`; non-success statuses are network errors.
    fn fetch_image(&self, url: &str) -> XpostResult<FetchedImage>;

    /// Upload raw bytes to the media endpoint.
    fn upload_media(&self, bytes: Vec<u8>) -> XpostResult<MediaUploadResponse>;

    /// Create one post and return its id.
    fn create_post(&self, request: &CreatePostRequest) -> XpostResult<String>;

    /// Delete a post by id.
    fn delete_post(&self, post_id: &str) -> XpostResult<()>;
}

/// Blocking client holding the reqwest client, the endpoint bases and the
/// request signer built from the configured credentials.
#[derive(Clone)]
pub struct XClient {
    client: Client,
    api_url: String,
    upload_url: String,
    signer: OAuthSigner,
    image_timeout: std::time::Duration,
}

impl XClient {
    pub fn new(config: &Config) -> XpostResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("xpost/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(XClient {
            client,
            api_url: config.api_url.clone(),
            upload_url: config.upload_url.clone(),
            signer: OAuthSigner::new(&config.credentials),
            image_timeout: config.image_timeout,
        })
    }

    fn posts_url(&self) -> String {
        format!("{}/2/tweets", self.api_url)
    }
}

/// Turn a non-success response into `Upstream`, keeping its body for
/// verbose diagnostics.
fn check_status(res: Response) -> XpostResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    debug!(status = status.as_u16(), %body, "X API request failed");
    Err(XpostError::Upstream {
        status: status.as_u16(),
        body,
    })
}

impl XApi for XClient {
    #[instrument(skip(self))]
    fn fetch_image(&self, url: &str) -> XpostResult<FetchedImage> {
        let res = self
            .client
            .get(url)
            .timeout(self.image_timeout)
            .send()?
            .error_for_status()?;
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let bytes = res.bytes()?.to_vec();
        debug!(%content_type, len = bytes.len(), "Fetched image");
        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    fn upload_media(&self, bytes: Vec<u8>) -> XpostResult<MediaUploadResponse> {
        let url = format!("{}/1.1/media/upload.json", self.upload_url);
        let auth = self.signer.sign("POST", &url, &[])?;
        let part = multipart::Part::bytes(bytes).file_name("image");
        let form = multipart::Form::new().part("media", part);

        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()?;
        let body = check_status(res)?.text()?;
        debug!(%body, "Upload response");
        serde_json::from_str(&body)
            .map_err(|e| XpostError::Validation(format!("Unreadable upload response: {e}")))
    }

    #[instrument(skip(self, request))]
    fn create_post(&self, request: &CreatePostRequest) -> XpostResult<String> {
        let url = self.posts_url();
        let auth = self.signer.sign("POST", &url, &[])?;
        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(request)
            .send()?;
        let body = check_status(res)?.text()?;
        debug!(%body, "Create post response");
        let parsed: CreatePostResponse = serde_json::from_str(&body)
            .map_err(|e| XpostError::Validation(format!("Unreadable post response: {e}")))?;
        parsed
            .data
            .map(|d| d.id)
            .ok_or_else(|| XpostError::Validation("No post id in the response".into()))
    }

    #[instrument(skip(self))]
    fn delete_post(&self, post_id: &str) -> XpostResult<()> {
        let url = format!("{}/{}", self.posts_url(), post_id);
        let auth = self.signer.sign("DELETE", &url, &[])?;
        let res = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, auth)
            .send()?;
        let body = check_status(res)?.text()?;
        debug!(%body, "Delete response");
        Ok(())
    }
}
