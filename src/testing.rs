// In-memory stand-ins for the network and the terminal, shared by the unit
// tests of the media, poster and deleter modules.

use std::cell::RefCell;

use crate::api::{CreatePostRequest, FetchedImage, MediaUploadResponse, XApi};
use crate::error::{XpostError, XpostResult};
use crate::ui::{Tone, Ui};

/// Records every call and answers from a small script.
#[derive(Default)]
pub struct FakeApi {
    image: Option<FetchedImage>,
    media_id: Option<String>,
    upload_failure: Option<(u16, String)>,
    post_failure: Option<(usize, u16, String)>,
    delete_failure: Option<(u16, String)>,
    calls: RefCell<Vec<String>>,
    posts: RefCell<Vec<CreatePostRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, content_type: &str, bytes: &[u8]) -> Self {
        self.image = Some(FetchedImage {
            content_type: content_type.to_string(),
            bytes: bytes.to_vec(),
        });
        self
    }

    pub fn with_media_id(mut self, id: &str) -> Self {
        self.media_id = Some(id.to_string());
        self
    }

    pub fn fail_upload(mut self, status: u16, body: &str) -> Self {
        self.upload_failure = Some((status, body.to_string()));
        self
    }

    /// Make the `n`th create call (1-based) fail.
    pub fn fail_post(mut self, n: usize, status: u16, body: &str) -> Self {
        self.post_failure = Some((n, status, body.to_string()));
        self
    }

    pub fn fail_delete(mut self, status: u16, body: &str) -> Self {
        self.delete_failure = Some((status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn posts(&self) -> Vec<CreatePostRequest> {
        self.posts.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn upstream(status: u16, body: &str) -> XpostError {
    XpostError::Upstream {
        status,
        body: body.to_string(),
    }
}

impl XApi for FakeApi {
    fn fetch_image(&self, url: &str) -> XpostResult<FetchedImage> {
        self.record(format!("fetch {url}"));
        self.image.clone().ok_or_else(|| upstream(404, "not found"))
    }

    fn upload_media(&self, bytes: Vec<u8>) -> XpostResult<MediaUploadResponse> {
        self.record(format!("upload {} bytes", bytes.len()));
        if let Some((status, body)) = &self.upload_failure {
            return Err(upstream(*status, body));
        }
        Ok(MediaUploadResponse {
            media_id_string: self.media_id.clone(),
        })
    }

    fn create_post(&self, request: &CreatePostRequest) -> XpostResult<String> {
        let n = self
            .calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("post "))
            .count()
            + 1;
        self.record(format!("post {n}"));
        if let Some((fail_at, status, body)) = &self.post_failure {
            if *fail_at == n {
                return Err(upstream(*status, body));
            }
        }
        self.posts.borrow_mut().push(request.clone());
        Ok(format!("{}", 1000 + n))
    }

    fn delete_post(&self, post_id: &str) -> XpostResult<()> {
        self.record(format!("delete {post_id}"));
        match &self.delete_failure {
            Some((status, body)) => Err(upstream(*status, body)),
            None => Ok(()),
        }
    }
}

/// Captures output and answers confirmations from a fixed reply.
#[derive(Default)]
pub struct ScriptedUi {
    pub answer: String,
    pub previews: Vec<(String, Option<String>)>,
    pub lines: Vec<(Tone, String)>,
    pub prompts: Vec<String>,
    pub spinners: Vec<String>,
}

impl ScriptedUi {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Self::default()
        }
    }

    pub fn lines_with(&self, tone: Tone) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(t, _)| *t == tone)
            .map(|(_, l)| l.as_str())
            .collect()
    }
}

impl Ui for ScriptedUi {
    fn preview(&mut self, message: &str, image_url: Option<&str>) {
        self.previews
            .push((message.to_string(), image_url.map(str::to_string)));
    }

    fn say(&mut self, tone: Tone, line: &str) {
        self.lines.push((tone, line.to_string()));
    }

    fn start_spinner(&mut self, message: &str) {
        self.spinners.push(message.to_string());
    }

    fn stop_spinner(&mut self) {}

    fn confirm(&mut self, prompt: &str) -> XpostResult<bool> {
        self.prompts.push(prompt.to_string());
        Ok(crate::ui::is_affirmative(&self.answer))
    }
}
