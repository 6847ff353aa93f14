//! Posting a message as a single post or a reply-chained thread.
//!
//! The flow is strictly sequential: blank check, preview, split, optional
//! dry run, optional image upload, then one create call per fragment. Each
//! fragment after the first replies to the id returned for the one before
//! it, so nothing can be batched. A failed fragment stops the thread; the
//! posts already created stay up.

use tracing::{info, warn};

use crate::api::{CreatePostRequest, PostMedia, PostReply, XApi};
use crate::config::Config;
use crate::error::{XpostError, XpostResult};
use crate::media::{upload_image, MediaId};
use crate::split::split_message;
use crate::ui::{report_failure, show_upstream_body, Tone, Ui};

/// What the user asked to post.
#[derive(Debug, Clone, Default)]
pub struct PostRequest {
    pub message: String,
    pub image_url: Option<String>,
    /// Post to reply to with the first fragment.
    pub reply_to: Option<String>,
    pub dry_run: bool,
}

/// One created post and the id it replied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: String,
    pub in_reply_to: Option<String>,
}

/// Posts created by one invocation, in order. Every record after the first
/// replies to its predecessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    records: Vec<PostRecord>,
}

impl Thread {
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn last_id(&self) -> Option<&str> {
        self.records.last().map(|r| r.id.as_str())
    }

    fn push(&mut self, record: PostRecord) {
        self.records.push(record);
    }
}

/// A fragment as it would be sent in a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPost {
    pub text: String,
    pub with_image: bool,
}

#[derive(Debug)]
pub enum PostOutcome {
    /// Nothing was sent.
    DryRun(Vec<PlannedPost>),
    /// Every fragment was posted.
    Posted(Thread),
    /// Fragment `fragment` (1-based) failed; `thread` holds what was posted
    /// before it.
    Interrupted {
        thread: Thread,
        fragment: usize,
        error: XpostError,
    },
}

/// Post `request.message`, splitting and chaining as needed.
///
/// Returns `Err` only when nothing was posted (blank message, image upload
/// failure). Failures after the first create call come back as
/// [`PostOutcome::Interrupted`] so the caller still sees the partial thread.
pub fn post<A: XApi + ?Sized>(
    api: &A,
    ui: &mut dyn Ui,
    config: &Config,
    request: &PostRequest,
) -> XpostResult<PostOutcome> {
    if request.message.trim().is_empty() {
        return Err(XpostError::Validation(
            "Nothing to post: the message is empty.".into(),
        ));
    }

    ui.preview(&request.message, request.image_url.as_deref());
    let fragments = split_message(&request.message, config.char_limit);

    if request.dry_run {
        return Ok(PostOutcome::DryRun(dry_run(ui, &fragments, request)));
    }

    let media = match &request.image_url {
        Some(url) => {
            ui.start_spinner("Uploading image...");
            let uploaded = upload_image(api, url);
            ui.stop_spinner();
            match uploaded {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(error = %e, "Image upload failed, nothing posted");
                    ui.say(Tone::Error, "Image upload failed; nothing was posted.");
                    return Err(e);
                }
            }
        }
        None => None,
    };

    if fragments.len() > 1 {
        ui.say(
            Tone::Warning,
            &format!(
                "Message exceeds {} characters, splitting into {} posts.",
                config.char_limit,
                fragments.len()
            ),
        );
    }

    ui.start_spinner("Posting...");
    let outcome = submit_thread(api, &fragments, media.as_ref(), request.reply_to.as_deref());
    ui.stop_spinner();

    match &outcome {
        PostOutcome::Posted(thread) => {
            ui.say(
                Tone::Success,
                &format!("Posted {} post(s).", thread.len()),
            );
            for (i, id) in thread.ids().iter().enumerate() {
                ui.say(Tone::Preview, &format!("Post {} id: {}", i + 1, id));
            }
        }
        PostOutcome::Interrupted {
            thread,
            fragment,
            error,
        } => {
            ui.say(
                Tone::Error,
                &format!("Posting failed on post {fragment} of {}: {error}", fragments.len()),
            );
            if !thread.is_empty() {
                ui.say(
                    Tone::Warning,
                    &format!(
                        "{} post(s) were already published and remain up: {}",
                        thread.len(),
                        thread.ids().join(", ")
                    ),
                );
            }
        }
        PostOutcome::DryRun(_) => {}
    }
    Ok(outcome)
}

/// Process exit status for a finished post. In verbose mode a rejected
/// request also shows the platform's response body.
pub fn exit_status(ui: &mut dyn Ui, result: &XpostResult<PostOutcome>, verbose: bool) -> u8 {
    match result {
        Ok(PostOutcome::DryRun(_)) | Ok(PostOutcome::Posted(_)) => 0,
        // The failed fragment was already reported by `post`.
        Ok(PostOutcome::Interrupted { error, .. }) => {
            show_upstream_body(ui, error, verbose);
            error.exit_status()
        }
        Err(e) => report_failure(ui, e, verbose),
    }
}

fn dry_run(ui: &mut dyn Ui, fragments: &[String], request: &PostRequest) -> Vec<PlannedPost> {
    ui.say(Tone::Warning, "Dry run: nothing will be sent.");
    let planned: Vec<PlannedPost> = fragments
        .iter()
        .enumerate()
        .map(|(i, text)| PlannedPost {
            text: text.clone(),
            with_image: i == 0 && request.image_url.is_some(),
        })
        .collect();
    for (i, post) in planned.iter().enumerate() {
        ui.say(Tone::Preview, &format!("Post {}: {}", i + 1, post.text));
        if let (true, Some(url)) = (post.with_image, &request.image_url) {
            ui.say(Tone::Preview, &format!("Image: {url}"));
        }
    }
    planned
}

/// Payload for fragment `index` (0-based).
fn build_request(
    index: usize,
    text: &str,
    media: Option<&MediaId>,
    reply_link: Option<&str>,
) -> CreatePostRequest {
    CreatePostRequest {
        text: text.to_string(),
        reply: reply_link.map(|id| PostReply {
            in_reply_to_tweet_id: id.to_string(),
        }),
        media: media.filter(|_| index == 0).map(|m| PostMedia {
            media_ids: vec![m.as_str().to_string()],
        }),
    }
}

fn submit_thread<A: XApi + ?Sized>(
    api: &A,
    fragments: &[String],
    media: Option<&MediaId>,
    reply_to: Option<&str>,
) -> PostOutcome {
    let mut thread = Thread::default();
    for (i, text) in fragments.iter().enumerate() {
        let reply_link = if i == 0 {
            reply_to.map(str::to_string)
        } else {
            thread.last_id().map(str::to_string)
        };
        let payload = build_request(i, text, media, reply_link.as_deref());
        match api.create_post(&payload) {
            Ok(id) => {
                info!(fragment = i + 1, id = %id, "Post created");
                thread.push(PostRecord {
                    id,
                    in_reply_to: reply_link,
                });
            }
            Err(error) => {
                warn!(fragment = i + 1, error = %error, "Post failed, stopping thread");
                return PostOutcome::Interrupted {
                    thread,
                    fragment: i + 1,
                    error,
                };
            }
        }
    }
    PostOutcome::Posted(thread)
}
