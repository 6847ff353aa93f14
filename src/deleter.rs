// Deleting a single post, optionally behind a yes/no confirmation.

use tracing::info;

use crate::api::XApi;
use crate::error::{XpostError, XpostResult};
use crate::ui::{Tone, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; no request was sent.
    Aborted,
}

pub fn delete<A: XApi + ?Sized>(
    api: &A,
    ui: &mut dyn Ui,
    post_id: &str,
    skip_confirmation: bool,
) -> XpostResult<DeleteOutcome> {
    let post_id = post_id.trim();
    if post_id.is_empty() {
        return Err(XpostError::Validation("No post id given.".into()));
    }

    if !skip_confirmation && !ui.confirm(&format!("Delete post {post_id}?"))? {
        ui.say(Tone::Warning, "Delete aborted.");
        return Ok(DeleteOutcome::Aborted);
    }

    ui.start_spinner("Deleting...");
    let result = api.delete_post(post_id);
    ui.stop_spinner();
    result?;

    info!(post_id, "Post deleted");
    ui.say(Tone::Success, &format!("Post {post_id} deleted."));
    Ok(DeleteOutcome::Deleted)
}
