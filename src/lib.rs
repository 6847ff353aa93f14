// Library root
// -----------
// The binary (`main.rs`) parses arguments and wires these modules together.
//
// Module responsibilities:
// - `config`: credentials and endpoint settings read from the environment.
// - `api`: blocking HTTP client for the X endpoints, behind the `XApi` trait.
// - `oauth`: OAuth 1.0a request signing used by `api`.
// - `split`: splits long messages into post-sized fragments.
// - `media`: downloads, checks and uploads an image attachment.
// - `poster`: posts a message or a reply-chained thread.
// - `deleter`: deletes a post after optional confirmation.
// - `ui`: terminal output and prompts, behind the `Ui` trait.
// - `logging`: tracing subscriber setup.
pub mod api;
pub mod config;
pub mod deleter;
pub mod error;
pub mod logging;
pub mod media;
pub mod oauth;
pub mod poster;
pub mod split;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{XpostError, XpostResult};
