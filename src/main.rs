// Entrypoint for the CLI application.
// - Parses arguments, sets up logging and loads credentials before any
//   command runs; missing credentials end the process right there.
// - Each command reports through the terminal UI and maps failures to an
//   exit status.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use xpost::api::XClient;
use xpost::config::Config;
use xpost::deleter::{delete, DeleteOutcome};
use xpost::poster::{exit_status, post, PostRequest};
use xpost::ui::{report_failure, warn_about_emoji_support, Terminal, Tone, Ui};

const CREDENTIALS_HELP: &str = "\
Setup:
  Export your X API credentials, e.g. in ~/.zshrc:
    export X_CONSUMER_KEY='your_key'
    export X_CONSUMER_SECRET='your_secret'
    export X_ACCESS_TOKEN='your_token'
    export X_ACCESS_TOKEN_SECRET='your_token_secret'

Examples:
  xpost post 'Hello from the terminal!' --image-url https://example.com/cat.png
  xpost post 'A reply' --reply-to 1234567890
  xpost delete 1234567890 --no-confirm";

#[derive(Parser, Debug)]
#[command(name = "xpost")]
#[command(about = "Post, thread and delete posts on X from the terminal")]
#[command(after_help = CREDENTIALS_HELP)]
struct Cli {
    /// Show raw API responses and request details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Post a message; long messages become a thread
    Post {
        /// Text to post (emoji supported)
        message: String,

        /// Image to download and attach to the first post
        #[arg(short, long)]
        image_url: Option<String>,

        /// Id of the post to reply to
        #[arg(long)]
        reply_to: Option<String>,

        /// Show what would be posted without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a post
    Delete {
        /// Id of the post to delete
        post_id: String,

        /// Delete without asking for confirmation
        #[arg(long)]
        no_confirm: bool,
    },

    /// Print the version
    Version,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    xpost::logging::init(cli.verbose)?;
    let mut ui = Terminal::new();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            ui.say(Tone::Error, &e.to_string());
            return Ok(e.exit_code());
        }
    };
    warn_about_emoji_support(&mut ui);

    let api = XClient::new(&config).context("Failed to build HTTP client")?;

    let status = match cli.command {
        Command::Post {
            message,
            image_url,
            reply_to,
            dry_run,
        } => {
            let request = PostRequest {
                message,
                image_url,
                reply_to,
                dry_run,
            };
            let result = post(&api, &mut ui, &config, &request);
            ExitCode::from(exit_status(&mut ui, &result, cli.verbose))
        }
        Command::Delete {
            post_id,
            no_confirm,
        } => match delete(&api, &mut ui, &post_id, no_confirm) {
            Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::Aborted) => ExitCode::SUCCESS,
            Err(e) => ExitCode::from(report_failure(&mut ui, &e, cli.verbose)),
        },
        Command::Version => {
            ui.say(
                Tone::Preview,
                &format!("xpost version {}", env!("CARGO_PKG_VERSION")),
            );
            ExitCode::SUCCESS
        }
    };
    Ok(status)
}
