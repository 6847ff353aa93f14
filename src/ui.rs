// UI layer: everything the user sees or answers goes through the `Ui` trait
// so the posting and deleting flows can run against a scripted terminal in
// tests. `Terminal` is the real implementation: colored lines via
// `crossterm`, spinners via `indicatif`, and a `dialoguer` prompt.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{XpostError, XpostResult};

/// How a status line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warning,
    Error,
    Success,
    Preview,
}

pub trait Ui {
    /// Show what is about to be posted.
    fn preview(&mut self, message: &str, image_url: Option<&str>);

    /// Print one status line.
    fn say(&mut self, tone: Tone, line: &str);

    /// Show a spinner until `stop_spinner` is called.
    fn start_spinner(&mut self, message: &str);

    fn stop_spinner(&mut self);

    /// Ask a yes/no question. Only `y` or `Y` counts as yes.
    fn confirm(&mut self, prompt: &str) -> XpostResult<bool>;
}

/// Interactive terminal implementation. Colors are only written to
/// streams attached to a terminal.
pub struct Terminal {
    spinner: Option<ProgressBar>,
    color_stdout: bool,
    color_stderr: bool,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            spinner: None,
            color_stdout: io::stdout().is_terminal(),
            color_stderr: io::stderr().is_terminal(),
        }
    }
}

/// Apply the color scheme for `tone`.
fn paint(tone: Tone, line: &str) -> String {
    match tone {
        Tone::Warning => line.magenta().to_string(),
        Tone::Error => line.red().bold().to_string(),
        Tone::Success => line.green().bold().to_string(),
        Tone::Preview => line.cyan().to_string(),
    }
}

impl Ui for Terminal {
    fn preview(&mut self, message: &str, image_url: Option<&str>) {
        let table = render_preview(message, image_url);
        if self.color_stdout {
            println!("{}", "Post preview".bold().magenta());
            println!("{}", table.cyan());
        } else {
            println!("Post preview");
            println!("{table}");
        }
    }

    fn say(&mut self, tone: Tone, line: &str) {
        let to_stderr = tone == Tone::Error;
        let colored = if to_stderr { self.color_stderr } else { self.color_stdout };
        let text = if colored { paint(tone, line) } else { line.to_string() };
        let print = || {
            if to_stderr {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
        };
        match &self.spinner {
            Some(spinner) => spinner.suspend(print),
            None => print(),
        }
    }

    fn start_spinner(&mut self, message: &str) {
        self.stop_spinner();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn confirm(&mut self, prompt: &str) -> XpostResult<bool> {
        self.stop_spinner();
        let prompt = format!("{prompt} [y/N]");
        if !io::stdin().is_terminal() {
            return read_answer(&mut io::stdin().lock(), &mut io::stderr(), &prompt);
        }
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(is_affirmative(&answer))
    }
}

/// Prompt on `out` and read one line from `input`; end of input is a no.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> XpostResult<bool> {
    write!(out, "{prompt} ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Print a failure and return the process exit status for it.
pub fn report_failure(ui: &mut dyn Ui, error: &XpostError, verbose: bool) -> u8 {
    ui.say(Tone::Error, &format!("Error: {error}"));
    show_upstream_body(ui, error, verbose);
    error.exit_status()
}

/// In verbose mode, print the raw body of a response the platform rejected.
/// Only an actual response has a body to show.
pub fn show_upstream_body(ui: &mut dyn Ui, error: &XpostError, verbose: bool) {
    if let (true, Some(body)) = (verbose, error.upstream_body()) {
        ui.say(Tone::Error, &format!("Response: {body}"));
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Two-column table of the post text (one row per line) and the image URL.
pub fn render_preview(message: &str, image_url: Option<&str>) -> String {
    let mut rows: Vec<(&str, &str)> = Vec::new();
    for (i, line) in message.lines().enumerate() {
        rows.push((if i == 0 { "Text" } else { "" }, line));
    }
    if rows.is_empty() {
        rows.push(("Text", ""));
    }
    if let Some(url) = image_url {
        rows.push(("Image", url));
    }

    let field_width = rows
        .iter()
        .map(|(f, _)| f.chars().count())
        .chain(std::iter::once("Field".len()))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .chain(std::iter::once("Value".len()))
        .max()
        .unwrap_or(0);

    let border = format!("+-{}-+-{}-+", "-".repeat(field_width), "-".repeat(value_width));
    let row = |f: &str, v: &str| {
        format!(
            "| {f}{} | {v}{} |",
            " ".repeat(field_width - f.chars().count()),
            " ".repeat(value_width - v.chars().count())
        )
    };

    let mut out = vec![border.clone(), row("Field", "Value"), border.clone()];
    out.extend(rows.iter().map(|(f, v)| row(f, v)));
    out.push(border);
    out.join("\n")
}

/// Windows consoles other than Windows Terminal mangle emoji.
pub fn warn_about_emoji_support(ui: &mut dyn Ui) {
    if cfg!(windows) && std::env::var_os("WT_SESSION").is_none() {
        ui.say(
            Tone::Warning,
            "For correct emoji display, run this from Windows Terminal.",
        );
    }
}
