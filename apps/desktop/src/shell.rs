//! Line-oriented view over a [`SessionController`]. Holds no session logic:
//! it parses intents, forwards them, and renders the resulting state.

use std::{io::Write, time::Instant};

use anyhow::{anyhow, bail, Context, Result};
use client_core::{RandomSource, SessionController, SessionState, ShareOutcome};
use shared::settings::validate_roll_duration;
use storage::KeyValueMedium;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const IDLE_TEXT: &str = "Roll for your mental reset";
pub const ROLLING_TEXT: &str = "Rolling...";
pub const NO_FAVORITES_TEXT: &str = "You have no favorite prompts yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Roll,
    Favorite,
    Share,
    Favorites,
    /// 1-based position in the favorites list.
    Remove(usize),
    Duration(u32),
    Settings,
    Close,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Roll);
    };
    let arg = words.next();
    if words.next().is_some() {
        bail!("too many arguments; type 'help' for commands");
    }

    let command = match (head.to_ascii_lowercase().as_str(), arg) {
        ("roll" | "r", None) => ShellCommand::Roll,
        ("fav" | "f" | "heart", None) => ShellCommand::Favorite,
        ("share" | "s", None) => ShellCommand::Share,
        ("favorites" | "list" | "ls", None) => ShellCommand::Favorites,
        ("remove" | "rm", Some(raw)) => {
            let index: usize = raw
                .parse()
                .map_err(|_| anyhow!("'{raw}' is not a favorite number"))?;
            if index == 0 {
                bail!("favorites are numbered from 1");
            }
            ShellCommand::Remove(index)
        }
        ("duration" | "d", Some(raw)) => {
            let ms: u32 = raw
                .parse()
                .map_err(|_| anyhow!("'{raw}' is not a duration in milliseconds"))?;
            ShellCommand::Duration(validate_roll_duration(ms)?)
        }
        ("settings", None) => ShellCommand::Settings,
        ("close", None) => ShellCommand::Close,
        ("help" | "h" | "?", None) => ShellCommand::Help,
        ("quit" | "q" | "exit", None) => ShellCommand::Quit,
        ("remove" | "rm" | "duration" | "d", None) => bail!("'{head}' needs an argument"),
        _ => bail!("unknown command '{}'; type 'help' for commands", line.trim()),
    };
    Ok(command)
}

/// View-only state; never persisted.
#[derive(Debug, Default)]
pub struct ShellView {
    pub settings_open: bool,
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}

pub async fn run<M, R, I, O>(
    controller: &mut SessionController<M, R>,
    input: I,
    mut out: O,
) -> Result<()>
where
    M: KeyValueMedium,
    R: RandomSource,
    I: AsyncBufRead + Unpin,
    O: Write,
{
    let mut view = ShellView::default();
    let mut lines = input.lines();

    writeln!(out, "Reflection Dice - your daily moment of mindfulness")?;
    writeln!(out, "{}", render_state(controller))?;
    writeln!(out, "{}", help_text(controller.can_share()))?;
    out.flush()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    settle_pending(controller, &mut out).await?;
                    break;
                };
                match parse_command(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        debug!(?command, "shell: command");
                        apply(controller, &mut view, command, &mut out).await?;
                    }
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            () = wait_until(controller.next_deadline()) => {
                if controller.tick(now()).is_some() {
                    writeln!(out, "{}", render_state(controller))?;
                    if view.settings_open {
                        writeln!(out, "{}", render_settings(controller))?;
                    }
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Input ended mid-roll: let the roll finish so its prompt is shown.
async fn settle_pending<M, R, O>(controller: &mut SessionController<M, R>, out: &mut O) -> Result<()>
where
    M: KeyValueMedium,
    R: RandomSource,
    O: Write,
{
    if let Some(deadline) = controller.next_deadline() {
        wait_until(Some(deadline)).await;
        if controller.tick(deadline).is_some() {
            writeln!(out, "{}", render_state(controller))?;
        }
    }
    Ok(())
}

pub async fn apply<M, R, O>(
    controller: &mut SessionController<M, R>,
    view: &mut ShellView,
    command: ShellCommand,
    out: &mut O,
) -> Result<()>
where
    M: KeyValueMedium,
    R: RandomSource,
    O: Write,
{
    match command {
        ShellCommand::Roll => {
            if controller.roll(now()) {
                writeln!(out, "{ROLLING_TEXT}")?;
            } else {
                writeln!(out, "Still rolling, hold on...")?;
            }
        }
        ShellCommand::Favorite => match controller.toggle_favorite().await {
            Some(true) => writeln!(out, "Saved to favorites.")?,
            Some(false) => writeln!(out, "Removed from favorites.")?,
            None => writeln!(out, "Roll first to get a prompt.")?,
        },
        ShellCommand::Share => match controller.share().await {
            ShareOutcome::Shared => writeln!(out, "Prompt copied to clipboard.")?,
            ShareOutcome::Unavailable => {
                writeln!(out, "Sharing is not available on this system.")?
            }
            ShareOutcome::NothingToShare => writeln!(out, "Nothing to share yet.")?,
            ShareOutcome::Failed => writeln!(out, "Could not share this prompt.")?,
        },
        ShellCommand::Favorites => writeln!(out, "{}", render_favorites(controller))?,
        ShellCommand::Remove(position) => {
            let prompt = position
                .checked_sub(1)
                .and_then(|index| controller.favorites().get(index))
                .cloned();
            match prompt {
                Some(prompt) => {
                    controller.remove_favorite(&prompt).await;
                    writeln!(out, "Removed: {prompt}")?;
                    if view.settings_open {
                        writeln!(out, "{}", render_favorites(controller))?;
                    }
                }
                None => writeln!(out, "There is no favorite #{position}.")?,
            }
        }
        ShellCommand::Duration(ms) => {
            controller.set_roll_duration(ms).await;
            writeln!(out, "Roll Animation: {}", format_seconds(ms))?;
        }
        ShellCommand::Settings => {
            view.settings_open = true;
            writeln!(out, "{}", render_settings(controller))?;
        }
        ShellCommand::Close => {
            view.settings_open = false;
            writeln!(out, "{}", render_state(controller))?;
        }
        ShellCommand::Help => writeln!(out, "{}", help_text(controller.can_share()))?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

pub fn render_state<M, R>(controller: &SessionController<M, R>) -> String
where
    M: KeyValueMedium,
    R: RandomSource,
{
    match controller.state() {
        SessionState::Idle => IDLE_TEXT.to_string(),
        SessionState::Rolling { .. } => ROLLING_TEXT.to_string(),
        SessionState::Settled(prompt) => {
            let heart = if controller.is_current_favorite() {
                "[*] favorite"
            } else {
                "[ ] favorite"
            };
            format!("\n    {prompt}\n\n    {heart}")
        }
    }
}

pub fn render_settings<M, R>(controller: &SessionController<M, R>) -> String
where
    M: KeyValueMedium,
    R: RandomSource,
{
    format!(
        "-- Settings --\nRoll Animation: {}\n{}",
        format_seconds(controller.roll_duration_ms()),
        render_favorites(controller)
    )
}

pub fn render_favorites<M, R>(controller: &SessionController<M, R>) -> String
where
    M: KeyValueMedium,
    R: RandomSource,
{
    let favorites = controller.favorites();
    if favorites.is_empty() {
        return format!("Favorites\n  {NO_FAVORITES_TEXT}");
    }
    let mut text = String::from("Favorites");
    for (i, prompt) in favorites.iter().enumerate() {
        text.push_str(&format!("\n  {}. {prompt}", i + 1));
    }
    text
}

fn format_seconds(ms: u32) -> String {
    format!("{}s", f64::from(ms) / 1000.0)
}

fn help_text(can_share: bool) -> String {
    let mut text = String::from(
        "Commands: <enter>/roll, fav, favorites, remove <n>, duration <500-2000>, settings, close, help, quit",
    );
    if can_share {
        text.push_str(", share");
    }
    text
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
