//! Colon commands.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Fonts understood by the remote display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Mono,
    Sans,
    #[default]
    Serif,
    Latex,
}

impl Font {
    pub fn as_str(&self) -> &'static str {
        match self {
            Font::Mono => "mono",
            Font::Sans => "sans",
            Font::Serif => "serif",
            Font::Latex => "latex",
        }
    }
}

impl FromStr for Font {
    type Err = Error;

    fn from_str(s: &str) -> Result<Font> {
        match s {
            "mono" => Ok(Font::Mono),
            "sans" => Ok(Font::Sans),
            "serif" => Ok(Font::Serif),
            "latex" => Ok(Font::Latex),
            _ => Err(Error::invalid_setting("font", s)),
        }
    }
}

impl Display for Font {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed colon command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `:w [name]`
    Write(Option<String>),
    /// `:e name` or `:e! name`
    Edit { name: String, force: bool },
    /// `:q` or `:q!`
    Quit { force: bool },
    /// `:h`
    Help,
    /// `:rot`
    Rotate,
    /// `:mono`, `:sans`, `:serif` or `:latex`
    Font(Font),
    /// `:fontsize N` or `:fs N`
    FontSize(u32),
    /// `:viz lines:shift`, or `:viz` alone to clear
    Viz(Option<(usize, usize)>),
    /// `:wc`
    Count,
    /// `:lint`
    Lint,
    /// `:rs`
    Readability,
    Unknown(String),
}

/// Parses the text of a colon command, excluding the leading `:`.
///
/// # Errors
///
/// Returns an [`Err`] if a numeric argument is malformed.
pub fn parse_command(text: &str) -> Result<Command> {
    let (verb, arg) = split_verb(text);

    let command = match verb {
        "w" => Command::Write(if arg.is_empty() {
            None
        } else {
            Some(arg.to_string())
        }),
        "e" => Command::Edit {
            name: arg.to_string(),
            force: false,
        },
        "e!" => Command::Edit {
            name: arg.to_string(),
            force: true,
        },
        "q" => Command::Quit { force: false },
        "q!" => Command::Quit { force: true },
        "h" => Command::Help,
        "rot" => Command::Rotate,
        "mono" | "sans" | "serif" | "latex" => Command::Font(verb.parse()?),
        "fontsize" | "fs" => Command::FontSize(parse_font_size(arg)?),
        "viz" => Command::Viz(parse_viz(arg)?),
        "wc" => Command::Count,
        "lint" => Command::Lint,
        "rs" => Command::Readability,
        _ => Command::Unknown(text.trim().to_string()),
    };
    Ok(command)
}

/// The largest font size accepted from commands and configuration.
pub const MAX_FONT_SIZE: u32 = 1000;

fn parse_font_size(arg: &str) -> Result<u32> {
    match arg.parse::<u32>() {
        Ok(n) if (1..=MAX_FONT_SIZE).contains(&n) => Ok(n),
        _ => Err(Error::invalid_font_size(arg)),
    }
}

fn parse_viz(arg: &str) -> Result<Option<(usize, usize)>> {
    if arg.is_empty() {
        Ok(None)
    } else {
        arg.split_once(':')
            .and_then(|(lines, shift)| {
                let lines = lines.trim().parse::<usize>().ok()?;
                let shift = shift.trim().parse::<usize>().ok()?;
                Some(Some((lines, shift)))
            })
            .ok_or_else(|| Error::invalid_viz(arg))
    }
}

/// Returns the partial document name of an `:e` or `:e!` command, which is the
/// only kind of command eligible for completion.
pub fn completion_prefix(text: &str) -> Option<&str> {
    let (verb, arg) = split_verb(text);
    if verb == "e" || verb == "e!" {
        Some(arg)
    } else {
        None
    }
}

fn split_verb(text: &str) -> (&str, &str) {
    let trimmed = text.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (trimmed, ""),
    }
}
