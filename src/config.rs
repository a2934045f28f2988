//! Contains everything related to configuration.
//!
//! [`Configuration::default()`] is sufficient for initializing the editor. Normally
//! an optional configuration file is applied on top of the defaults, followed by
//! command line options, which take precedence over everything else.
//!
//! Configuration files are formatted according to the
//! [TOML specification](https://toml.io). [`Configuration::load()`] tries the
//! following locations in order of precedence, using only the first one found:
//!
//! * `$HOME/.inkpadrc`
//! * `$HOME/.inkpad/inkpadrc`
//! * `$HOME/.config/inkpad/inkpadrc`
//!
//! An example:
//!
//! ```toml
//! [settings]
//! undo-depth = 20
//! font = "mono"
//! font-size = 40
//!
//! [bindings]
//! "x:x" = "delete-line"
//! ```

use crate::bind::Bindings;
use crate::error::{Error, Result};
use crate::ex::{self, Font};
use crate::history;
use crate::opt::Options;
use crate::sys::{self, AsString};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A configuration representing all aspects of the editing experience.
pub struct Configuration {
    pub settings: Settings,

    /// A map of key sequences to normal-mode operations.
    pub bindings: Bindings,
}

pub struct Settings {
    pub undo_depth: usize,
    pub docs_dir: PathBuf,
    pub font: Font,
    pub font_size: u32,
    pub rotated: bool,
    pub global_clipboard: bool,
    pub poweroff_command: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalConfiguration {
    settings: Option<ExternalSettings>,
    bindings: Option<IndexMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalSettings {
    #[serde(rename = "undo-depth")]
    undo_depth: Option<usize>,

    #[serde(rename = "docs-dir")]
    docs_dir: Option<String>,

    font: Option<Font>,

    #[serde(rename = "font-size")]
    font_size: Option<u32>,

    rotation: Option<u32>,

    #[serde(rename = "global-clipboard")]
    global_clipboard: Option<bool>,

    #[serde(rename = "poweroff-command")]
    poweroff_command: Option<Vec<String>>,
}

impl Settings {
    /// Name of the documents directory under `$HOME` when not configured.
    const DOCS_DIR: &'static str = "inkpad-docs";

    const FONT_SIZE: u32 = 50;

    /// Applies the external settings `ext` on top of `self`.
    fn apply(&mut self, ext: Option<ExternalSettings>) -> Result<()> {
        if let Some(ext) = ext {
            if let Some(depth) = ext.undo_depth {
                self.undo_depth = check_undo_depth(depth)?;
            }
            if let Some(dir) = ext.docs_dir {
                self.docs_dir = expand_home(&dir);
            }
            self.font = ext.font.unwrap_or(self.font);
            if let Some(size) = ext.font_size {
                self.font_size = check_font_size(size)?;
            }
            if let Some(rotation) = ext.rotation {
                self.rotated = match rotation {
                    0 => false,
                    90 => true,
                    _ => return Err(Error::invalid_setting("rotation", &rotation.to_string())),
                };
            }
            self.global_clipboard = ext.global_clipboard.unwrap_or(self.global_clipboard);
            if let Some(command) = ext.poweroff_command {
                if command.is_empty() {
                    return Err(Error::invalid_setting("poweroff-command", "[]"));
                }
                self.poweroff_command = Some(command);
            }
        }
        Ok(())
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) -> Result<()> {
        if let Some(depth) = opts.undo_depth {
            self.undo_depth = check_undo_depth(depth)?;
        }
        if let Some(size) = opts.font_size {
            self.font_size = check_font_size(size)?;
        }
        if let Some(ref dir) = opts.docs_dir {
            self.docs_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn check_undo_depth(depth: usize) -> Result<usize> {
    if depth > 0 {
        Ok(depth)
    } else {
        Err(Error::invalid_setting("undo-depth", &depth.to_string()))
    }
}

fn check_font_size(size: u32) -> Result<u32> {
    if (1..=ex::MAX_FONT_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(Error::invalid_setting("font-size", &size.to_string()))
    }
}

/// Replaces a leading `~/` in `dir` with the home directory.
fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix("~/") {
        Some(rest) => sys::home_dir().join(rest),
        None => PathBuf::from(dir),
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            undo_depth: history::DEFAULT_DEPTH,
            docs_dir: sys::home_dir().join(Self::DOCS_DIR),
            font: Font::default(),
            font_size: Self::FONT_SIZE,
            rotated: false,
            global_clipboard: false,
            poweroff_command: None,
        }
    }
}

impl Configuration {
    /// A collection of resource files to try loading in order of precedence.
    const TRY_FILES: [&str; 3] = [".inkpadrc", ".inkpad/inkpadrc", ".config/inkpad/inkpadrc"];

    /// Returns a configuration that is formed by attempting to load a resource file
    /// from well-known locations.
    pub fn load() -> Result<Configuration> {
        let mut config = Configuration::default();
        let root_path = sys::home_dir();
        for try_path in Self::TRY_FILES {
            let path = root_path.join(try_path);
            if path.exists() {
                let ext = Self::read_file(&path)?;
                config.apply(ext)?;
                break;
            }
        }
        Ok(config)
    }

    /// Returns a configuration loaded from the resource file at `path`.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = Self::read_file(path.as_ref())?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Returns a configuration parsed from `content`, reporting errors against `path`.
    pub fn parse(path: &str, content: &str) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = toml::from_str::<ExternalConfiguration>(content)
            .map_err(|e| Error::configuration(path, &e))?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) -> Result<()> {
        self.settings.apply_opts(opts)
    }

    /// Applies the external configuration `ext` on top of `self`.
    fn apply(&mut self, ext: ExternalConfiguration) -> Result<()> {
        self.settings.apply(ext.settings)?;
        if let Some(bindings) = ext.bindings {
            for (key_seq, op) in bindings {
                self.bindings.bind(&key_seq, &op)?;
            }
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<ExternalConfiguration> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(&path.as_string(), e))?;
        toml::from_str::<ExternalConfiguration>(&content)
            .map_err(|e| Error::configuration(&path.as_string(), &e))
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            settings: Settings::default(),
            bindings: Bindings::new(),
        }
    }
}
