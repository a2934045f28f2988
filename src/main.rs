//! The *inkpad* writing editor.
//!
//! Copyright 2024 David Edwards
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <https://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.
use inkpad::clip::Register;
use inkpad::config::{Configuration, Settings};
use inkpad::editor::{Action, Editor};
use inkpad::error::{Error, Result};
use inkpad::etc;
use inkpad::help;
use inkpad::key::{Key, Keyboard};
use inkpad::logging;
use inkpad::opt::Options;
use inkpad::storage::DocsStorage;
use inkpad::term;
use std::io::{self, Write};
use std::ops::Drop;
use std::process::{Command, ExitCode};
use tracing::{info, warn};

/// Usage documentation for display to terminal.
const USAGE: &str = include_str!("include/usage.in");

/// Used for restoring the terminal via [`Drop`] to its original state.
struct RestoreTerminal;

impl Drop for RestoreTerminal {
    fn drop(&mut self) {
        term::restore().unwrap_or_else(|e| eprintln!("error restoring terminal: {e}"));
    }
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    if opts.help {
        println!("{USAGE}");
        Ok(())
    } else if opts.version {
        println!("{}", etc::version());
        Ok(())
    } else if opts.keys {
        print!("{}", help::keys_content());
        Ok(())
    } else if opts.ops {
        print!("{}", help::ops_content());
        Ok(())
    } else {
        run_opts(&opts)
    }
}

fn run_opts(opts: &Options) -> Result<()> {
    // Load optional configuration from either standard location or path specified on
    // command line, and apply command line options afterwards since these override
    // all other settings.
    let mut config = if opts.bare {
        Configuration::default()
    } else if let Some(ref config_path) = opts.config_path {
        Configuration::load_file(config_path)?
    } else {
        Configuration::load()?
    };
    config.apply_opts(opts)?;

    if opts.bindings {
        print!("{}", help::bindings_content(&config.bindings));
        Ok(())
    } else {
        logging::init()?;
        run_config(opts, config)
    }
}

fn run_config(opts: &Options, config: Configuration) -> Result<()> {
    let Configuration { settings, bindings } = config;
    let storage = DocsStorage::open(&settings.docs_dir)?;
    let mut editor = Editor::new(Box::new(storage))
        .with_bindings(bindings)
        .with_undo_depth(settings.undo_depth)
        .with_register(Register::new(settings.global_clipboard))
        .with_display(settings.font, settings.font_size, settings.rotated);
    if let Some(ref file) = opts.file {
        editor.open(file);
    }

    // Puts terminal into raw mode prior to running the main loop, but also ensures
    // terminal settings are restored upon exit.
    let action = if term::is_terminal() {
        term::init()?;
        let _restore = RestoreTerminal;
        run_loop(&mut editor, true)?
    } else {
        run_loop(&mut editor, false)?
    };

    if action == Action::PowerOff {
        power_off(&settings);
    }
    Ok(())
}

/// Reads keys until the editor asks to stop, publishing changed fields after each
/// key as JSON lines on standard output.
///
/// Input that is not a terminal ends when no bytes remain.
fn run_loop(editor: &mut Editor, interactive: bool) -> Result<Action> {
    let mut keyboard = Keyboard::new();
    let mut out = io::stdout().lock();
    publish(editor, &mut out)?;
    loop {
        let key = keyboard.read()?;
        if key == Key::None && !interactive && keyboard.at_eof() {
            return Ok(Action::Quit);
        }
        let action = editor.dispatch(key);
        publish(editor, &mut out)?;
        if let Some(action) = action {
            info!(?action, "stopping");
            return Ok(action);
        }
    }
}

fn publish<W: Write>(editor: &mut Editor, out: &mut W) -> Result<()> {
    for event in editor.events() {
        let json =
            serde_json::to_string(&event).map_err(|e| Error::os_cloning(&io::Error::from(e)))?;
        writeln!(out, "{json}")?;
    }
    out.flush()?;
    Ok(())
}

fn power_off(settings: &Settings) {
    match settings.poweroff_command.as_deref() {
        Some([program, args @ ..]) => {
            info!(program, "powering off");
            if let Err(e) = Command::new(program).args(args).status() {
                warn!(program, "power off failed: {e}");
            }
        }
        _ => info!("no power off command configured"),
    }
}
