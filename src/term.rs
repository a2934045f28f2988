//! Terminal initialization.
//!
//! Keys are read from a terminal in raw mode, while state is published on standard
//! output, so only the input side of the terminal is reconfigured.

use crate::error::{Error, Result};
use libc::{STDIN_FILENO, TCSADRAIN, VMIN, VTIME, c_int, termios};
use std::mem::MaybeUninit;
use std::sync::OnceLock;

/// Puts the terminal into raw mode.
///
/// Reads do not block indefinitely when no bytes are available; the driver waits
/// `1/10` second before returning with nothing.
pub fn init() -> Result<()> {
    default_term().and_then(|mut term| unsafe {
        libc::cfmakeraw(&mut term);
        term.c_oflag |= libc::OPOST;
        term.c_cc[VMIN] = 0;
        term.c_cc[VTIME] = 1;
        check_err(libc::tcsetattr(STDIN_FILENO, TCSADRAIN, &term))
    })
}

/// Restores the terminal to its original configuration.
pub fn restore() -> Result<()> {
    default_term()
        .and_then(|term| unsafe { check_err(libc::tcsetattr(STDIN_FILENO, TCSADRAIN, &term)) })
}

/// Returns `true` if standard input is a terminal.
pub fn is_terminal() -> bool {
    unsafe { libc::isatty(STDIN_FILENO) == 1 }
}

fn check_err(err: c_int) -> Result<()> {
    if err < 0 { Err(Error::os()) } else { Ok(()) }
}

/// Ensures that default terminal configuration is captured at most once.
static DEFAULT_TERM: OnceLock<Result<termios>> = OnceLock::new();

/// Returns the terminal configuration captured before entering raw mode.
fn default_term() -> Result<termios> {
    let def_term = DEFAULT_TERM.get_or_init(|| {
        let term = unsafe {
            let mut term = MaybeUninit::<termios>::uninit();
            check_err(libc::tcgetattr(STDIN_FILENO, term.as_mut_ptr()))?;
            term.assume_init()
        };
        Ok(term)
    });
    match def_term {
        Ok(term) => Ok(*term),
        Err(Error::Os { cause }) => Err(Error::os_cloning(cause)),
        Err(e) => Err(Error::os_cloning(&std::io::Error::other(e.to_string()))),
    }
}
