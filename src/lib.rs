//! A modal writing editor whose state is streamed to a remote display.
//!
//! The [`Editor`](editor::Editor) is driven one [`Key`](key::Key) at a time and
//! reports which of its published fields changed, leaving transport to the host.
pub mod analyze;
pub mod bind;
pub mod buffer;
pub mod clip;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod etc;
pub mod ex;
pub mod help;
pub mod history;
pub mod key;
pub mod line;
pub mod logging;
pub mod mode;
pub mod op;
pub mod opt;
pub mod render;
pub mod state;
pub mod storage;
pub mod sys;
pub mod term;

mod dispatch;
