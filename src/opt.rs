//! Options parser.

use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Default)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub keys: bool,
    pub ops: bool,
    pub bindings: bool,
    pub config_path: Option<String>,
    pub docs_dir: Option<String>,
    pub undo_depth: Option<usize>,
    pub font_size: Option<u32>,
    pub bare: bool,
    pub file: Option<String>,
}

impl Options {
    pub fn parse<T>(args: T) -> Result<Options>
    where
        T: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" => opts.help = true,
                "--version" => opts.version = true,
                "--keys" => opts.keys = true,
                "--ops" => opts.ops = true,
                "--bindings" => opts.bindings = true,
                "--config" => opts.config_path = Some(expect_value(&arg, it.next())?),
                "--docs" => opts.docs_dir = Some(expect_value(&arg, it.next())?),
                "--undo-depth" => opts.undo_depth = Some(parse_arg(&arg, it.next())?),
                "--font-size" => opts.font_size = Some(parse_arg(&arg, it.next())?),
                "--bare" => opts.bare = true,
                arg if arg.starts_with("--") => return Err(Error::unexpected_arg(arg)),
                _ if opts.file.is_some() => return Err(Error::unexpected_arg(&arg)),
                _ => opts.file = Some(arg),
            }
        }
        Ok(opts)
    }
}

fn parse_arg<T>(arg: &str, next_arg: Option<String>) -> Result<T>
where
    T: FromStr,
{
    if let Some(value) = next_arg {
        value
            .parse::<T>()
            .map_err(|_| Error::invalid_value(arg, &value))
    } else {
        Err(Error::expected_value(arg))
    }
}

fn expect_value(arg: &str, next_arg: Option<String>) -> Result<String> {
    next_arg.ok_or_else(|| Error::expected_value(arg))
}
