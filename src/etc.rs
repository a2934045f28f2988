//! Useful functions with designated modules.

// Version and build information.
const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_HASH: &str = env!("BUILD_HASH");
const BUILD_DATE: &str = env!("BUILD_DATE");

/// Returns a formatted version string including build information.
pub fn version() -> String {
    format!("{PACKAGE_NAME} {PACKAGE_VERSION} ({BUILD_HASH} {BUILD_DATE})")
}

/// Returns the byte offset in `buf` corresponding to the `pos`-th character, which is
/// guaranteed to be aligned to a UTF-8 code point boundary in `buf`.
///
/// If `buf` contains less than `pos` characters, then `buf.len()` is returned.
pub fn pos_to_offset(buf: &str, pos: usize) -> usize {
    buf.chars()
        .take(pos)
        .fold(0, |offset, c| offset + c.len_utf8())
}

/// Returns the character index of the first `c` in `buf` at or after the character
/// index `from`, if any.
pub fn find_char(buf: &str, c: char, from: usize) -> Option<usize> {
    buf.chars()
        .enumerate()
        .skip(from)
        .find_map(|(pos, x)| if x == c { Some(pos) } else { None })
}

/// Returns the character index of the last `c` in `buf` strictly before the
/// character index `until`, if any.
pub fn rfind_char(buf: &str, c: char, until: usize) -> Option<usize> {
    buf.chars()
        .take(until)
        .enumerate()
        .filter_map(|(pos, x)| if x == c { Some(pos) } else { None })
        .last()
}
