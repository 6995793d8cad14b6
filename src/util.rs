//! Small text helpers shared by the roster collections.
//!
//! Usernames and friend names are folded to ASCII lowercase and cut to a
//! fixed number of characters before they are stored or compared.

use std::io::{self, BufRead};

use chrono::{DateTime, FixedOffset};

/// Longest username or friend name kept, in characters.
pub const MAX_USERNAME_LEN: usize = 30;
/// Longest password kept, in characters.
pub const MAX_PASSWORD_LEN: usize = 14;
/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Longest post body kept, in characters.
pub const MAX_POST_LEN: usize = 255;

/// Cut `s` to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Fold a username into its stored key: truncated, then ASCII-lowercased.
///
/// Only ASCII letters change case, so key ordering is plain byte ordering
/// of the folded strings.
pub fn fold_username(name: &str) -> String {
    truncate_chars(name, MAX_USERNAME_LEN).to_ascii_lowercase()
}

/// Check the password shape rule: 8 to 14 characters, no whitespace.
///
/// Returns the reason for rejection on failure.
pub fn check_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err("password shorter than 8 characters");
    }
    if len > MAX_PASSWORD_LEN {
        return Err("password longer than 14 characters");
    }
    if password.chars().any(char::is_whitespace) {
        return Err("password contains whitespace");
    }
    Ok(())
}

/// Read one line as text, without its line ending. `None` at end of input.
///
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
pub fn read_line_lossy<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Get the current local time, with timezone.
pub fn current_time() -> DateTime<FixedOffset> {
    chrono::Local::now().into()
}
