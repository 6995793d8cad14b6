//! Loader module for the bulk user file.
//!
//! The bulk file is comma separated. The first line is a header and is
//! skipped; every following line has the shape
//!
//! ```text
//! username,password[,friend1,friend2,friend3][,post1,post2,...]
//! ```
//!
//! A friend slot holding a single space is skipped but still counts
//! against the three friend slots. Everything after the friend slots is
//! a post, pushed in order so the last field ends up on top of the stack.

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::directory::Directory;
use crate::error::Result;
use crate::util;

/// Friend slots read from each row before the posts start.
pub const FRIEND_SLOTS: usize = 3;

/// Marker for an intentionally empty friend slot.
const BLANK_SLOT: &str = " ";

/// What happened while loading a bulk source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read (header excluded).
    pub rows: usize,
    /// Rows that registered a new user.
    pub registered: usize,
    /// Rows whose registration was rejected.
    pub rejected: usize,
}

/// Split a row on commas, dropping empty fields between adjacent commas.
fn tokenize(row: &str) -> impl Iterator<Item = &str> {
    row.split(',').filter(|token| !token.is_empty())
}

/// Apply one data row to the directory.
///
/// Returns true if the row registered a new user.
fn apply_row(directory: &mut Directory, row: &str) -> Result<bool> {
    let mut tokens = tokenize(row);
    let username = tokens.next().unwrap_or_default();
    let password = tokens.next().unwrap_or_default();

    let registered = match directory.register(username, password) {
        Ok(_) => true,
        Err(err) if err.is_recoverable() => {
            debug!(row, error = %err, "row registration rejected");
            false
        }
        Err(err) => return Err(err),
    };

    // An existing user with the same name still receives the row's friends and posts.
    let Some(user) = directory.find_mut(username) else {
        return Ok(registered);
    };

    for token in tokens.by_ref().take(FRIEND_SLOTS) {
        if token != BLANK_SLOT {
            user.friends_mut().add(token)?;
        }
    }

    for token in tokens {
        user.posts_mut().push(token)?;
    }

    Ok(registered)
}

/// Populate `directory` from a bulk source.
///
/// With `rows` set, at most that many data rows are read; a source that runs
/// out earlier stops the load with a warning. With `None` every row is read.
pub fn load_into<R: BufRead>(
    directory: &mut Directory,
    mut reader: R,
    rows: Option<usize>,
) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    // Header
    if util::read_line_lossy(&mut reader)?.is_none() {
        warn!("bulk source is empty");
        return Ok(report);
    }

    while rows.map_or(true, |limit| report.rows < limit) {
        let Some(row) = util::read_line_lossy(&mut reader)? else {
            if let Some(limit) = rows {
                warn!(expected = limit, found = report.rows, "bulk source ended early");
            }
            break;
        };
        report.rows += 1;

        if apply_row(directory, &row)? {
            report.registered += 1;
        } else {
            report.rejected += 1;
        }
    }

    info!(
        rows = report.rows,
        registered = report.registered,
        rejected = report.rejected,
        "bulk load finished"
    );
    Ok(report)
}

/// Build a new directory from a bulk source.
pub fn load<R: BufRead>(reader: R, rows: Option<usize>) -> Result<(Directory, LoadReport)> {
    let mut directory = Directory::new();
    let report = load_into(&mut directory, reader, rows)?;
    Ok((directory, report))
}

/// Build a new directory from bulk text held in memory.
pub fn parse_str(content: &str, rows: Option<usize>) -> Result<(Directory, LoadReport)> {
    load(content.as_bytes(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Post;
    use std::io::Write;

    const HEADER: &str = "username,password,friend1,friend2,friend3,posts";

    fn posts_of(directory: &Directory, username: &str) -> Vec<String> {
        directory
            .find(username)
            .unwrap()
            .posts()
            .iter()
            .map(Post::content)
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_blank_friend_slot_is_skipped_but_counted() {
        let content = format!("{HEADER}\nalice,password1,bob, ,carol,hello,world\n");
        let (directory, report) = parse_str(&content, Some(1)).unwrap();

        assert_eq!(report, LoadReport { rows: 1, registered: 1, rejected: 0 });
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["bob", "carol"]);
        assert_eq!(posts_of(&directory, "alice"), vec!["world", "hello"]);
    }

    #[test]
    fn test_fourth_field_is_a_post_when_all_slots_used() {
        let content = format!("{HEADER}\nalice,password1,bob,carol,dave,erin\n");
        let (directory, _) = parse_str(&content, None).unwrap();

        assert_eq!(directory.list_friends("alice").unwrap(), vec!["bob", "carol", "dave"]);
        assert_eq!(posts_of(&directory, "alice"), vec!["erin"]);
    }

    #[test]
    fn test_short_rows_yield_fewer_fields() {
        let content = format!("{HEADER}\nbob,password2,alice\ncarol,password3\n");
        let (directory, report) = parse_str(&content, Some(2)).unwrap();

        assert_eq!(report.registered, 2);
        assert_eq!(directory.list_friends("bob").unwrap(), vec!["alice"]);
        assert!(directory.find("bob").unwrap().posts().is_empty());
        assert!(directory.list_friends("carol").unwrap().is_empty());
    }

    #[test]
    fn test_adjacent_commas_are_collapsed() {
        let content = format!("{HEADER}\nalice,password1,,bob,,,post\n");
        let (directory, _) = parse_str(&content, None).unwrap();

        assert_eq!(directory.list_friends("alice").unwrap(), vec!["bob", "post"]);
        assert!(directory.find("alice").unwrap().posts().is_empty());
    }

    #[test]
    fn test_rejected_rows_are_dropped() {
        let content = format!(
            "{HEADER}\nalice,short,bob,,,hi\nAlice,password1,carol\nALICE,password9,dave, , ,again\n"
        );
        let (directory, report) = parse_str(&content, Some(3)).unwrap();

        assert_eq!(report, LoadReport { rows: 3, registered: 1, rejected: 2 });
        assert_eq!(directory.len(), 1);
        let alice = directory.find("alice").unwrap();
        assert_eq!(alice.password(), "password1");
        // The duplicate row still lands on the existing user.
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["carol", "dave"]);
        assert_eq!(posts_of(&directory, "alice"), vec!["again"]);
    }

    #[test]
    fn test_row_limit_is_honoured() {
        let content = format!("{HEADER}\na1,password1\na2,password1\na3,password1\n");
        let (directory, report) = parse_str(&content, Some(2)).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(directory.usernames(), vec!["a1", "a2"]);
    }

    #[test]
    fn test_source_shorter_than_row_count() {
        let content = format!("{HEADER}\nzoe,password1\r\nadam,password2\r\n");
        let (directory, report) = parse_str(&content, Some(50)).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(directory.usernames(), vec!["adam", "zoe"]);
        assert_eq!(directory.find("zoe").unwrap().password(), "password1");
    }

    #[test]
    fn test_invalid_utf8_row_does_not_abort_load() {
        let content = b"username,password\nalice,password1,bob,,,hi\ncarol,password3, , , ,caf\xE9\n";
        let (directory, report) = load(&content[..], None).unwrap();

        assert_eq!(report, LoadReport { rows: 2, registered: 2, rejected: 0 });
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["bob", "hi"]);
        assert_eq!(posts_of(&directory, "carol"), vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn test_empty_source() {
        let (directory, report) = parse_str("", Some(5)).unwrap();
        assert!(directory.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_load_into_existing_directory() {
        let mut directory = Directory::new();
        directory.register("bob", "password2").unwrap();
        let content = format!("{HEADER}\nalice,password1,bob\n");
        load_into(&mut directory, content.as_bytes(), None).unwrap();
        assert_eq!(directory.usernames(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "alice,password1,bob, ,carol,hello,world").unwrap();
        writeln!(file, "bob,password2, , , ,first,second,third").unwrap();
        file.flush().unwrap();

        let reader = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
        let (directory, report) = load(reader, Some(2)).unwrap();
        assert_eq!(report.registered, 2);
        assert!(directory.list_friends("bob").unwrap().is_empty());
        assert_eq!(posts_of(&directory, "bob"), vec!["third", "second", "first"]);

        let teardown = directory.teardown();
        assert_eq!(teardown.users, 2);
        assert_eq!(teardown.friends, 2);
        assert_eq!(teardown.posts, 5);
    }
}
