//! Interactive menu over a [`Directory`].
//!
//! The menu reads answers line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so a whole session can be replayed
//! from a string in tests.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::directory::Directory;
use crate::error::{ErrorKind, SocialError};
use crate::util;

const MENU: &str = "\n========== ROSTER MENU ==========\n\
1. Register user\n\
2. Change password\n\
3. Add post\n\
4. Delete post\n\
5. Add friend\n\
6. Delete friend\n\
7. Display user posts\n\
8. Display user friends\n\
9. Exit\n\
=================================";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Register,
    ChangePassword,
    AddPost,
    DeletePost,
    AddFriend,
    DeleteFriend,
    DisplayPosts,
    DisplayFriends,
    Exit,
}

impl Choice {
    /// Parse the leading number of a line; trailing text after the digits is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim_start();
        let digits = input
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(input.len(), |(idx, _)| idx);
        match input[..digits].parse::<u8>().ok()? {
            1 => Some(Self::Register),
            2 => Some(Self::ChangePassword),
            3 => Some(Self::AddPost),
            4 => Some(Self::DeletePost),
            5 => Some(Self::AddFriend),
            6 => Some(Self::DeleteFriend),
            7 => Some(Self::DisplayPosts),
            8 => Some(Self::DisplayFriends),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'d, R, W> {
    directory: &'d mut Directory,
    input: R,
    output: W,
    page_size: usize,
}

impl<'d, R: BufRead, W: Write> Menu<'d, R, W> {
    pub fn new(directory: &'d mut Directory, input: R, output: W, page_size: usize) -> Self {
        Self {
            directory,
            input,
            output,
            page_size,
        }
    }

    /// Run until the user exits or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Choice: ")? else {
                break;
            };

            let Some(choice) = Choice::parse(&line) else {
                writeln!(self.output, "Invalid choice.")?;
                continue;
            };
            debug!(?choice, "menu choice");

            let keep_going = match choice {
                Choice::Register => self.register()?,
                Choice::ChangePassword => self.change_password()?,
                Choice::AddPost => self.add_post()?,
                Choice::DeletePost => self.delete_post()?,
                Choice::AddFriend => self.add_friend()?,
                Choice::DeleteFriend => self.delete_friend()?,
                Choice::DisplayPosts => self.display_posts()?,
                Choice::DisplayFriends => self.display_friends()?,
                Choice::Exit => false,
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()
    }

    /// Print `label` and read one line without its line ending. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        util::read_line_lossy(&mut self.input)
    }

    fn report(&mut self, result: Result<(), SocialError>, success: &str) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "{success}"),
            Err(err) => writeln!(self.output, "{}", describe(&err)),
        }
    }

    // Each handler returns Ok(false) when input ran out mid-prompt.

    fn register(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        let Some(password) = self.prompt("Password (8-14 chars, no spaces): ")? else {
            return Ok(false);
        };
        if util::check_password(&password).is_err() {
            writeln!(self.output, "Invalid password.")?;
            return Ok(true);
        }
        let result = self.directory.register(&username, &password).map(|_| ());
        self.report(result, "User registered.")?;
        Ok(true)
    }

    fn change_password(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        if self.directory.find(&username).is_none() {
            writeln!(self.output, "User not found.")?;
            return Ok(true);
        }
        let Some(password) = self.prompt("New password (8-14 chars, no spaces): ")? else {
            return Ok(false);
        };
        let result = self.directory.change_password(&username, &password);
        self.report(result, "Password changed.")?;
        Ok(true)
    }

    fn add_post(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        if self.directory.find(&username).is_none() {
            writeln!(self.output, "User not found.")?;
            return Ok(true);
        }
        let Some(text) = self.prompt("Post text: ")? else {
            return Ok(false);
        };
        let result = self.directory.add_post(&username, &text);
        self.report(result, "Post added.")?;
        Ok(true)
    }

    fn delete_post(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        let result = self.directory.delete_post(&username);
        self.report(result, "Latest post deleted.")?;
        Ok(true)
    }

    fn add_friend(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        if self.directory.find(&username).is_none() {
            writeln!(self.output, "User not found.")?;
            return Ok(true);
        }
        let Some(friend) = self.prompt("Friend username: ")? else {
            return Ok(false);
        };
        let result = self.directory.add_friend(&username, &friend);
        self.report(result, "Friend added.")?;
        Ok(true)
    }

    fn delete_friend(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        if self.directory.find(&username).is_none() {
            writeln!(self.output, "User not found.")?;
            return Ok(true);
        }
        let Some(friend) = self.prompt("Friend username to delete: ")? else {
            return Ok(false);
        };
        let result = self.directory.delete_friend(&username, &friend);
        self.report(result, "Friend deleted.")?;
        Ok(true)
    }

    fn display_posts(&mut self) -> io::Result<bool> {
        if self.directory.is_empty() {
            writeln!(self.output, "No users loaded.")?;
            return Ok(true);
        }
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(false);
        };

        // Render pages up front so the directory borrow ends before prompting.
        let pages: Vec<Vec<String>> = match self.directory.list_posts(&username, self.page_size) {
            Ok(pages) => pages
                .map(|page| page.into_iter().map(ToString::to_string).collect())
                .collect(),
            Err(err) => {
                writeln!(self.output, "{}", describe(&err))?;
                return Ok(true);
            }
        };
        if pages.is_empty() {
            writeln!(self.output, "No posts.")?;
            return Ok(true);
        }

        let mut pages = pages.into_iter().peekable();
        while let Some(page) = pages.next() {
            for line in page {
                writeln!(self.output, "{line}")?;
            }
            if pages.peek().is_none() {
                break;
            }
            match self.prompt("More posts? (Y/N): ")? {
                Some(answer) if answer.starts_with(['Y', 'y']) => {}
                Some(_) => break,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn display_friends(&mut self) -> io::Result<bool> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(false);
        };
        let names: Vec<String> = match self.directory.list_friends(&username) {
            Ok(names) => names.into_iter().map(String::from).collect(),
            Err(err) => {
                writeln!(self.output, "{}", describe(&err))?;
                return Ok(true);
            }
        };
        if names.is_empty() {
            writeln!(self.output, "No friends.")?;
        }
        for name in names {
            writeln!(self.output, "- {name}")?;
        }
        Ok(true)
    }
}

/// The one-line message shown for a rejected operation.
fn describe(err: &SocialError) -> &'static str {
    match err {
        SocialError::UserNotFound { .. } => "User not found.",
        SocialError::FriendNotFound { .. } => "Friend not found.",
        SocialError::Duplicate { .. } => "Username already exists.",
        SocialError::EmptyCollection { .. } => "No posts to delete.",
        SocialError::InvalidInput { field: "post text" } => "Empty post rejected.",
        SocialError::InvalidInput { field: "friend name" } => "Empty friend name rejected.",
        _ => match err.kind() {
            ErrorKind::ValidationFailed => "Invalid password.",
            ErrorKind::InvalidInput => "User not added.",
            _ => "Operation failed.",
        },
    }
}
