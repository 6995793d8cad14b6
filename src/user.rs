//! User module for the roster.
//!
//! This module contains the User struct, which owns a password,
//! a friend list and a post stack.

use crate::error::{Result, SocialError};
use crate::friends::FriendList;
use crate::post::PostStack;
use crate::util::{self, MAX_PASSWORD_LEN};

/// A registered user.
///
/// The username is stored folded; it is the directory key and never changes.
#[derive(Clone, Debug)]
pub struct User {
    username: String,
    password: String,
    friends: FriendList,
    posts: PostStack,
}

impl User {
    /// Build a user from already-validated fields.
    pub(crate) fn new(username: &str, password: &str) -> Self {
        User {
            username: util::fold_username(username),
            password: util::truncate_chars(password, MAX_PASSWORD_LEN),
            friends: FriendList::new(),
            posts: PostStack::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn friends(&self) -> &FriendList {
        &self.friends
    }

    pub fn friends_mut(&mut self) -> &mut FriendList {
        &mut self.friends
    }

    pub fn posts(&self) -> &PostStack {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut PostStack {
        &mut self.posts
    }

    /// Replace the password after checking the shape rule.
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        util::check_password(password).map_err(|reason| SocialError::ValidationFailed { reason })?;
        self.password = util::truncate_chars(password, MAX_PASSWORD_LEN);
        Ok(())
    }

    /// Release the friend list and post stack, returning (friends, posts) released.
    pub(crate) fn release(&mut self) -> (usize, usize) {
        (self.friends.release(), self.posts.release())
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = Vec::new();

        output.push(format!("Username: {}", self.username));

        if self.friends.is_empty() {
            output.push("Friends: none".to_string());
        } else {
            output.push(format!(
                "Friends: {} {}",
                self.friends.len(),
                if self.friends.len() == 1 { "friend" } else { "friends" }
            ));
            for (i, name) in self.friends.iter().enumerate() {
                output.push(format!("  {}. {}", i + 1, name));
            }
        }

        output.push(format!("Posts: {}", self.posts.len()));
        if let Some(latest) = self.posts.head() {
            output.push(format!(
                "Latest: {} • {}",
                latest.summary(50),
                latest.created_at().format("%Y-%m-%d %H:%M")
            ));
        }

        write!(f, "{}", output.join("\n"))
    }
}
