//! Post module for the roster.
//!
//! This module contains the Post struct and the per-user post stack.
//! Posts are kept newest-first: only the most recent post can be removed.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::util::{self, MAX_POST_LEN};

/// Posts shown per page when the caller asks for a page size of zero.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// A single post owned by a user.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    content: String,
    created_at: DateTime<FixedOffset>,
}

impl Post {
    /// Create a post stamped with the current time. Content is cut to 255 characters.
    pub fn new(content: &str) -> Self {
        Post {
            content: util::truncate_chars(content, MAX_POST_LEN),
            created_at: util::current_time(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn summary(&self, len: usize) -> String {
        let mut summary = util::truncate_chars(&self.content, len);
        if summary.len() < self.content.len() {
            summary.push_str("...");
        }
        summary
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "- {}", self.content)
    }
}

/// LIFO stack of posts.
///
/// The head of the stack is the last element of the backing vector;
/// iteration always starts from the head.
#[derive(Clone, Debug, Default)]
pub struct PostStack {
    posts: Vec<Post>,
}

impl PostStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new post on top of the stack.
    ///
    /// The caller is expected to have rejected empty text already.
    pub fn push(&mut self, text: &str) -> Result<()> {
        self.posts.try_reserve(1)?;
        self.posts.push(Post::new(text));
        Ok(())
    }

    /// Remove the most recent post. Returns false if there was nothing to remove.
    pub fn pop(&mut self) -> bool {
        self.posts.pop().is_some()
    }

    /// The most recent post, if any.
    pub fn head(&self) -> Option<&Post> {
        self.posts.last()
    }

    /// All posts, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().rev()
    }

    /// Split the stack into newest-first pages of `page_size` posts.
    ///
    /// A page size of zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn pages(&self, page_size: usize) -> Pages<'_> {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Pages {
            inner: self.posts.iter().rev(),
            page_size,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Drop every post, returning how many were released.
    pub(crate) fn release(&mut self) -> usize {
        let mut released = 0;
        while self.pop() {
            released += 1;
        }
        released
    }
}

/// Iterator over newest-first pages of a [`PostStack`].
pub struct Pages<'a> {
    inner: std::iter::Rev<std::slice::Iter<'a, Post>>,
    page_size: usize,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Vec<&'a Post>;

    fn next(&mut self) -> Option<Self::Item> {
        let page: Vec<&Post> = self.inner.by_ref().take(self.page_size).collect();
        if page.is_empty() {
            None
        } else {
            Some(page)
        }
    }
}
