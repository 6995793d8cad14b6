//! # social-roster-rs
//!
//! An in-memory social roster: registered users, their friend lists and their posts.
//!
//! ## Overview
//!
//! social-roster-rs keeps a [`directory::Directory`] of users sorted by username. Each user owns
//! a sorted friend list and a stack of posts with the newest on top. A directory can be
//! populated in bulk from a comma separated file, then edited through the directory
//! operations or the interactive [`menu`].
//!
//! ## Features
//!
//! - **Directory**: Case-insensitive, unique usernames kept in ascending order
//! - **Friend Lists**: Sorted free-text friend names, duplicates allowed
//! - **Post Stacks**: Newest-first posts with paging
//! - **Bulk Loading**: Build a directory from a CSV-like user file
//! - **Teardown**: Release everything and report what was released
//!
//! ## Quick Start
//!
//! ```rust
//! use social_roster::loader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = "username,password,friends,posts\nalice,password1,bob, ,carol,hello,world\n";
//!     let (mut directory, _report) = loader::parse_str(content, None)?;
//!
//!     directory.add_post("Alice", "another one")?;
//!     for page in directory.list_posts("alice", 2)? {
//!         for post in page {
//!             println!("{post}");
//!         }
//!     }
//!
//!     let released = directory.teardown();
//!     assert_eq!(released.users, 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod friends;
pub mod loader;
pub mod logging;
pub mod menu;
pub mod post;
pub mod user;
pub mod util;

pub use directory::{Directory, TeardownReport};
pub use error::{ErrorKind, Result, SocialError};
