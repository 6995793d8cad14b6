//! Directory module for managing the set of registered users.
//!
//! The directory keeps users sorted ascending by folded username, with
//! unique keys. Insertion walks the list to find its slot; rosters are
//! small, so no index structure is kept alongside.

use tracing::debug;

use crate::error::{Result, SocialError};
use crate::post::Pages;
use crate::user::User;
use crate::util;

/// Counts of everything released by [`Directory::teardown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub users: usize,
    pub friends: usize,
    pub posts: usize,
}

/// All registered users, ascending by folded username.
#[derive(Debug, Default)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user at its sorted position.
    ///
    /// Rejected registrations leave the directory untouched.
    pub fn register(&mut self, username: &str, password: &str) -> Result<&User> {
        if username.is_empty() {
            return Err(SocialError::InvalidInput { field: "username" });
        }
        if password.is_empty() {
            return Err(SocialError::InvalidInput { field: "password" });
        }
        util::check_password(password).map_err(|reason| SocialError::ValidationFailed { reason })?;

        let key = util::fold_username(username);

        let mut index = 0;
        while index < self.users.len() && self.users[index].username() < key.as_str() {
            index += 1;
        }
        if index < self.users.len() && self.users[index].username() == key {
            return Err(SocialError::Duplicate { username: key });
        }

        self.users.try_reserve(1)?;
        self.users.insert(index, User::new(&key, password));
        debug!(username = %key, position = index, "registered user");
        Ok(&self.users[index])
    }

    /// Look up a user by name, ignoring ASCII case.
    pub fn find(&self, username: &str) -> Option<&User> {
        let key = util::fold_username(username);
        self.users.iter().find(|user| user.username() == key)
    }

    pub fn find_mut(&mut self, username: &str) -> Option<&mut User> {
        let key = util::fold_username(username);
        self.users.iter_mut().find(|user| user.username() == key)
    }

    fn require_mut(&mut self, username: &str) -> Result<&mut User> {
        self.find_mut(username).ok_or_else(|| SocialError::UserNotFound {
            username: util::fold_username(username),
        })
    }

    fn require(&self, username: &str) -> Result<&User> {
        self.find(username).ok_or_else(|| SocialError::UserNotFound {
            username: util::fold_username(username),
        })
    }

    pub fn change_password(&mut self, username: &str, password: &str) -> Result<()> {
        self.require_mut(username)?.set_password(password)
    }

    pub fn add_post(&mut self, username: &str, text: &str) -> Result<()> {
        let user = self.require_mut(username)?;
        if text.is_empty() {
            return Err(SocialError::InvalidInput { field: "post text" });
        }
        user.posts_mut().push(text)
    }

    /// Remove the given user's most recent post.
    pub fn delete_post(&mut self, username: &str) -> Result<()> {
        let user = self.require_mut(username)?;
        if user.posts_mut().pop() {
            Ok(())
        } else {
            Err(SocialError::EmptyCollection {
                username: user.username().to_string(),
            })
        }
    }

    pub fn add_friend(&mut self, username: &str, friend: &str) -> Result<()> {
        let user = self.require_mut(username)?;
        if friend.is_empty() {
            return Err(SocialError::InvalidInput { field: "friend name" });
        }
        user.friends_mut().add(friend)
    }

    pub fn delete_friend(&mut self, username: &str, friend: &str) -> Result<()> {
        let user = self.require_mut(username)?;
        if user.friends_mut().remove(friend) {
            Ok(())
        } else {
            Err(SocialError::FriendNotFound {
                username: user.username().to_string(),
                friend: util::fold_username(friend),
            })
        }
    }

    /// Newest-first pages of a user's posts. A page size of zero means 3.
    pub fn list_posts(&self, username: &str, page_size: usize) -> Result<Pages<'_>> {
        Ok(self.require(username)?.posts().pages(page_size))
    }

    /// A user's friends in ascending order; empty is a valid answer.
    pub fn list_friends(&self, username: &str) -> Result<Vec<&str>> {
        Ok(self.require(username)?.friends().iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn usernames(&self) -> Vec<&str> {
        self.users.iter().map(User::username).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Release every user with its friends and posts.
    ///
    /// Consumes the directory, so it cannot be used or torn down again.
    pub fn teardown(mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        while let Some(mut user) = self.users.pop() {
            let (friends, posts) = user.release();
            report.friends += friends;
            report.posts += posts;
            report.users += 1;
        }
        debug!(
            users = report.users,
            friends = report.friends,
            posts = report.posts,
            "directory torn down"
        );
        report
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Directory with {} users:", self.users.len())?;
        for user in &self.users {
            writeln!(f, "{user}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::post::Post;

    fn is_sorted(directory: &Directory) -> bool {
        let names = directory.usernames();
        names.windows(2).all(|pair| pair[0] < pair[1])
    }

    #[test]
    fn test_register_keeps_directory_sorted() {
        let mut directory = Directory::new();
        for name in ["mallory", "Alice", "zed", "bob", "Carol", "aaron"] {
            directory.register(name, "password1").unwrap();
            assert!(is_sorted(&directory));
        }
        assert_eq!(
            directory.usernames(),
            vec!["aaron", "alice", "bob", "carol", "mallory", "zed"]
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();

        let err = directory.register("ALICE", "different9").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.find("alice").unwrap().password(), "password1");
    }

    #[test]
    fn test_password_rules_at_registration() {
        let mut directory = Directory::new();
        assert_eq!(
            directory.register("a", "1234567").unwrap_err().kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            directory.register("b", "123456789012345").unwrap_err().kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            directory.register("c", "has space1").unwrap_err().kind(),
            ErrorKind::ValidationFailed
        );
        assert!(directory.is_empty());

        directory.register("d", "12345678").unwrap();
        directory.register("e", "12345678901234").unwrap();
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_missing_fields_are_invalid_input() {
        let mut directory = Directory::new();
        assert_eq!(
            directory.register("", "password1").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            directory.register("alice", "").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn test_find_ignores_case() {
        let mut directory = Directory::new();
        directory.register("Alice", "password1").unwrap();

        let user = directory.find("ALICE").unwrap();
        assert_eq!(user.username(), "alice");
        assert!(directory.find("alicia").is_none());
    }

    #[test]
    fn test_post_operations() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();

        directory.add_post("alice", "p1").unwrap();
        directory.add_post("Alice", "p2").unwrap();
        directory.delete_post("alice").unwrap();

        let posts: Vec<&str> = directory.find("alice").unwrap().posts().iter().map(Post::content).collect();
        assert_eq!(posts, vec!["p1"]);

        directory.delete_post("alice").unwrap();
        assert_eq!(
            directory.delete_post("alice").unwrap_err().kind(),
            ErrorKind::EmptyCollection
        );
        assert_eq!(
            directory.add_post("alice", "").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            directory.add_post("nobody", "hi").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_friend_operations() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();

        assert!(directory.list_friends("alice").unwrap().is_empty());

        directory.add_friend("alice", "Bob").unwrap();
        directory.add_friend("alice", "alice").unwrap();
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["alice", "bob"]);

        let err = directory.delete_friend("alice", "carol").unwrap_err();
        assert!(matches!(err, SocialError::FriendNotFound { .. }));
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["alice", "bob"]);

        directory.delete_friend("alice", "BOB").unwrap();
        assert_eq!(directory.list_friends("alice").unwrap(), vec!["alice"]);

        assert_eq!(
            directory.add_friend("alice", "").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(matches!(
            directory.list_friends("nobody").unwrap_err(),
            SocialError::UserNotFound { .. }
        ));
    }

    #[test]
    fn test_change_password() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();

        directory.change_password("ALICE", "password2").unwrap();
        assert_eq!(directory.find("alice").unwrap().password(), "password2");

        assert_eq!(
            directory.change_password("alice", "bad").unwrap_err().kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            directory.change_password("bob", "password3").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(directory.find("alice").unwrap().password(), "password2");
    }

    #[test]
    fn test_list_posts_pages() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();
        for text in ["1", "2", "3", "4"] {
            directory.add_post("alice", text).unwrap();
        }

        let pages: Vec<Vec<&str>> = directory
            .list_posts("alice", 0)
            .unwrap()
            .map(|page| page.into_iter().map(Post::content).collect())
            .collect();
        assert_eq!(pages, vec![vec!["4", "3", "2"], vec!["1"]]);
        assert!(directory.list_posts("bob", 3).is_err());
    }

    #[test]
    fn test_independent_directories() {
        let mut first = Directory::new();
        let second = Directory::new();
        first.register("alice", "password1").unwrap();
        assert!(second.find("alice").is_none());
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut directory = Directory::new();
        directory.register("alice", "password1").unwrap();
        directory.register("bob", "password2").unwrap();
        directory.add_friend("alice", "bob").unwrap();
        directory.add_friend("alice", "carol").unwrap();
        directory.add_friend("bob", "alice").unwrap();
        directory.add_post("alice", "hi").unwrap();
        directory.add_post("bob", "yo").unwrap();
        directory.add_post("bob", "again").unwrap();

        let report = directory.teardown();
        assert_eq!(
            report,
            TeardownReport {
                users: 2,
                friends: 3,
                posts: 3
            }
        );
    }

    #[test]
    fn test_teardown_empty_directory() {
        assert_eq!(Directory::new().teardown(), TeardownReport::default());
    }
}
