//! Friend list kept in ascending order of folded name.
//!
//! Entries are free-text labels: nothing checks that a friend is a
//! registered user, and the same name may appear more than once.

use crate::error::Result;
use crate::util;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FriendList {
    names: Vec<String>,
}

impl FriendList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` at its sorted position.
    ///
    /// Equal names go in front of existing entries, so duplicates sit side by side.
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = util::fold_username(name);
        self.names.try_reserve(1)?;

        let mut index = 0;
        while index < self.names.len() && self.names[index] < name {
            index += 1;
        }
        self.names.insert(index, name);
        Ok(())
    }

    /// Remove the first entry equal to the folded `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = util::fold_username(name);
        match self.names.iter().position(|existing| *existing == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn release(&mut self) -> usize {
        let released = self.names.len();
        self.names.clear();
        released
    }
}
