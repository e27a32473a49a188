//! Display names for scanned users

use crate::remote::api::{Event, User, UserId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ParticipantDirectory {
    names: HashMap<UserId, String>,
}

impl ParticipantDirectory {
    pub fn from_users(users: &[User]) -> Self {
        let mut directory = Self::default();
        directory.absorb_users(users);
        directory
    }

    pub fn absorb_users(&mut self, users: &[User]) {
        for user in users {
            self.names.insert(user.id, user.name.clone());
        }
    }

    /// Pick up names from a refreshed event's attendance list
    pub fn absorb_event(&mut self, event: &Event) {
        for attendance in &event.attendances {
            self.names
                .insert(attendance.user.id, attendance.user.name.clone());
        }
    }

    pub fn display_name(&self, user_id: UserId) -> Option<&str> {
        self.names.get(&user_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
