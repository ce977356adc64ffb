use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MessageId, User, UserId};

/// A direct message between two students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub corrected_content: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn partner_of(&self, user_id: UserId) -> UserId {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub corrected_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationPreview {
    pub user: User,
    pub last_message: Message,
    pub unread_count: i64,
}
