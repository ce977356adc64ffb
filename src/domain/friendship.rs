use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FriendshipId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FriendshipStatus::Pending),
            "accepted" => Ok(FriendshipStatus::Accepted),
            "rejected" => Ok(FriendshipStatus::Rejected),
            _ => Err(format!("Invalid friendship status: {}", s)),
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Friendship {
    pub id: FriendshipId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    pub fn involves(&self, a: UserId, b: UserId) -> bool {
        (self.requester_id == a && self.receiver_id == b)
            || (self.requester_id == b && self.receiver_id == a)
    }

    /// The participant that is not `user_id`.
    pub fn other_party(&self, user_id: UserId) -> UserId {
        if self.requester_id == user_id {
            self.receiver_id
        } else {
            self.requester_id
        }
    }
}
