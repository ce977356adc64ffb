use std::sync::Arc;

use tracing::{debug, info};

use super::{GrammarService, ServiceError};
use crate::application::ports::{
    FriendshipRepository, MessageRepository, RepositoryError, UserRepository,
};
use crate::domain::{
    ConversationPreview, Friendship, FriendshipId, FriendshipStatus, GrammarReport, Message,
    NewMessage, User, UserId,
};

const CONVERSATION_PAGE: i64 = 50;

/// Friendships and grammar-corrected direct messages between students.
pub struct SocialService {
    users: Arc<dyn UserRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    messages: Arc<dyn MessageRepository>,
    grammar: Arc<GrammarService>,
}

impl SocialService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        friendships: Arc<dyn FriendshipRepository>,
        messages: Arc<dyn MessageRepository>,
        grammar: Arc<GrammarService>,
    ) -> Self {
        Self {
            users,
            friendships,
            messages,
            grammar,
        }
    }

    pub async fn list_students(&self, caller: &User) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.list_students(Some(caller.id)).await?)
    }

    pub async fn send_friend_request(
        &self,
        requester: &User,
        receiver_id: UserId,
    ) -> Result<Friendship, ServiceError> {
        if requester.id == receiver_id {
            return Err(ServiceError::bad_request(
                "You cannot send a friend request to yourself",
            ));
        }

        self.users
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let duplicate = || ServiceError::bad_request("A friend request already exists");

        if self
            .friendships
            .find_between(requester.id, receiver_id)
            .await?
            .is_some()
        {
            return Err(duplicate());
        }

        let friendship = self
            .friendships
            .create(requester.id, receiver_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => duplicate(),
                other => other.into(),
            })?;

        info!(
            friendship_id = %friendship.id,
            requester_id = %requester.id,
            receiver_id = %receiver_id,
            "Sent friend request"
        );
        Ok(friendship)
    }

    pub async fn pending_requests(&self, user: &User) -> Result<Vec<Friendship>, ServiceError> {
        Ok(self.friendships.list_pending_for(user.id).await?)
    }

    /// Only the receiver of a request may answer it.
    pub async fn answer_friend_request(
        &self,
        user: &User,
        id: FriendshipId,
        accept: bool,
    ) -> Result<Friendship, ServiceError> {
        let not_found = || ServiceError::bad_request("Friend request not found");

        let friendship = self.friendships.get(id).await?.ok_or_else(not_found)?;
        if friendship.receiver_id != user.id {
            return Err(not_found());
        }

        let status = if accept {
            FriendshipStatus::Accepted
        } else {
            FriendshipStatus::Rejected
        };

        let updated = self
            .friendships
            .update_status(id, status)
            .await?
            .ok_or_else(not_found)?;
        info!(friendship_id = %id, status = %status, "Answered friend request");
        Ok(updated)
    }

    pub async fn friends(&self, user: &User) -> Result<Vec<User>, ServiceError> {
        let accepted = self.friendships.list_accepted_for(user.id).await?;
        let mut friends = Vec::with_capacity(accepted.len());
        for friendship in accepted {
            if let Some(friend) = self
                .users
                .find_by_id(friendship.other_party(user.id))
                .await?
            {
                friends.push(friend);
            }
        }
        Ok(friends)
    }

    pub async fn send_message(
        &self,
        sender: &User,
        receiver_id: UserId,
        content: String,
    ) -> Result<Message, ServiceError> {
        if content.trim().is_empty() {
            return Err(ServiceError::bad_request("Message content must not be empty"));
        }

        self.users
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let report = self.grammar.check(&content).await;

        let message = self
            .messages
            .create(&NewMessage {
                sender_id: sender.id,
                receiver_id,
                corrected_content: report.corrected_if_changed(),
                content,
            })
            .await?;

        info!(
            message_id = %message.id,
            sender_id = %sender.id,
            receiver_id = %receiver_id,
            corrected = message.corrected_content.is_some(),
            "Sent message"
        );
        Ok(message)
    }

    /// One preview per conversation partner, most recent conversation first.
    pub async fn conversations(
        &self,
        user: &User,
    ) -> Result<Vec<ConversationPreview>, ServiceError> {
        let partners = self.messages.partners_of(user.id).await?;
        let mut previews = Vec::with_capacity(partners.len());

        for partner_id in partners {
            let Some(last_message) = self
                .messages
                .between(user.id, partner_id, 1)
                .await?
                .into_iter()
                .next()
            else {
                continue;
            };
            let Some(partner) = self.users.find_by_id(partner_id).await? else {
                continue;
            };
            let unread_count = self.messages.unread_count(user.id, partner_id).await?;

            previews.push(ConversationPreview {
                user: partner,
                last_message,
                unread_count,
            });
        }

        previews.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
        Ok(previews)
    }

    /// Marks the partner's messages as read and returns the latest page in
    /// chronological order.
    pub async fn conversation(
        &self,
        user: &User,
        other_id: UserId,
    ) -> Result<Vec<Message>, ServiceError> {
        let marked = self.messages.mark_read(user.id, other_id).await?;
        debug!(user_id = %user.id, other_id = %other_id, marked, "Marked messages as read");

        let mut messages = self
            .messages
            .between(user.id, other_id, CONVERSATION_PAGE)
            .await?;
        messages.reverse();
        Ok(messages)
    }

    pub async fn grammar_check(&self, text: &str) -> GrammarReport {
        self.grammar.check(text).await
    }
}
