//! Authenticated identity of the current user.
//!
//! The session is an explicit value handed to whatever needs it (the API
//! client, the CLI) instead of process-wide state. Listeners subscribe to a
//! `watch` channel and unsubscribe by dropping their receiver.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    /// Bearer token for the backend.
    #[serde(skip_serializing)]
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct SessionService {
    sender: Arc<watch::Sender<Option<Identity>>>,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    /// Signed-out session.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Session restored from CLASSDESK_TOKEN and CLASSDESK_USER_ID
    /// (optionally CLASSDESK_USER_NAME, CLASSDESK_ROLE). Signed out when either
    /// required variable is missing.
    pub fn from_env() -> Self {
        let session = Self::new();
        let token = std::env::var("CLASSDESK_TOKEN").ok().filter(|s| !s.is_empty());
        let user_id = std::env::var("CLASSDESK_USER_ID").ok().filter(|s| !s.is_empty());

        if let (Some(token), Some(user_id)) = (token, user_id) {
            let role = match std::env::var("CLASSDESK_ROLE").as_deref() {
                Ok("teacher") => Role::Teacher,
                _ => Role::Student,
            };
            session.init(Identity {
                name: std::env::var("CLASSDESK_USER_NAME").unwrap_or_else(|_| user_id.clone()),
                user_id,
                role,
                token,
            });
        }
        session
    }

    pub fn init(&self, identity: Identity) {
        tracing::debug!(user_id = %identity.user_id, "Session initialized");
        self.sender.send_replace(Some(identity));
    }

    pub fn clear(&self) {
        if self.sender.send_replace(None).is_some() {
            tracing::debug!("Session cleared");
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Identity {
        Identity {
            user_id: "u1".to_string(),
            name: "Ada".to_string(),
            role: Role::Teacher,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_init_and_clear() {
        let session = SessionService::new();
        assert!(!session.is_authenticated());

        session.init(teacher());
        assert_eq!(session.current().map(|i| i.user_id), Some("u1".to_string()));

        session.clear();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionService::new();
        let other = session.clone();
        session.init(teacher());
        assert!(other.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let session = SessionService::new();
        let mut rx = session.subscribe();

        session.init(teacher());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|i| i.role), Some(Role::Teacher));

        session.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_token_not_serialized() {
        let json = serde_json::to_value(teacher()).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["role"], "teacher");
    }
}
