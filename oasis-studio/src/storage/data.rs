use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use oasis_core::SavedWorkout;
use serde::{Deserialize, Serialize};

/// The type used to identify records.
pub type RecordId = String;

/// An oasis account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: RecordId,
    /// The display name
    pub name: String,
    pub username: String,
    /// PHC string of the salted password hash.
    /// Empty for accounts that never had a password, those cannot log in.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Most recent first
    #[serde(default)]
    pub saved_workouts: Vec<SavedWorkout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Login session as it is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub user_id: RecordId,
    pub expires_at: DateTime<Utc>,
}

/// Login session data for authentication
#[derive(Debug, Clone)]
pub struct SessionData {
    /// The session token, or key if you will
    pub token: String,
    /// The user that is logged in
    pub user: UserData,
    pub expires_at: DateTime<Utc>,
}

/// Who wrote a post or comment, as they were at the time of writing.
/// Renaming a user does not change their existing snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A post in the studio feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: RecordId,
    #[serde(default = "BlogPost::untitled")]
    pub title: String,
    #[serde(default = "BlogPost::uncategorized")]
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    /// Ids of the users who liked this post
    #[serde(default)]
    pub liked_by: BTreeSet<RecordId>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default = "AuthorSnapshot::studio")]
    pub author: AuthorSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: RecordId,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default = "AuthorSnapshot::studio")]
    pub author: AuthorSnapshot,
}

impl BlogPost {
    fn untitled() -> String {
        "Sem título".to_string()
    }

    fn uncategorized() -> String {
        "Novidades".to_string()
    }
}

impl AuthorSnapshot {
    /// The studio itself, used for content that predates authors
    pub fn studio() -> Self {
        Self {
            id: "admin".to_string(),
            name: "Oasis CT".to_string(),
            is_admin: true,
            avatar: None,
        }
    }
}

impl From<&UserData> for AuthorSnapshot {
    fn from(user: &UserData) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            is_admin: user.is_admin,
            avatar: user.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn legacy_posts_get_defaults() {
        let json = r#"[{
            "id": "1",
            "content": "Estamos muito animados com o progresso das obras da nova piscina!",
            "date": "2024-03-10T14:30:00.000Z",
            "likes": 24
        }]"#;

        let posts: Vec<BlogPost> = serde_json::from_str(json).unwrap();
        let post = &posts[0];

        assert_eq!(post.title, "Sem título");
        assert_eq!(post.category, "Novidades");
        assert!(post.liked_by.is_empty());
        assert!(post.comments.is_empty());
        assert_eq!(post.author, AuthorSnapshot::studio());
    }

    #[test]
    fn liked_by_is_a_set() {
        let json = r#"{ "id": "2", "content": "Oi", "likedBy": ["a", "b", "a"] }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();

        assert_eq!(post.liked_by.len(), 2);
    }
}
