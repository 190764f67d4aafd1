//! In-memory repositories using a Tokio mutex, for tests and single-node demos.
//!
//! They enforce the same uniqueness rules as the PostgreSQL schema so
//! callers observe identical conflict behavior.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_entity::refresh_token::RefreshToken;
use library_entity::user::{CreateUser, LibraryMember, MembershipStatus, User, UserRole};

use super::refresh_token::RefreshTokenRepository;
use super::user::UserRepository;

#[derive(Debug, Default)]
struct UserState {
    next_id: i64,
    users: HashMap<i64, User>,
    members: HashMap<i64, LibraryMember>,
}

/// In-memory [`UserRepository`].
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    state: Arc<Mutex<UserState>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user together with its membership (`library_members_user_fk` cascades).
    pub async fn delete(&self, id: i64) -> bool {
        let mut state = self.state.lock().await;
        state.members.remove(&id);
        state.users.remove(&id).is_some()
    }

    /// Changes a user's role in place, as a direct administrative update would.
    pub async fn set_role(&self, id: i64, role: UserRole) -> bool {
        let mut state = self.state.lock().await;
        match state.users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let taken = state
            .users
            .values()
            .any(|u| u.username == data.username || u.email == data.email);
        if taken {
            return Err(AppError::conflict("Failed to create user: duplicate value"));
        }

        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_id,
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            library_member_id: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_member(&self, member_id: i64) -> AppResult<Option<LibraryMember>> {
        Ok(self.state.lock().await.members.get(&member_id).cloned())
    }

    async fn create_member(
        &self,
        user_id: i64,
        contact_information: &str,
    ) -> AppResult<LibraryMember> {
        let mut state = self.state.lock().await;
        if state.members.contains_key(&user_id) {
            return Err(AppError::conflict(
                "Failed to create library member: duplicate value",
            ));
        }
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::database("Failed to link library member: no such user"))?;
        user.library_member_id = Some(user_id);
        user.updated_at = Utc::now();

        let member = LibraryMember {
            id: user_id,
            contact_information: contact_information.to_string(),
            membership_status: MembershipStatus::Active,
            membership_period: Utc::now(),
        };
        state.members.insert(user_id, member.clone());
        Ok(member)
    }

    async fn set_member_status(
        &self,
        member_id: i64,
        status: MembershipStatus,
    ) -> AppResult<LibraryMember> {
        let mut state = self.state.lock().await;
        let member = state
            .members
            .get_mut(&member_id)
            .ok_or_else(|| AppError::database("Failed to update membership status: no row"))?;
        member.membership_status = status;
        Ok(member.clone())
    }
}

/// In-memory [`RefreshTokenRepository`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenRepository {
    tokens: Arc<Mutex<HashMap<Uuid, RefreshToken>>>,
}

impl MemoryRefreshTokenRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, live or expired.
    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }

    /// Whether no record has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.tokens.lock().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn insert(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.lock().await;
        if tokens.values().any(|t| t.token == token) {
            return Err(AppError::conflict(
                "Failed to create refresh token: duplicate value",
            ));
        }
        let now = Utc::now();
        let record = RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            expires_at,
            created_at: now,
            updated_at: now,
        };
        tokens.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_value(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.lock().await.get(&id).cloned())
    }

    async fn set_expiry(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().await;
        match tokens.get_mut(&id) {
            Some(record) => {
                record.expires_at = expires_at;
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use library_core::error::ErrorKind;

    fn new_user(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_user_create_and_lookup() {
        let repo = MemoryUserRepository::new();
        let alice = repo.create(&new_user("alice", "alice@x.com")).await.unwrap();
        let bob = repo.create(&new_user("bob", "bob@x.com")).await.unwrap();

        assert_ne!(alice.id, bob.id);
        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(repo.find_by_email("bob@x.com").await.unwrap().is_some());
        assert!(repo.find_by_username("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_is_conflict() {
        let repo = MemoryUserRepository::new();
        repo.create(&new_user("alice", "alice@x.com")).await.unwrap();

        let err = repo
            .create(&new_user("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_membership_lifecycle() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(&new_user("alice", "alice@x.com")).await.unwrap();

        let member = repo.create_member(user.id, "555-0100").await.unwrap();
        assert_eq!(member.membership_status, MembershipStatus::Active);
        let linked = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(linked.library_member_id, Some(member.id));

        let blocked = repo
            .set_member_status(member.id, MembershipStatus::Blocked)
            .await
            .unwrap();
        assert_eq!(blocked.membership_status, MembershipStatus::Blocked);
    }

    #[tokio::test]
    async fn test_set_role() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(&new_user("alice", "alice@x.com")).await.unwrap();

        assert!(repo.set_role(user.id, UserRole::Admin).await);
        let updated = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(updated.role, UserRole::Admin);
        assert!(!repo.set_role(999, UserRole::Admin).await);
    }

    #[tokio::test]
    async fn test_delete_cascades_membership() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(&new_user("alice", "alice@x.com")).await.unwrap();
        repo.create_member(user.id, "555-0100").await.unwrap();

        assert!(repo.delete(user.id).await);
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.find_member(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_token_value_is_unique() {
        let repo = MemoryRefreshTokenRepository::new();
        let expires = Utc::now() + Duration::days(1);
        repo.insert(1, "abc", expires).await.unwrap();

        let err = repo.insert(2, "abc", expires).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_expiry_on_missing_record() {
        let repo = MemoryRefreshTokenRepository::new();
        let updated = repo.set_expiry(Uuid::new_v4(), Utc::now()).await.unwrap();
        assert!(!updated);
    }
}
