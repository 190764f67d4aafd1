//! Library membership administration.

use std::sync::Arc;

use tracing::info;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::repositories::UserRepository;
use library_entity::user::{LibraryMember, MembershipStatus, User};

/// Activates and blocks library memberships.
#[derive(Debug, Clone)]
pub struct MembershipService {
    user_repo: Arc<dyn UserRepository>,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Activates a user's membership, creating it if the user has none.
    ///
    /// Contact information is only required when a membership is created.
    pub async fn activate(
        &self,
        user_id: i64,
        contact_information: Option<&str>,
    ) -> AppResult<MembershipStatus> {
        let user = self.load_user(user_id).await?;

        let Some(member) = self.load_member(&user).await? else {
            let contact = contact_information
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    AppError::validation(
                        "Contact information must be provided for a new library member.",
                    )
                })?;
            let member = self.user_repo.create_member(user.id, contact).await?;
            info!(user_id, "Library membership created");
            return Ok(member.membership_status);
        };

        match member.membership_status {
            MembershipStatus::Active => Ok(MembershipStatus::Active),
            MembershipStatus::Blocked => {
                let member = self
                    .user_repo
                    .set_member_status(member.id, MembershipStatus::Active)
                    .await?;
                info!(user_id, "Library membership reactivated");
                Ok(member.membership_status)
            }
        }
    }

    /// Blocks an existing membership.
    pub async fn block(&self, user_id: i64) -> AppResult<MembershipStatus> {
        let user = self.load_user(user_id).await?;
        let member = self
            .load_member(&user)
            .await?
            .ok_or_else(|| AppError::validation("User is not a library member."))?;

        match member.membership_status {
            MembershipStatus::Blocked => Ok(MembershipStatus::Blocked),
            MembershipStatus::Active => {
                let member = self
                    .user_repo
                    .set_member_status(member.id, MembershipStatus::Blocked)
                    .await?;
                info!(user_id, "Library membership blocked");
                Ok(member.membership_status)
            }
        }
    }

    async fn load_user(&self, user_id: i64) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    async fn load_member(&self, user: &User) -> AppResult<Option<LibraryMember>> {
        match user.library_member_id {
            Some(member_id) => self.user_repo.find_member(member_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::error::ErrorKind;
    use library_database::MemoryUserRepository;
    use library_entity::user::{CreateUser, UserRole};

    async fn setup() -> (MembershipService, i64) {
        let repo = MemoryUserRepository::new();
        let user = repo
            .create(&CreateUser {
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        (MembershipService::new(Arc::new(repo)), user.id)
    }

    #[tokio::test]
    async fn test_activate_requires_contact_for_new_member() {
        let (service, user_id) = setup().await;
        let err = service.activate(user_id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let status = service.activate(user_id, Some("555-0100")).await.unwrap();
        assert_eq!(status, MembershipStatus::Active);
    }

    #[tokio::test]
    async fn test_block_then_reactivate() {
        let (service, user_id) = setup().await;
        service.activate(user_id, Some("555-0100")).await.unwrap();

        assert_eq!(
            service.block(user_id).await.unwrap(),
            MembershipStatus::Blocked
        );
        assert_eq!(
            service.activate(user_id, None).await.unwrap(),
            MembershipStatus::Active
        );
    }

    #[tokio::test]
    async fn test_block_non_member() {
        let (service, user_id) = setup().await;
        let err = service.block(user_id).await.unwrap_err();
        assert_eq!(err.message, "User is not a library member.");
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (service, _) = setup().await;
        let err = service.activate(999, Some("x")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "User not found.");
    }
}
