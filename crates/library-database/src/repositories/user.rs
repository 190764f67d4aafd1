//! User and library membership repository.

use async_trait::async_trait;
use sqlx::PgPool;

use library_core::result::AppResult;
use library_entity::user::{CreateUser, LibraryMember, MembershipStatus, User};

use super::map_db_error;

/// Storage of principals and their library memberships.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Duplicate username or email yields a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find the membership record with the given id.
    async fn find_member(&self, member_id: i64) -> AppResult<Option<LibraryMember>>;

    /// Create an ACTIVE membership for a user and link it to the user row.
    async fn create_member(&self, user_id: i64, contact_information: &str)
    -> AppResult<LibraryMember>;

    /// Change the status of an existing membership.
    async fn set_member_status(
        &self,
        member_id: i64,
        status: MembershipStatus,
    ) -> AppResult<LibraryMember>;
}

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find user by id"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find user by username"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find user by email"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, email, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create user"))
    }

    async fn find_member(&self, member_id: i64) -> AppResult<Option<LibraryMember>> {
        sqlx::query_as::<_, LibraryMember>("SELECT * FROM library_members WHERE id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find library member"))
    }

    async fn create_member(
        &self,
        user_id: i64,
        contact_information: &str,
    ) -> AppResult<LibraryMember> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error(e, "Failed to begin transaction"))?;

        let member = sqlx::query_as::<_, LibraryMember>(
            r#"INSERT INTO library_members (id, contact_information, membership_status)
               VALUES ($1, $2, 'ACTIVE')
               RETURNING *"#,
        )
        .bind(user_id)
        .bind(contact_information)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "Failed to create library member"))?;

        sqlx::query("UPDATE users SET library_member_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(member.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "Failed to link library member"))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error(e, "Failed to commit library member"))?;

        Ok(member)
    }

    async fn set_member_status(
        &self,
        member_id: i64,
        status: MembershipStatus,
    ) -> AppResult<LibraryMember> {
        sqlx::query_as::<_, LibraryMember>(
            "UPDATE library_members SET membership_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(member_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update membership status"))
    }
}
