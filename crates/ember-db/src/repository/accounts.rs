//! Account/role repository — the PostgreSQL [`RoleStore`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use ember_common::error::AdminError;
use ember_common::models::{Account, AccountWithRoles};
use ember_moderation::store::RoleStore;
use sqlx::PgPool;
use uuid::Uuid;

/// [`RoleStore`] backed by the `users`, `roles`, and `user_roles` tables.
#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_account(&self, username: &str) -> Result<Option<Account>, AdminError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, created_at FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn roles_of(&self, account_id: Uuid) -> Result<BTreeSet<String>, AdminError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(names.into_iter().collect())
    }

    /// Grant roles in one transaction. Unknown role names fail the whole
    /// step before any row is written; conflicts with roles already held
    /// are ignored (idempotent re-grant).
    async fn add_roles(
        &self,
        account_id: Uuid,
        roles: &BTreeSet<String>,
    ) -> Result<(), AdminError> {
        if roles.is_empty() {
            return Ok(());
        }

        let wanted: Vec<String> = roles.iter().cloned().collect();
        let mut tx = self.pool.begin().await?;

        let resolved: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM roles WHERE name = ANY($1)")
                .bind(&wanted)
                .fetch_all(&mut *tx)
                .await?;

        if resolved.len() != wanted.len() {
            return Err(AdminError::Validation {
                message: format!("Unknown role name in {wanted:?}"),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(account_id)
        .bind(&resolved)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Revoke roles in a single statement; names the account does not hold
    /// simply match no rows.
    async fn remove_roles(
        &self,
        account_id: Uuid,
        roles: &BTreeSet<String>,
    ) -> Result<(), AdminError> {
        if roles.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = roles.iter().cloned().collect();
        sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE user_id = $1
              AND role_id IN (SELECT id FROM roles WHERE name = ANY($2))
            "#,
        )
        .bind(account_id)
        .bind(&names)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_accounts_with_roles(&self) -> Result<Vec<AccountWithRoles>, AdminError> {
        let listing = sqlx::query_as::<_, AccountWithRoles>(
            r#"
            SELECT
                u.id,
                u.username,
                COALESCE(
                    array_agg(r.name ORDER BY r.name) FILTER (WHERE r.name IS NOT NULL),
                    '{}'
                ) AS roles
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            GROUP BY u.id, u.username
            ORDER BY u.username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(listing)
    }
}
