//! Repository for the `usuarios` table.

use comercio_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::usuario::{CreateUsuario, UpdateUsuario, Usuario};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, rol, first_name, last_name, \
                        is_active, last_login_at, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UsuarioRepo;

impl UsuarioRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUsuario) -> Result<Usuario, sqlx::Error> {
        let query = format!(
            "INSERT INTO usuarios (username, email, password_hash, rol, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.rol)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE id = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the account a login identifier refers to.
    ///
    /// The identifier matches either the username or the email, ignoring
    /// case. If it matches one account's username and another's email, the
    /// username match wins.
    pub async fn find_by_login(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM usuarios
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)
             ORDER BY (LOWER(username) = LOWER($1)) DESC, id
             LIMIT 1"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios ORDER BY username");
        sqlx::query_as::<_, Usuario>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateUsuario,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!(
            "UPDATE usuarios SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                rol = COALESCE($4, rol),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.rol)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.is_active)
            .fetch_optional(executor)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE usuarios SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE usuarios SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a user. A linked client record is kept and unlinked.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
