//! Repository for the `clientes` table.

use comercio_core::types::DbId;
use sqlx::PgPool;

use crate::models::cliente::{Cliente, CreateCliente, UpdateCliente};

const COLUMNS: &str =
    "id, usuario_id, nombre, apellido, direccion, telefono, email, created_at";

/// Provides CRUD operations for clients.
pub struct ClienteRepo;

impl ClienteRepo {
    pub async fn create(pool: &PgPool, input: &CreateCliente) -> Result<Cliente, sqlx::Error> {
        let query = format!(
            "INSERT INTO clientes (usuario_id, nombre, apellido, direccion, telefono, email)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cliente>(&query)
            .bind(input.usuario_id)
            .bind(&input.nombre)
            .bind(&input.apellido)
            .bind(&input.direccion)
            .bind(&input.telefono)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cliente>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clientes WHERE id = $1");
        sqlx::query_as::<_, Cliente>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the client record linked to a login account, if any.
    pub async fn find_by_usuario_id(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Option<Cliente>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clientes WHERE usuario_id = $1");
        sqlx::query_as::<_, Cliente>(&query)
            .bind(usuario_id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients ordered by first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Cliente>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clientes ORDER BY nombre, apellido, id");
        sqlx::query_as::<_, Cliente>(&query).fetch_all(pool).await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCliente,
    ) -> Result<Option<Cliente>, sqlx::Error> {
        let query = format!(
            "UPDATE clientes SET
                usuario_id = COALESCE($2, usuario_id),
                nombre = COALESCE($3, nombre),
                apellido = COALESCE($4, apellido),
                direccion = COALESCE($5, direccion),
                telefono = COALESCE($6, telefono),
                email = COALESCE($7, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cliente>(&query)
            .bind(id)
            .bind(input.usuario_id)
            .bind(&input.nombre)
            .bind(&input.apellido)
            .bind(&input.direccion)
            .bind(&input.telefono)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client. Their orders survive with `cliente_id` nulled.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
