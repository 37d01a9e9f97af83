use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{Entity, Result, StorageError};
use crate::models::Category;

/// Repository for `categorias`, bound to the connection of the current session
pub struct CategoryRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List all categories in the store's natural order
    pub async fn list(&mut self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name
            FROM categorias
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_external_id(&mut self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name
            FROM categorias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(category)
    }

    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name
            FROM categorias
            WHERE nome = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(category)
    }

    /// Create a new category with a freshly generated external id
    pub async fn create(&mut self, req: &CreateCategoryRequest) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categorias (nome, id)
            VALUES ($1, $2)
            RETURNING pk_id, id AS external_id, nome AS name
            "#,
        )
        .bind(&req.name)
        .bind(Uuid::new_v4())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(Entity::Category, "nome", &req.name))?;

        Ok(category)
    }

    /// Apply a partial update. Returns `None` when no category has this id.
    pub async fn update(
        &mut self,
        id: Uuid,
        req: &UpdateCategoryRequest,
    ) -> Result<Option<Category>> {
        let Some(existing) = self.lock(id).await? else {
            return Ok(None);
        };
        let merged = req.apply_to(&existing)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categorias
            SET nome = $2
            WHERE pk_id = $1
            RETURNING pk_id, id AS external_id, nome AS name
            "#,
        )
        .bind(merged.pk_id)
        .bind(&merged.name)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(Entity::Category, "nome", &merged.name)
        })?;

        Ok(Some(category))
    }

    /// Delete by external id. Returns `false` when nothing matched.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key_violation(Entity::Category, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn lock(&mut self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name
            FROM categorias
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(category)
    }
}
