use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::training_center::{CreateTrainingCenterRequest, UpdateTrainingCenterRequest};
use crate::error::{Entity, Result, StorageError};
use crate::models::TrainingCenter;

pub struct TrainingCenterRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&mut self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name,
                   endereco AS address, proprietario AS owner
            FROM centros_treinamento
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_external_id(&mut self, id: Uuid) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name,
                   endereco AS address, proprietario AS owner
            FROM centros_treinamento
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(center)
    }

    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name,
                   endereco AS address, proprietario AS owner
            FROM centros_treinamento
            WHERE nome = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(center)
    }

    pub async fn create(&mut self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO centros_treinamento (nome, endereco, proprietario, id)
            VALUES ($1, $2, $3, $4)
            RETURNING pk_id, id AS external_id, nome AS name,
                      endereco AS address, proprietario AS owner
            "#,
        )
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.owner)
        .bind(Uuid::new_v4())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(Entity::TrainingCenter, "nome", &req.name)
        })?;

        Ok(center)
    }

    /// Apply a partial update. Returns `None` when no training center has this id.
    pub async fn update(
        &mut self,
        id: Uuid,
        req: &UpdateTrainingCenterRequest,
    ) -> Result<Option<TrainingCenter>> {
        let Some(existing) = self.lock(id).await? else {
            return Ok(None);
        };
        let merged = req.apply_to(&existing)?;

        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            UPDATE centros_treinamento
            SET nome = $2,
                endereco = $3,
                proprietario = $4
            WHERE pk_id = $1
            RETURNING pk_id, id AS external_id, nome AS name,
                      endereco AS address, proprietario AS owner
            "#,
        )
        .bind(merged.pk_id)
        .bind(&merged.name)
        .bind(&merged.address)
        .bind(&merged.owner)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(Entity::TrainingCenter, "nome", &merged.name)
        })?;

        Ok(Some(center))
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM centros_treinamento WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| {
                StorageError::from(e).on_foreign_key_violation(Entity::TrainingCenter, id)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn lock(&mut self, id: Uuid) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id AS external_id, nome AS name,
                   endereco AS address, proprietario AS owner
            FROM centros_treinamento
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(center)
    }
}
