use sqlx::PgConnection;
use storage::{
    dto::training_center::{CreateTrainingCenterRequest, UpdateTrainingCenterRequest},
    error::{Entity, Result, StorageError},
    models::TrainingCenter,
    repository::TrainingCenterRepository,
};
use uuid::Uuid;

/// List all training centers
pub async fn list_training_centers(conn: &mut PgConnection) -> Result<Vec<TrainingCenter>> {
    TrainingCenterRepository::new(conn).list().await
}

/// Get training center by external id
pub async fn get_training_center(conn: &mut PgConnection, id: Uuid) -> Result<TrainingCenter> {
    TrainingCenterRepository::new(conn)
        .find_by_external_id(id)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::TrainingCenter, id))
}

/// Create a new training center
pub async fn create_training_center(
    conn: &mut PgConnection,
    request: &CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let center = TrainingCenterRepository::new(conn).create(request).await?;
    tracing::info!(id = %center.external_id, name = %center.name, "Training center created");
    Ok(center)
}

/// Update a training center
pub async fn update_training_center(
    conn: &mut PgConnection,
    id: Uuid,
    request: &UpdateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let center = TrainingCenterRepository::new(conn)
        .update(id, request)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::TrainingCenter, id))?;
    tracing::info!(id = %id, "Training center updated");
    Ok(center)
}

/// Delete a training center
pub async fn delete_training_center(conn: &mut PgConnection, id: Uuid) -> Result<()> {
    if !TrainingCenterRepository::new(conn).delete(id).await? {
        return Err(StorageError::not_found(Entity::TrainingCenter, id));
    }
    tracing::info!(id = %id, "Training center deleted");
    Ok(())
}
