use sqlx::PgConnection;
use storage::{
    dto::athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest},
    error::{Entity, Result, StorageError},
    models::Athlete,
    repository::AthleteRepository,
};
use uuid::Uuid;

/// List athletes matching the filter
pub async fn list_athletes(conn: &mut PgConnection, filter: &AthleteFilter) -> Result<Vec<Athlete>> {
    AthleteRepository::new(conn).list(filter).await
}

/// Get athlete by external id
pub async fn get_athlete(conn: &mut PgConnection, id: Uuid) -> Result<Athlete> {
    AthleteRepository::new(conn)
        .find_by_external_id(id)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::Athlete, id))
}

/// Create a new athlete
pub async fn create_athlete(conn: &mut PgConnection, request: &CreateAthleteRequest) -> Result<Athlete> {
    let athlete = AthleteRepository::new(conn).create(request).await?;
    tracing::info!(id = %athlete.external_id, "Athlete created");
    Ok(athlete)
}

/// Update an athlete
pub async fn update_athlete(
    conn: &mut PgConnection,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let athlete = AthleteRepository::new(conn)
        .update(id, request)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::Athlete, id))?;
    tracing::info!(id = %id, "Athlete updated");
    Ok(athlete)
}

/// Delete an athlete
pub async fn delete_athlete(conn: &mut PgConnection, id: Uuid) -> Result<()> {
    if !AthleteRepository::new(conn).delete(id).await? {
        return Err(StorageError::not_found(Entity::Athlete, id));
    }
    tracing::info!(id = %id, "Athlete deleted");
    Ok(())
}
