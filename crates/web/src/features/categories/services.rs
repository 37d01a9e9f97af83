use sqlx::PgConnection;
use storage::{
    dto::category::{CreateCategoryRequest, UpdateCategoryRequest},
    error::{Entity, Result, StorageError},
    models::Category,
    repository::CategoryRepository,
};
use uuid::Uuid;

/// List all categories
pub async fn list_categories(conn: &mut PgConnection) -> Result<Vec<Category>> {
    CategoryRepository::new(conn).list().await
}

/// Get category by external id
pub async fn get_category(conn: &mut PgConnection, id: Uuid) -> Result<Category> {
    CategoryRepository::new(conn)
        .find_by_external_id(id)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::Category, id))
}

/// Create a new category
pub async fn create_category(
    conn: &mut PgConnection,
    request: &CreateCategoryRequest,
) -> Result<Category> {
    let category = CategoryRepository::new(conn).create(request).await?;
    tracing::info!(id = %category.external_id, name = %category.name, "Category created");
    Ok(category)
}

/// Update a category
pub async fn update_category(
    conn: &mut PgConnection,
    id: Uuid,
    request: &UpdateCategoryRequest,
) -> Result<Category> {
    let category = CategoryRepository::new(conn)
        .update(id, request)
        .await?
        .ok_or_else(|| StorageError::not_found(Entity::Category, id))?;
    tracing::info!(id = %id, "Category updated");
    Ok(category)
}

/// Delete a category
pub async fn delete_category(conn: &mut PgConnection, id: Uuid) -> Result<()> {
    if !CategoryRepository::new(conn).delete(id).await? {
        return Err(StorageError::not_found(Entity::Category, id));
    }
    tracing::info!(id = %id, "Category deleted");
    Ok(())
}
