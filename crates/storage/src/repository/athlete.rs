use chrono::Utc;
use sqlx::{PgConnection, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest};
use crate::dto::patch::Patch;
use crate::error::{Entity, Lookup, Result, StorageError};
use crate::models::Athlete;
use crate::repository::{CategoryRepository, TrainingCenterRepository};

// Athlete row joined with the name and external id of what it references.
macro_rules! athlete_select {
    () => {
        r#"
        SELECT a.pk_id, a.id AS external_id, a.nome AS name, a.cpf,
               a.idade AS age, a.peso AS weight, a.altura AS height,
               a.sexo AS sex, a.created_at,
               c.pk_id AS category_pk_id, c.id AS category_external_id,
               c.nome AS category_name,
               ct.pk_id AS training_center_pk_id, ct.id AS training_center_external_id,
               ct.nome AS training_center_name
        FROM atletas a
        JOIN categorias c ON c.pk_id = a.categoria_id
        JOIN centros_treinamento ct ON ct.pk_id = a.centro_treinamento_id
        "#
    };
}

pub struct AthleteRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List athletes matching `filter`, in the store's natural order
    pub async fn list(&mut self, filter: &AthleteFilter) -> Result<Vec<Athlete>> {
        let mut query = QueryBuilder::new(athlete_select!());
        query.push(" WHERE 1=1");

        if let Some(ref name) = filter.nome {
            query.push(" AND a.nome = ");
            query.push_bind(name);
        }

        if let Some(ref cpf) = filter.cpf {
            query.push(" AND a.cpf = ");
            query.push_bind(cpf);
        }

        let athletes = query
            .build_query_as::<Athlete>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(athletes)
    }

    pub async fn find_by_external_id(&mut self, id: Uuid) -> Result<Option<Athlete>> {
        let athlete = sqlx::query_as::<_, Athlete>(concat!(athlete_select!(), "WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(athlete)
    }

    /// Create a new athlete. The category and training center named in the
    /// request must already exist.
    pub async fn create(&mut self, req: &CreateAthleteRequest) -> Result<Athlete> {
        let category_pk_id = self.resolve_category(&req.category.name).await?;
        let training_center_pk_id = self
            .resolve_training_center(&req.training_center.name)
            .await?;

        let pk_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO atletas (
                nome, cpf, idade, peso, altura, sexo, created_at,
                categoria_id, centro_treinamento_id, id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING pk_id
            "#,
        )
        .bind(&req.name)
        .bind(&req.cpf)
        .bind(req.age)
        .bind(req.weight)
        .bind(req.height)
        .bind(&req.sex)
        .bind(Utc::now().naive_utc())
        .bind(category_pk_id)
        .bind(training_center_pk_id)
        .bind(Uuid::new_v4())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(Entity::Athlete, "cpf", &req.cpf))?;

        self.fetch_by_pk(pk_id).await
    }

    /// Apply a partial update. Returns `None` when no athlete has this id.
    pub async fn update(
        &mut self,
        id: Uuid,
        req: &UpdateAthleteRequest,
    ) -> Result<Option<Athlete>> {
        let Some(existing) = self.lock(id).await? else {
            return Ok(None);
        };
        let merged = req.apply_to(&existing)?;

        let category_pk_id = match &req.category {
            Patch::Absent => merged.category_pk_id,
            Patch::Null => return Err(StorageError::NullField("categoria")),
            Patch::Value(category) => self.resolve_category(&category.name).await?,
        };
        let training_center_pk_id = match &req.training_center {
            Patch::Absent => merged.training_center_pk_id,
            Patch::Null => return Err(StorageError::NullField("centro_treinamento")),
            Patch::Value(center) => self.resolve_training_center(&center.name).await?,
        };

        sqlx::query(
            r#"
            UPDATE atletas
            SET nome = $2,
                cpf = $3,
                idade = $4,
                peso = $5,
                altura = $6,
                sexo = $7,
                categoria_id = $8,
                centro_treinamento_id = $9
            WHERE pk_id = $1
            "#,
        )
        .bind(merged.pk_id)
        .bind(&merged.name)
        .bind(&merged.cpf)
        .bind(merged.age)
        .bind(merged.weight)
        .bind(merged.height)
        .bind(&merged.sex)
        .bind(category_pk_id)
        .bind(training_center_pk_id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(Entity::Athlete, "cpf", &merged.cpf)
        })?;

        self.fetch_by_pk(merged.pk_id).await.map(Some)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM atletas WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_by_pk(&mut self, pk_id: i32) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(concat!(athlete_select!(), "WHERE a.pk_id = $1"))
            .bind(pk_id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(athlete)
    }

    async fn lock(&mut self, id: Uuid) -> Result<Option<Athlete>> {
        let athlete = sqlx::query_as::<_, Athlete>(concat!(
            athlete_select!(),
            "WHERE a.id = $1 FOR UPDATE OF a"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(athlete)
    }

    async fn resolve_category(&mut self, name: &str) -> Result<i32> {
        CategoryRepository::new(&mut *self.conn)
            .find_by_name(name)
            .await?
            .map(|category| category.pk_id)
            .ok_or_else(|| StorageError::NotFound {
                entity: Entity::Category,
                lookup: Lookup::Name(name.to_string()),
            })
    }

    async fn resolve_training_center(&mut self, name: &str) -> Result<i32> {
        TrainingCenterRepository::new(&mut *self.conn)
            .find_by_name(name)
            .await?
            .map(|center| center.pk_id)
            .ok_or_else(|| StorageError::NotFound {
                entity: Entity::TrainingCenter,
                lookup: Lookup::Name(name.to_string()),
            })
    }
}
