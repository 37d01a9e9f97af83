use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::PgConnection;
use storage::{Database, Session};

use crate::error::{WebError, WebResult};

/// The request's transaction, begun before the handler runs.
///
/// Handlers call [`DbSession::commit`] once the response is ready. Every other
/// exit, an early `?` included, drops the session and rolls back.
pub struct DbSession(Session);

impl DbSession {
    pub fn conn(&mut self) -> &mut PgConnection {
        self.0.conn()
    }

    pub async fn commit(self) -> WebResult<()> {
        self.0.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let db = Database::from_ref(state);
        Ok(Self(db.begin().await?))
    }
}
