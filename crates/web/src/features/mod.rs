use axum::Router;
use tower_http::normalize_path::NormalizePath;

use crate::state::AppState;

pub mod athletes;
pub mod categories;
pub mod training_centers;

/// All resource routes, mounted under their collection paths.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/categorias", categories::routes::routes())
        .nest("/centros_treinamento", training_centers::routes::routes())
        .nest("/atletas", athletes::routes::routes())
        .with_state(state)
}

/// Strips trailing slashes before routing, so `/categorias/` reaches the
/// `/categorias` collection.
pub fn normalize(router: Router) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use sqlx::{PgPool, postgres::PgPoolOptions};
    use storage::Database;
    use tower::ServiceExt;

    type App = NormalizePath<Router>;

    fn app(pool: PgPool) -> App {
        normalize(router(AppState::new(Database::from_pool(pool), 50)))
    }

    async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn offline_app() -> App {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://unused@localhost/unused")
            .unwrap();
        app(pool)
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_touching_the_store() {
        let app = offline_app();

        let (status, body) = send(&app, "GET", "/categorias/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("UUID"));

        let (status, body) = send(&app, "DELETE", "/atletas/123", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send(&app, "GET", "/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_query_is_unprocessable() {
        let app = offline_app();

        let (status, body) = send(&app, "GET", "/categorias?limit=abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send(&app, "GET", "/atletas?offset=-1", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_trailing_slash_reaches_the_collection() {
        let app = offline_app();

        let (status, body) = send(&app, "GET", "/centros_treinamento/?limit=abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send(&app, "GET", "/categorias/not-a-uuid/", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    async fn send_raw(app: &App, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_malformed_bodies_are_unprocessable(pool: PgPool) {
        let app = app(pool);

        let (status, body) = send_raw(&app, "POST", "/categorias", "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("nome"));

        let (status, body) = send_raw(&app, "POST", "/categorias", "{\"nome\": ").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send_raw(&app, "POST", "/atletas", r#"{"nome": "Joao", "idade": "x"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, page) = send(&app, "GET", "/categorias", None).await;
        assert_eq!(page["total"], 0);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_trailing_slash_collection_paths(pool: PgPool) {
        let app = app(pool);

        let (status, created) = send(&app, "POST", "/categorias/", Some(json!({"nome": "x"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, page) = send(&app, "GET", "/categorias/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["items"][0], created);

        let (status, page) = send(&app, "GET", "/categorias", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_category_scenario(pool: PgPool) {
        let app = app(pool);

        let (status, created) = send(&app, "POST", "/categorias", Some(json!({"nome": "corrida"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let (status, body) = send(&app, "POST", "/categorias", Some(json!({"nome": "corrida"}))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(body["detail"], "Category already registered with nome: corrida");

        let uri = format!("/categorias/{}", id);
        let (status, updated) = send(&app, "PATCH", &uri, Some(json!({"nome": "corrida2"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["nome"], "corrida2");
        assert_eq!(updated["id"], id.as_str());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], format!("Category not found with id: {}", id));

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_failed_rename_leaves_training_center_untouched(pool: PgPool) {
        let app = app(pool);
        let center = |name: &str| {
            json!({"nome": name, "endereco": "Rua X, Q02", "proprietario": "Marcos"})
        };

        send(&app, "POST", "/centros_treinamento", Some(center("CT King"))).await;
        let (_, queen) = send(&app, "POST", "/centros_treinamento", Some(center("CT Queen"))).await;
        let uri = format!("/centros_treinamento/{}", queen["id"].as_str().unwrap());

        let (status, _) = send(&app, "PATCH", &uri, Some(json!({"nome": "CT King"}))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _) = send(&app, "PATCH", &uri, Some(json!({"endereco": null}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, current) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current, queen);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_athlete_endpoints(pool: PgPool) {
        let app = app(pool);

        let (_, category) = send(&app, "POST", "/categorias", Some(json!({"nome": "Scale"}))).await;
        send(
            &app,
            "POST",
            "/centros_treinamento",
            Some(json!({"nome": "CT King", "endereco": "Rua X, Q02", "proprietario": "Marcos"})),
        )
        .await;

        let athlete = |cpf: &str, category: &str| {
            json!({
                "nome": "Joao",
                "cpf": cpf,
                "idade": 25,
                "peso": 75.5,
                "altura": 1.70,
                "sexo": "M",
                "categoria": {"nome": category},
                "centro_treinamento": {"nome": "CT King"}
            })
        };

        let (status, created) = send(&app, "POST", "/atletas", Some(athlete("12345678900", "Scale"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["categoria"]["id"], category["id"]);
        assert_eq!(created["centro_treinamento"]["nome"], "CT King");
        assert!(created.get("pk_id").is_none());

        let (status, _) = send(&app, "POST", "/atletas", Some(athlete("12345678900", "Scale"))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, body) = send(&app, "POST", "/atletas", Some(athlete("99999999999", "RX"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Category not found with name: RX");

        let (status, _) = send(&app, "POST", "/atletas", Some(athlete("123", "Scale"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let uri = format!("/atletas/{}", created["id"].as_str().unwrap());
        let (status, updated) = send(&app, "PATCH", &uri, Some(json!({"idade": 26}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["idade"], 26);
        let mut expected = created.clone();
        expected["idade"] = json!(26);
        assert_eq!(updated, expected);

        let (status, page) = send(&app, "GET", "/atletas?limit=1&offset=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
        assert_eq!(page["limit"], 1);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);

        let (_, page) = send(&app, "GET", "/atletas?cpf=00000000000", None).await;
        assert_eq!(page["total"], 0);

        let (status, _) = send(&app, "GET", "/atletas?limit=0", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let category_uri = format!("/categorias/{}", category["id"].as_str().unwrap());
        let (status, _) = send(&app, "DELETE", &category_uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &category_uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_pagination_window(pool: PgPool) {
        let app = app(pool);
        for n in 0..5 {
            send(&app, "POST", "/categorias", Some(json!({"nome": format!("cat-{}", n)}))).await;
        }

        let (_, page) = send(&app, "GET", "/categorias?limit=2&offset=4", None).await;
        assert_eq!(page["total"], 5);
        assert_eq!(page["offset"], 4);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);

        let (_, page) = send(&app, "GET", "/categorias", None).await;
        assert_eq!(page["limit"], 50);
        assert_eq!(page["items"].as_array().unwrap().len(), 5);
    }

    fn athlete_payload(cpf: &str) -> Value {
        json!({
            "nome": "Joao",
            "cpf": cpf,
            "idade": 25,
            "peso": 75.5,
            "altura": 1.70,
            "sexo": "M",
            "categoria": {"nome": "Scale"},
            "centro_treinamento": {"nome": "CT King"}
        })
    }

    async fn seed_references(app: &App) {
        send(app, "POST", "/categorias", Some(json!({"nome": "Scale"}))).await;
        send(
            app,
            "POST",
            "/centros_treinamento",
            Some(json!({"nome": "CT King", "endereco": "Rua X, Q02", "proprietario": "Marcos"})),
        )
        .await;
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_athlete_cpf_change_conflicts(pool: PgPool) {
        let app = app(pool);
        seed_references(&app).await;

        send(&app, "POST", "/atletas", Some(athlete_payload("11111111111"))).await;
        let (_, second) = send(&app, "POST", "/atletas", Some(athlete_payload("22222222222"))).await;
        let uri = format!("/atletas/{}", second["id"].as_str().unwrap());

        let (status, body) = send(&app, "PATCH", &uri, Some(json!({"cpf": "11111111111"}))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(body["detail"], "Athlete already registered with cpf: 11111111111");

        let (_, current) = send(&app, "GET", &uri, None).await;
        assert_eq!(current, second);
    }

    #[sqlx::test(migrator = "storage::MIGRATOR")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_athlete_reassign_to_unknown_reference_is_not_found(pool: PgPool) {
        let app = app(pool);
        seed_references(&app).await;

        let (_, created) = send(&app, "POST", "/atletas", Some(athlete_payload("12345678900"))).await;
        let uri = format!("/atletas/{}", created["id"].as_str().unwrap());

        let patch = json!({"idade": 40, "categoria": {"nome": "Ghost"}});
        let (status, body) = send(&app, "PATCH", &uri, Some(patch)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Category not found with name: Ghost");

        let (_, current) = send(&app, "GET", &uri, None).await;
        assert_eq!(current, created);
    }
}
