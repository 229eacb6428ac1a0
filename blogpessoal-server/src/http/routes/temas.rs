//! Tema endpoints
//!
//! Base path /temas. Same controller shape as /postagens, minus the
//! referential check; deleting a tema also deletes its postagens.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Tema, TemaRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::TemaPayload;

/// Tema response
#[derive(Serialize)]
pub struct TemaResponse {
    pub id: i64,
    pub descricao: String,
}

impl From<Tema> for TemaResponse {
    fn from(t: Tema) -> Self {
        Self {
            id: t.id,
            descricao: t.descricao,
        }
    }
}

/// GET /temas - list all temas
async fn list_temas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemaResponse>>, ApiError> {
    let temas = TemaRepo::new(&state.pool).list().await?;
    Ok(Json(temas.into_iter().map(TemaResponse::from).collect()))
}

/// GET /temas/{id} - get a single tema
async fn get_tema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TemaResponse>, ApiError> {
    let tema = TemaRepo::new(&state.pool).get(id).await?;
    Ok(Json(tema.into()))
}

/// GET /temas/descricao/{descricao} - case-insensitive substring search
async fn search_temas(
    State(state): State<Arc<AppState>>,
    Path(descricao): Path<String>,
) -> Result<Json<Vec<TemaResponse>>, ApiError> {
    let temas = TemaRepo::new(&state.pool)
        .search_by_descricao(&descricao)
        .await?;
    Ok(Json(temas.into_iter().map(TemaResponse::from).collect()))
}

/// POST /temas - create a new tema
async fn create_tema(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TemaPayload>,
) -> Result<(StatusCode, Json<TemaResponse>), ApiError> {
    let descricao = payload.validate()?;
    let tema = TemaRepo::new(&state.pool).create(&descricao).await?;
    Ok((StatusCode::CREATED, Json(tema.into())))
}

/// PUT /temas - replace the descricao of an existing tema
async fn update_tema(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TemaPayload>,
) -> Result<Json<TemaResponse>, ApiError> {
    let descricao = payload.validate()?;

    // Ids start at 1; a payload without an id can never match a row.
    let id = payload.id.unwrap_or(0);
    let tema = TemaRepo::new(&state.pool).update(id, &descricao).await?;
    Ok(Json(tema.into()))
}

/// DELETE /temas/{id} - delete a tema and its postagens
async fn delete_tema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    TemaRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tema routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/temas", get(list_temas).post(create_tema).put(update_tema))
        .route("/temas/{id}", get(get_tema).delete(delete_tema))
        .route("/temas/descricao/{descricao}", get(search_temas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::http::server::build_router;
    use crate::models::tema::MSG_DESCRICAO_OBRIGATORIA;

    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unreachable")
            .expect("lazy pool");
        build_router(AppState { pool })
    }

    #[tokio::test]
    async fn create_without_descricao_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/temas")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"id":null}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["violations"][0]["field"], "descricao");
        assert_eq!(json["violations"][0]["message"], MSG_DESCRICAO_OBRIGATORIA);
    }

    #[test]
    fn response_serializes_wire_shape() {
        let tema = Tema {
            id: 3,
            descricao: "tecnologia".to_owned(),
        };
        let json = serde_json::to_value(TemaResponse::from(tema)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["descricao"], "tecnologia");
    }
}
