//! Postagem endpoints
//!
//! Base path /postagens. Field validation runs before any store access;
//! writes additionally require the referenced tema to exist.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Postagem, PostagemRepo, TemaRepo, Usuario};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::PostagemPayload;

/// Postagem response; `data` is serialized as RFC 3339
#[derive(Serialize)]
pub struct PostagemResponse {
    pub id: i64,
    pub titulo: String,
    pub texto: String,
    pub data: String,
    pub tema: TemaEmbed,
    pub usuario: Option<UsuarioEmbed>,
}

/// Tema as embedded in a postagem response
#[derive(Serialize)]
pub struct TemaEmbed {
    pub id: i64,
    pub descricao: String,
}

/// Usuario as embedded in a postagem response
#[derive(Serialize)]
pub struct UsuarioEmbed {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub foto: Option<String>,
}

impl From<Postagem> for PostagemResponse {
    fn from(p: Postagem) -> Self {
        Self {
            id: p.id,
            titulo: p.titulo,
            texto: p.texto,
            data: p.data.to_rfc3339(),
            tema: TemaEmbed {
                id: p.tema.id,
                descricao: p.tema.descricao,
            },
            usuario: p.usuario.map(UsuarioEmbed::from),
        }
    }
}

impl From<Usuario> for UsuarioEmbed {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            usuario: u.usuario,
            foto: u.foto,
        }
    }
}

/// GET /postagens - list all postagens
async fn list_postagens(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostagemResponse>>, ApiError> {
    let postagens = PostagemRepo::new(&state.pool).list().await?;
    Ok(Json(postagens.into_iter().map(PostagemResponse::from).collect()))
}

/// GET /postagens/{id} - get a single postagem
async fn get_postagem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostagemResponse>, ApiError> {
    let postagem = PostagemRepo::new(&state.pool).get(id).await?;
    Ok(Json(postagem.into()))
}

/// GET /postagens/titulo/{titulo} - case-insensitive substring search
async fn search_postagens(
    State(state): State<Arc<AppState>>,
    Path(titulo): Path<String>,
) -> Result<Json<Vec<PostagemResponse>>, ApiError> {
    let postagens = PostagemRepo::new(&state.pool)
        .search_by_titulo(&titulo)
        .await?;
    Ok(Json(postagens.into_iter().map(PostagemResponse::from).collect()))
}

/// POST /postagens - create a new postagem
async fn create_postagem(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PostagemPayload>,
) -> Result<(StatusCode, Json<PostagemResponse>), ApiError> {
    let nova = payload.validate()?;

    // The existence check and the insert are separate statements; a tema
    // deleted in between surfaces as a store error, not a silent orphan.
    if !TemaRepo::new(&state.pool).exists(nova.tema_id).await? {
        return Err(ApiError::TemaInexistente);
    }

    let postagem = PostagemRepo::new(&state.pool).create(&nova).await?;
    Ok((StatusCode::CREATED, Json(postagem.into())))
}

/// PUT /postagens - full replacement of an existing postagem
async fn update_postagem(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PostagemPayload>,
) -> Result<Json<PostagemResponse>, ApiError> {
    let nova = payload.validate()?;

    // Ids start at 1; a payload without an id can never match a row.
    let id = payload.id.unwrap_or(0);
    let repo = PostagemRepo::new(&state.pool);
    if !repo.exists(id).await? {
        return Err(ApiError::NotFound {
            resource: "postagem",
            id,
        });
    }

    if !TemaRepo::new(&state.pool).exists(nova.tema_id).await? {
        return Err(ApiError::TemaInexistente);
    }

    let postagem = repo.update(id, &nova).await?;
    Ok(Json(postagem.into()))
}

/// DELETE /postagens/{id} - delete a postagem
async fn delete_postagem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    PostagemRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Postagem routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/postagens",
            get(list_postagens).post(create_postagem).put(update_postagem),
        )
        .route("/postagens/{id}", get(get_postagem).delete(delete_postagem))
        .route("/postagens/titulo/{titulo}", get(search_postagens))
}
