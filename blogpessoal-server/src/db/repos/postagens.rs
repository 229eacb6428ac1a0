//! Postagem repository
//!
//! Every read returns the postagem with its tema embedded (JOIN) and the
//! optional usuario (LEFT JOIN), so a single statement produces the full
//! wire shape.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{DbError, Tema};
use crate::models::NovaPostagem;

/// Postagem record with embedded relations
#[derive(Debug, Clone)]
pub struct Postagem {
    pub id: i64,
    pub titulo: String,
    pub texto: String,
    pub data: DateTime<Utc>,
    pub tema: Tema,
    pub usuario: Option<Usuario>,
}

/// Usuario as referenced from a postagem
#[derive(Debug, Clone)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub foto: Option<String>,
}

const POSTAGEM_COLUMNS: &str = r#"
    p.id, p.titulo, p.texto, p.data,
    t.id AS tema_id, t.descricao AS tema_descricao,
    u.id AS usuario_id, u.nome AS usuario_nome,
    u.usuario AS usuario_login, u.foto AS usuario_foto
"#;

fn map_postagem(row: &PgRow) -> Postagem {
    let usuario = row
        .get::<Option<i64>, _>("usuario_id")
        .map(|id| Usuario {
            id,
            nome: row.get("usuario_nome"),
            usuario: row.get("usuario_login"),
            foto: row.get("usuario_foto"),
        });

    Postagem {
        id: row.get("id"),
        titulo: row.get("titulo"),
        texto: row.get("texto"),
        data: row.get("data"),
        tema: Tema {
            id: row.get("tema_id"),
            descricao: row.get("tema_descricao"),
        },
        usuario,
    }
}

/// Postagem repository
pub struct PostagemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostagemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all postagens, oldest first.
    pub async fn list(&self) -> Result<Vec<Postagem>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {POSTAGEM_COLUMNS}
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            LEFT JOIN tb_usuarios u ON u.id = p.usuario_id
            ORDER BY p.id
            "#,
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(map_postagem).collect())
    }

    /// Get a single postagem by id.
    pub async fn get(&self, id: i64) -> Result<Postagem, DbError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {POSTAGEM_COLUMNS}
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            LEFT JOIN tb_usuarios u ON u.id = p.usuario_id
            WHERE p.id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "postagem",
            id,
        })?;

        Ok(map_postagem(&row))
    }

    /// Whether a postagem with this id exists.
    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tb_postagens WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Case-insensitive substring search on titulo.
    ///
    /// `%` and `_` in the fragment are not escaped, matching the original
    /// `findAllByTituloContainingIgnoreCase` contract.
    pub async fn search_by_titulo(&self, titulo: &str) -> Result<Vec<Postagem>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {POSTAGEM_COLUMNS}
            FROM tb_postagens p
            JOIN tb_temas t ON t.id = p.tema_id
            LEFT JOIN tb_usuarios u ON u.id = p.usuario_id
            WHERE p.titulo ILIKE '%' || $1 || '%'
            ORDER BY p.id
            "#,
        ))
        .bind(titulo)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(map_postagem).collect())
    }

    /// Insert a new postagem; the store assigns `id` and `data`.
    ///
    /// CTE so the inserted row comes back joined with its tema/usuario in
    /// one statement.
    pub async fn create(&self, nova: &NovaPostagem) -> Result<Postagem, DbError> {
        let row = sqlx::query(&format!(
            r#"
            WITH inserted AS (
                INSERT INTO tb_postagens (titulo, texto, tema_id, usuario_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, titulo, texto, data, tema_id, usuario_id
            )
            SELECT {POSTAGEM_COLUMNS}
            FROM inserted p
            JOIN tb_temas t ON t.id = p.tema_id
            LEFT JOIN tb_usuarios u ON u.id = p.usuario_id
            "#,
        ))
        .bind(&nova.titulo)
        .bind(&nova.texto)
        .bind(nova.tema_id)
        .bind(nova.usuario_id)
        .fetch_one(self.pool)
        .await?;

        Ok(map_postagem(&row))
    }

    /// Full replacement of the mutable fields; `data` is re-derived by
    /// the store.
    pub async fn update(&self, id: i64, nova: &NovaPostagem) -> Result<Postagem, DbError> {
        let row = sqlx::query(&format!(
            r#"
            WITH updated AS (
                UPDATE tb_postagens
                SET titulo = $2, texto = $3, data = NOW(), tema_id = $4, usuario_id = $5
                WHERE id = $1
                RETURNING id, titulo, texto, data, tema_id, usuario_id
            )
            SELECT {POSTAGEM_COLUMNS}
            FROM updated p
            JOIN tb_temas t ON t.id = p.tema_id
            LEFT JOIN tb_usuarios u ON u.id = p.usuario_id
            "#,
        ))
        .bind(id)
        .bind(&nova.titulo)
        .bind(&nova.texto)
        .bind(nova.tema_id)
        .bind(nova.usuario_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "postagem",
            id,
        })?;

        Ok(map_postagem(&row))
    }

    /// Delete a postagem by id.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM tb_postagens WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "postagem",
                id,
            });
        }

        Ok(())
    }
}
