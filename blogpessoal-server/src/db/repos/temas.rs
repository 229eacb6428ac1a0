//! Tema repository
//!
//! Deleting a tema cascades to its postagens: both deletes run in the
//! same transaction, so a tema is never removed leaving orphans behind.

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Tema record from database
#[derive(Debug, Clone, FromRow)]
pub struct Tema {
    pub id: i64,
    pub descricao: String,
}

/// Tema repository
pub struct TemaRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TemaRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all temas, oldest first.
    pub async fn list(&self) -> Result<Vec<Tema>, DbError> {
        let temas = sqlx::query_as("SELECT id, descricao FROM tb_temas ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(temas)
    }

    /// Get a single tema by id.
    pub async fn get(&self, id: i64) -> Result<Tema, DbError> {
        let tema = sqlx::query_as("SELECT id, descricao FROM tb_temas WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "tema",
                id,
            })?;

        Ok(tema)
    }

    /// Whether a tema with this id exists.
    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tb_temas WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Case-insensitive substring search on descricao.
    pub async fn search_by_descricao(&self, descricao: &str) -> Result<Vec<Tema>, DbError> {
        let temas = sqlx::query_as(
            r#"
            SELECT id, descricao FROM tb_temas
            WHERE descricao ILIKE '%' || $1 || '%'
            ORDER BY id
            "#,
        )
        .bind(descricao)
        .fetch_all(self.pool)
        .await?;

        Ok(temas)
    }

    /// Insert a new tema; the store assigns the id.
    pub async fn create(&self, descricao: &str) -> Result<Tema, DbError> {
        let tema = sqlx::query_as(
            "INSERT INTO tb_temas (descricao) VALUES ($1) RETURNING id, descricao",
        )
        .bind(descricao)
        .fetch_one(self.pool)
        .await?;

        Ok(tema)
    }

    /// Replace the descricao of an existing tema.
    pub async fn update(&self, id: i64, descricao: &str) -> Result<Tema, DbError> {
        let tema = sqlx::query_as(
            "UPDATE tb_temas SET descricao = $2 WHERE id = $1 RETURNING id, descricao",
        )
        .bind(id)
        .bind(descricao)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "tema",
            id,
        })?;

        Ok(tema)
    }

    /// Delete a tema and every postagem that references it.
    ///
    /// Both deletes run in one transaction; a missing tema rolls the
    /// postagem delete back and returns NotFound.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let postagens = sqlx::query("DELETE FROM tb_postagens WHERE tema_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let temas = sqlx::query("DELETE FROM tb_temas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if temas.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "tema",
                id,
            });
        }

        tx.commit().await?;
        tracing::debug!(
            tema = id,
            postagens = postagens.rows_affected(),
            "tema removed with its postagens"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{PostagemRepo, Postagem};
    use crate::db::{create_pool, migrations};
    use crate::models::NovaPostagem;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    async fn create_postagem(pool: &PgPool, titulo: &str, tema_id: i64) -> Postagem {
        PostagemRepo::new(pool)
            .create(&NovaPostagem {
                titulo: titulo.to_owned(),
                texto: "corpo de teste valido".to_owned(),
                tema_id,
                usuario_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_cascades_to_postagens() {
        let pool = test_pool().await;
        let repo = TemaRepo::new(&pool);

        let alvo = repo.create("tema alvo").await.unwrap();
        let outro = repo.create("tema preservado").await.unwrap();

        let apagada = create_postagem(&pool, "Postagem do alvo", alvo.id).await;
        let preservada = create_postagem(&pool, "Postagem preservada", outro.id).await;

        repo.delete(alvo.id).await.unwrap();

        let posts = PostagemRepo::new(&pool);
        assert!(matches!(
            posts.get(apagada.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert_eq!(posts.get(preservada.id).await.unwrap().id, preservada.id);
        assert_eq!(repo.get(outro.id).await.unwrap().descricao, "tema preservado");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_tema_without_postagens() {
        let pool = test_pool().await;
        let repo = TemaRepo::new(&pool);

        let tema = repo.create("sem postagens").await.unwrap();
        repo.delete(tema.id).await.unwrap();

        assert!(matches!(
            repo.get(tema.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_tema_is_not_found() {
        let pool = test_pool().await;
        let err = TemaRepo::new(&pool).delete(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "tema", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn blank_descricao_round_trips() {
        let pool = test_pool().await;
        let repo = TemaRepo::new(&pool);

        let tema = repo.create("").await.unwrap();
        assert_eq!(repo.get(tema.id).await.unwrap().descricao, "");
    }
}
