//! Schema migrations
//!
//! Idempotent CREATE TABLE IF NOT EXISTS statements, run at server
//! startup and by the `migrate` command.

use sqlx::PgPool;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tb_usuarios (
            id BIGSERIAL PRIMARY KEY,
            nome TEXT NOT NULL,
            usuario TEXT NOT NULL UNIQUE,
            foto TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tb_temas (
            id BIGSERIAL PRIMARY KEY,
            descricao TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // tema_id is a plain FK: removing a tema goes through
    // TemaRepo::delete, which removes the referencing postagens in the
    // same transaction.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tb_postagens (
            id BIGSERIAL PRIMARY KEY,
            titulo TEXT NOT NULL,
            texto TEXT NOT NULL,
            data TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            tema_id BIGINT NOT NULL REFERENCES tb_temas(id),
            usuario_id BIGINT REFERENCES tb_usuarios(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tb_postagens_tema ON tb_postagens(tema_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tb_postagens_usuario ON tb_postagens(usuario_id)")
        .execute(pool)
        .await?;

    Ok(())
}
