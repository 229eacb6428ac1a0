//! Tema payload and validation

use serde::Deserialize;

use super::Violation;

pub const MSG_DESCRICAO_OBRIGATORIA: &str = "O Atributo Descrição é obrigatório";

/// Incoming tema record (POST and PUT share this shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TemaPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl TemaPayload {
    /// Only presence is enforced; a blank descricao is accepted as-is.
    pub fn validate(&self) -> Result<String, Vec<Violation>> {
        match &self.descricao {
            Some(descricao) => Ok(descricao.clone()),
            None => Err(vec![Violation::new("descricao", MSG_DESCRICAO_OBRIGATORIA)]),
        }
    }
}
