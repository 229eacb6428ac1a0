//! Postagem payload and validation
//!
//! The wire shape mirrors the persisted entity: the client sends the full
//! record, the store assigns `id` and `data`. A `data` value in the
//! payload is ignored.

use serde::Deserialize;

use super::Violation;

/// Length bounds for `titulo`, in characters
pub const TITULO_MIN: usize = 5;
pub const TITULO_MAX: usize = 100;

/// Length bounds for `texto`, in characters
pub const TEXTO_MIN: usize = 10;
pub const TEXTO_MAX: usize = 100;

pub const MSG_TITULO_OBRIGATORIO: &str = "O atributo titulo é obrigatório!";
pub const MSG_TITULO_TAMANHO: &str =
    "O atributo titulo deve conter no minimo 05 e no maximo 100 caracteres";
pub const MSG_TEXTO_OBRIGATORIO: &str = "O atributo texto é obrigatório!";
pub const MSG_TEXTO_TAMANHO: &str =
    "O atributo texto deve conter no minimo 10 e no maximo 100 caracteres";
pub const MSG_TEMA_OBRIGATORIO: &str = "O atributo tema é obrigatório!";

/// Incoming postagem record (POST and PUT share this shape)
#[derive(Debug, Clone, Deserialize)]
pub struct PostagemPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub texto: Option<String>,
    #[serde(default)]
    pub tema: Option<TemaRef>,
    #[serde(default)]
    pub usuario: Option<UsuarioRef>,
}

/// Reference to an existing tema; extra fields in the payload are ignored
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TemaRef {
    pub id: i64,
}

/// Reference to an existing usuario
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UsuarioRef {
    pub id: i64,
}

/// Field values that passed validation, ready to persist
#[derive(Debug, Clone)]
pub struct NovaPostagem {
    pub titulo: String,
    pub texto: String,
    pub tema_id: i64,
    pub usuario_id: Option<i64>,
}

impl PostagemPayload {
    /// Validate field constraints, collecting every violation.
    ///
    /// `titulo` and `texto` must be present, non-blank and within their
    /// length bounds; `tema` must be present; `usuario` is optional.
    pub fn validate(&self) -> Result<NovaPostagem, Vec<Violation>> {
        let mut violations = Vec::new();

        let titulo = check_text(
            &self.titulo,
            TITULO_MIN..=TITULO_MAX,
            Violation::new("titulo", MSG_TITULO_OBRIGATORIO),
            Violation::new("titulo", MSG_TITULO_TAMANHO),
            &mut violations,
        );
        let texto = check_text(
            &self.texto,
            TEXTO_MIN..=TEXTO_MAX,
            Violation::new("texto", MSG_TEXTO_OBRIGATORIO),
            Violation::new("texto", MSG_TEXTO_TAMANHO),
            &mut violations,
        );

        let tema_id = match self.tema {
            Some(tema) => Some(tema.id),
            None => {
                violations.push(Violation::new("tema", MSG_TEMA_OBRIGATORIO));
                None
            }
        };

        match (titulo, texto, tema_id) {
            (Some(titulo), Some(texto), Some(tema_id)) => Ok(NovaPostagem {
                titulo,
                texto,
                tema_id,
                usuario_id: self.usuario.map(|u| u.id),
            }),
            _ => Err(violations),
        }
    }
}

fn check_text(
    value: &Option<String>,
    bounds: std::ops::RangeInclusive<usize>,
    missing: Violation,
    out_of_bounds: Violation,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(missing);
            None
        }
        Some(s) if s.trim().is_empty() => {
            violations.push(missing);
            None
        }
        Some(s) if !bounds.contains(&s.chars().count()) => {
            violations.push(out_of_bounds);
            None
        }
        Some(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(titulo: &str, texto: &str) -> PostagemPayload {
        PostagemPayload {
            id: None,
            titulo: Some(titulo.to_owned()),
            texto: Some(texto.to_owned()),
            tema: Some(TemaRef { id: 1 }),
            usuario: None,
        }
    }

    #[test]
    fn valid_payload() {
        let nova = payload("Hello World", "This is body.").validate().unwrap();
        assert_eq!(nova.titulo, "Hello World");
        assert_eq!(nova.texto, "This is body.");
        assert_eq!(nova.tema_id, 1);
        assert_eq!(nova.usuario_id, None);
    }

    #[test]
    fn missing_titulo() {
        let mut p = payload("Hello World", "This is body.");
        p.titulo = None;
        let violations = p.validate().unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::new("titulo", MSG_TITULO_OBRIGATORIO)]
        );
    }

    #[test]
    fn blank_titulo_counts_as_missing() {
        let violations = payload("   ", "This is body.").validate().unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::new("titulo", MSG_TITULO_OBRIGATORIO)]
        );
    }

    #[test]
    fn titulo_length_bounds() {
        let violations = payload("abcd", "This is body.").validate().unwrap_err();
        assert_eq!(violations, vec![Violation::new("titulo", MSG_TITULO_TAMANHO)]);

        let long = "a".repeat(101);
        let violations = payload(&long, "This is body.").validate().unwrap_err();
        assert_eq!(violations, vec![Violation::new("titulo", MSG_TITULO_TAMANHO)]);

        assert!(payload("abcde", "This is body.").validate().is_ok());
        assert!(payload(&"a".repeat(100), "This is body.").validate().is_ok());
    }

    #[test]
    fn texto_length_bounds() {
        let violations = payload("Hello World", "too short").validate().unwrap_err();
        assert_eq!(violations, vec![Violation::new("texto", MSG_TEXTO_TAMANHO)]);

        assert!(payload("Hello World", "exactly 10").validate().is_ok());
    }

    #[test]
    fn missing_tema() {
        let mut p = payload("Hello World", "This is body.");
        p.tema = None;
        let violations = p.validate().unwrap_err();
        assert_eq!(violations, vec![Violation::new("tema", MSG_TEMA_OBRIGATORIO)]);
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let p = PostagemPayload {
            id: None,
            titulo: Some("oi".to_owned()),
            texto: None,
            tema: None,
            usuario: None,
        };
        let violations = p.validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::new("titulo", MSG_TITULO_TAMANHO),
                Violation::new("texto", MSG_TEXTO_OBRIGATORIO),
                Violation::new("tema", MSG_TEMA_OBRIGATORIO),
            ]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 5 accented characters, 10 bytes in UTF-8
        assert!(payload("ééééé", "This is body.").validate().is_ok());
    }

    #[test]
    fn client_supplied_data_is_ignored_by_deserialization() {
        let p: PostagemPayload = serde_json::from_str(
            r#"{"titulo":"Hello World","texto":"This is body.","data":"2024-01-01T00:00:00Z","tema":{"id":3,"descricao":"extra"}}"#,
        )
        .unwrap();
        let nova = p.validate().unwrap();
        assert_eq!(nova.tema_id, 3);
    }
}
