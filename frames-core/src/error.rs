//! # Erros do Compilador de Arquiteturas
//!
//! Apenas falhas de configuração realmente irrecuperáveis viram erro:
//! parênteses malformados, argumentos não inteiros e `order()` com limite
//! direito negativo. Tokens desconhecidos são avisos (ver [`crate::frames::Warning`]).
//!
//! As variantes de contexto (`CursorOutOfRange`, `TagUnassigned`) são emitidas
//! pelo armazenamento de sequências quando um extrator pede uma posição que o
//! motor de busca não deveria ter pedido.

/// Result padrão do crate, usando [`FramesError`] como erro.
pub type Result<T, E = FramesError> = std::result::Result<T, E>;

/// Erros do compilador de arquiteturas e da extração de features.
#[derive(Debug, thiserror::Error)]
pub enum FramesError {
    /// Token com parênteses aninhados, sem fechamento ou sem abertura.
    #[error("token malformado '{token}': {reason}")]
    MalformedToken { token: String, reason: &'static str },

    /// Argumento que não é um inteiro com sinal dentro de `±MAX_OFFSET`.
    #[error(
        "argumento inválido '{argument}' em '{token}': esperado inteiro entre -{max} e {max}",
        max = crate::token::MAX_OFFSET
    )]
    InvalidArgument { token: String, argument: String },

    /// `order(l, r)` com `r < 0`.
    #[error("a ordem à direita deve ser não negativa, não {0}")]
    NegativeRightOrder(i32),

    /// Nome de esquema de forma de palavra desconhecido.
    #[error("word shaper desconhecido: {0}")]
    UnknownShaper(String),

    /// O cursor aponta para uma sentença ou posição inexistente.
    #[error("cursor fora do intervalo: sentença {sentence}, posição {position}")]
    CursorOutOfRange { sentence: usize, position: usize },

    /// A tag pedida ainda não foi atribuída (nem pelo ouro, nem pela hipótese).
    #[error("tag ainda não atribuída na posição {position}")]
    TagUnassigned { position: usize },

    /// Mais tags do que palavras ao montar uma sentença.
    #[error("{tags} tags para uma sentença de {words} palavras")]
    TooManyTags { words: usize, tags: usize },

    /// Falha ao ler a configuração JSON.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
