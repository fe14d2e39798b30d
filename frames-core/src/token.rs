//! # Tokens da String de Arquitetura
//!
//! `words(-1,1), order(2),sighan2005` vira três tokens:
//!
//! ```text
//! "words(-1,1)"  -> name = "words",      args = Some("-1,1")
//! "order(2)"     -> name = "order",      args = Some("2")
//! "sighan2005"   -> name = "sighan2005", args = None
//! ```
//!
//! Vírgulas só separam tokens fora de parênteses. Parênteses não aninham.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FramesError, Result};

/// Maior deslocamento aceito em um argumento, em módulo.
pub const MAX_OFFSET: i32 = 1024;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^(),]*?)\s*(?:\((?P<args>[^()]*)\))?$").expect("regex válida")
});

/// Um token já separado: identificador e texto bruto dos argumentos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchToken {
    /// Texto original do token (sem espaços nas pontas).
    pub text: String,
    pub name: String,
    /// Conteúdo entre parênteses, se houver. Não é interpretado aqui: as
    /// palavras-chave do compilador irmão de palavras raras aceitam caminhos
    /// de arquivo como argumento.
    pub args: Option<String>,
}

impl ArchToken {
    /// Interpreta o token como `name(args)`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let caps = TOKEN.captures(text).ok_or_else(|| FramesError::MalformedToken {
            token: text.to_string(),
            reason: "texto após o ')'",
        })?;
        Ok(Self {
            text: text.to_string(),
            name: caps["name"].to_string(),
            args: caps.name("args").map(|m| m.as_str().to_string()),
        })
    }

    /// Todos os argumentos como inteiros. Um argumento vazio vale 0, então
    /// `order(2)` e `order(2,)` equivalem a `order(2,0)` e um token sem
    /// parênteses não tem argumentos.
    ///
    /// Qualquer argumento que não seja inteiro, ou cujo módulo passe de
    /// [`MAX_OFFSET`], é erro fatal, mesmo que a palavra-chave não o use.
    pub fn int_args(&self) -> Result<Vec<i32>> {
        let Some(args) = self.args.as_deref() else {
            return Ok(Vec::new());
        };
        args.split(',')
            .map(str::trim)
            .map(|raw| {
                if raw.is_empty() {
                    return Ok(0);
                }
                match raw.parse::<i32>() {
                    Ok(value) if value.unsigned_abs() <= MAX_OFFSET.unsigned_abs() => Ok(value),
                    _ => Err(FramesError::InvalidArgument {
                        token: self.text.clone(),
                        argument: raw.to_string(),
                    }),
                }
            })
            .collect()
    }
}

/// `index`-ésimo argumento (0-based); ausentes valem 0.
pub fn arg(args: &[i32], index: usize) -> i32 {
    args.get(index).copied().unwrap_or(0)
}

/// Separa a arquitetura nas vírgulas de nível zero. Tokens vazios são
/// descartados; parênteses aninhados ou desbalanceados são erro fatal.
pub fn split_tokens(arch: &str) -> Result<Vec<ArchToken>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut open = false;

    for (i, c) in arch.char_indices() {
        match c {
            '(' if open => return Err(malformed(&arch[start..], "parênteses aninhados")),
            '(' => open = true,
            ')' if !open => return Err(malformed(&arch[start..=i], "')' sem '('")),
            ')' => open = false,
            ',' if !open => {
                push_token(&mut tokens, &arch[start..i])?;
                start = i + 1;
            }
            _ => {}
        }
    }
    if open {
        return Err(malformed(&arch[start..], "'(' sem ')'"));
    }
    push_token(&mut tokens, &arch[start..])?;
    Ok(tokens)
}

fn push_token(tokens: &mut Vec<ArchToken>, text: &str) -> Result<()> {
    if !text.trim().is_empty() {
        tokens.push(ArchToken::parse(text)?);
    }
    Ok(())
}

fn malformed(token: &str, reason: &'static str) -> FramesError {
    FramesError::MalformedToken {
        token: token.trim().to_string(),
        reason,
    }
}
