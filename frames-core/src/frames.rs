//! # Compilador de Arquiteturas (ExtractorFrames)
//!
//! Transforma uma string de arquitetura como
//! `"left3words,wordTag(0,-1),allwordshapes(-1,1)"` na lista ordenada de
//! [`Extractor`]s usada pelo treino e pela decodificação.
//!
//! ## Palavras-chave
//!
//! | Token                              | Regras geradas                               |
//! |------------------------------------|----------------------------------------------|
//! | `words(a,b)`                       | `Word(i)` para i em a..=b                    |
//! | `tags(a,b)`                        | `Tag(i)` para i em a..=b                     |
//! | `lowercasewords(a,b)`              | `LowercaseWord(i)` para i em a..=b           |
//! | `biwords(a,b)`                     | `TwoWords(i,i+1)` para i em a..b             |
//! | `biword(a,b)`                      | `TwoWords(a,b)`                              |
//! | `twoTags(a,b)`                     | `TwoTags(a,b)`                               |
//! | `order(l,r)`                       | n-gramas de tags crescentes até t0           |
//! | `wordTag(w,t)`                     | `WordTag(w,t)`                               |
//! | `wordTwoTags(w,t1,t2)`             | `WordTwoTags(w,t1,t2)`                       |
//! | `twoWordsTag(w1,w2,t)`             | `TwoWordsTag(w1,w2,t)`                       |
//! | `threeTags(a,b,c)`                 | `ThreeTags(a,b,c)`                           |
//! | `vbn(n)`                           | `VerbalVbnZero(n)`                           |
//! | `wordcapcase` (extensão)           | `CWordCapCase`                               |
//! | `allwordshapes(a,b)`               | `WordShape(i, chris2)` para i em a..=b       |
//! | `allunicodeshapes(a,b)`            | `WordShape(i, chris4)` para i em a..=b       |
//! | `allunicodeshapeconjunction(a,b)`  | `WordShapeConjunction(a,b,chris4)`           |
//! | `sighan2005`, `german`             | conjuntos fixos pré-construídos              |
//!
//! ## Política para tokens desconhecidos
//!
//! A mesma arquitetura é lida também pelo compilador de features de palavras
//! raras. Palavras-chave dele ([`ReservedKeyword`]) são aceitas em silêncio.
//! Qualquer outro token gera um [`Warning`] (e um `tracing::warn!`) e é
//! ignorado: um erro de digitação derruba uma feature, não o treino inteiro.
//!
//! Erros fatais: parênteses malformados, argumento não inteiro e `order()`
//! com limite direito negativo.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FramesError, Result};
use crate::extractor::Extractor;
use crate::extractors::Extractors;
use crate::macros;
use crate::token::{arg, split_tokens, ArchToken};

/// Como uma palavra-chave reservada é reconhecida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedKeyword {
    /// Igualdade sem diferenciar maiúsculas.
    Exact(&'static str),
    /// O token começa com este prefixo (diferencia maiúsculas).
    Prefix(&'static str),
}

/// Palavras-chave do compilador de palavras raras (no-op aqui).
pub const RARE_WORD_KEYWORDS: &[ReservedKeyword] = &[
    ReservedKeyword::Exact("naacl2003unknowns"),
    ReservedKeyword::Exact("lnaacl2003unknowns"),
    ReservedKeyword::Exact("caselessnaacl2003unknowns"),
    ReservedKeyword::Exact("naacl2003conjunctions"),
    ReservedKeyword::Exact("frenchunknowns"),
    ReservedKeyword::Prefix("wordshapes("),
    ReservedKeyword::Exact("motleyUnknown"),
    ReservedKeyword::Prefix("suffix("),
    ReservedKeyword::Prefix("prefix("),
    ReservedKeyword::Prefix("prefixsuffix"),
    ReservedKeyword::Prefix("capitalizationsuffix("),
    ReservedKeyword::Prefix("distsim("),
    ReservedKeyword::Prefix("distsimconjunction("),
    ReservedKeyword::Exact("lctagfeatures"),
    ReservedKeyword::Prefix("unicodeshapes("),
    ReservedKeyword::Prefix("chinesedictionaryfeatures("),
    ReservedKeyword::Prefix("unicodeshapeconjunction("),
];

impl ReservedKeyword {
    pub fn matches(&self, token: &str) -> bool {
        match *self {
            ReservedKeyword::Exact(name) => token.eq_ignore_ascii_case(name),
            ReservedKeyword::Prefix(prefix) => token.starts_with(prefix),
        }
    }
}

/// `true` se o token pertence ao compilador de palavras raras.
pub fn is_reserved(token: &str) -> bool {
    RARE_WORD_KEYWORDS.iter().any(|k| k.matches(token))
}

/// Aviso não fatal emitido durante a compilação.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// Token que nenhum dos dois compiladores reconhece.
    Unrecognized { token: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Unrecognized { token } => {
                write!(f, "identificador de ExtractorFrames não reconhecido (ignorado): {token}")
            }
        }
    }
}

/// Resultado da compilação: regras em ordem e avisos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompiledFrames {
    pub extractors: Extractors,
    pub warnings: Vec<Warning>,
}

/// Opções do compilador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCompiler {
    /// Expande macros (`left3words`, ...) antes de tokenizar.
    pub expand_macros: bool,
}

impl Default for FrameCompiler {
    fn default() -> Self {
        Self {
            expand_macros: true,
        }
    }
}

impl FrameCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compila a arquitetura inteira.
    ///
    /// A ordem das regras é a ordem dos tokens, com sub-regras de um mesmo
    /// token em ordem crescente de deslocamento. Essa ordem é a identidade
    /// posicional de cada regra no modelo treinado, então é determinística.
    pub fn compile(&self, arch: &str) -> Result<CompiledFrames> {
        let expanded = if self.expand_macros {
            macros::expand(arch)
        } else {
            arch.to_string()
        };

        let mut rules = Vec::new();
        let mut warnings = Vec::new();
        for token in split_tokens(&expanded)? {
            if !compile_token(&token, &mut rules)? {
                let warning = Warning::Unrecognized {
                    token: token.text.clone(),
                };
                warn!("{warning}");
                warnings.push(warning);
            }
        }

        debug!(
            rules = rules.len(),
            warnings = warnings.len(),
            "arquitetura '{arch}' compilada"
        );
        Ok(CompiledFrames {
            extractors: Extractors::new(rules),
            warnings,
        })
    }
}

/// Atalho para [`FrameCompiler::compile`] com opções padrão.
pub fn compile(arch: &str) -> Result<CompiledFrames> {
    FrameCompiler::default().compile(arch)
}

/// Regras para `sighan2005` (tagger chinês do bakeoff SIGHAN 2005).
pub fn sighan2005() -> Vec<Extractor> {
    vec![
        Extractor::word(0),
        Extractor::word(-1),
        Extractor::word(-2),
        Extractor::word(1),
        Extractor::word(2),
        Extractor::tag(-1),
        Extractor::tag(-2),
        Extractor::continuous_tag_conjunction(-2),
    ]
}

/// Regras para `german` (tagger bidirecional do alemão).
pub fn german() -> Vec<Extractor> {
    vec![
        Extractor::word(0),
        Extractor::word(-1),
        Extractor::word(1),
        Extractor::tag(1),
        Extractor::tag(-1),
        Extractor::continuous_tag_conjunction(-2),
        Extractor::word_tag(0, -1),
        Extractor::two_words(-1, 0),
    ]
}

/// Regras de `order(left, right)`.
///
/// `left` positivo é negado. Para cada deslocamento: 0 é pulado, ±1 vira uma
/// tag simples e o resto vira um n-grama contínuo até t0, então `order(-3,0)`
/// produz `t-3!t-2!t-1`, `t-2!t-1` e `t-1`.
pub fn order(left: i32, right: i32) -> Result<Vec<Extractor>> {
    let left = if left > 0 { -left } else { left };
    if right < 0 {
        return Err(FramesError::NegativeRightOrder(right));
    }
    Ok((left..=right)
        .filter(|&idx| idx != 0)
        .map(|idx| match idx {
            -1 | 1 => Extractor::tag(idx),
            _ => Extractor::continuous_tag_conjunction(idx),
        })
        .collect())
}

/// Palavras-chave com argumentos deste compilador. Só elas têm os argumentos
/// validados; as reservadas podem receber caminhos de arquivo.
const KEYWORDS: &[&str] = &[
    "words",
    "tags",
    "lowercasewords",
    "biwords",
    "biword",
    "twoTags",
    "order",
    "wordTag",
    "wordTwoTags",
    "twoWordsTag",
    "threeTags",
    "vbn",
    "allwordshapes",
    "allunicodeshapes",
    "allunicodeshapeconjunction",
];

/// Traduz um token; `Ok(false)` quando ele não é reconhecido.
fn compile_token(token: &ArchToken, rules: &mut Vec<Extractor>) -> Result<bool> {
    let name = token.name.as_str();

    // tokens sem argumentos
    if token.args.is_none() {
        if name == "sighan2005" {
            rules.extend(sighan2005());
            return Ok(true);
        }
        if name.eq_ignore_ascii_case("german") {
            rules.extend(german());
            return Ok(true);
        }
        // extensão: o conjunto clássico de palavras-chave não constrói CWordCapCase
        if name.eq_ignore_ascii_case("wordcapcase") {
            rules.push(Extractor::cword_cap_case());
            return Ok(true);
        }
        return Ok(is_reserved(&token.text));
    }

    if !KEYWORDS.contains(&name) {
        return Ok(is_reserved(&token.text));
    }
    let args = token.int_args()?;
    let (a, b, c) = (arg(&args, 0), arg(&args, 1), arg(&args, 2));

    match name {
        "words" => rules.extend((a..=b).map(Extractor::word)),
        "tags" => rules.extend((a..=b).map(Extractor::tag)),
        "lowercasewords" => rules.extend((a..=b).map(Extractor::lowercase_word)),
        "biwords" => rules.extend((a..b).map(Extractor::biword)),
        "biword" => rules.push(Extractor::two_words(a, b)),
        "twoTags" => rules.push(Extractor::two_tags(a, b)),
        "order" => rules.extend(order(a, b)?),
        "wordTag" => rules.push(Extractor::word_tag(a, b)),
        "wordTwoTags" => rules.push(Extractor::word_two_tags(a, b, c)),
        "twoWordsTag" => rules.push(Extractor::two_words_tag(a, b, c)),
        "threeTags" => rules.push(Extractor::three_tags(a, b, c)),
        "vbn" => rules.push(Extractor::verbal_vbn_zero(a)),
        "allwordshapes" => {
            for i in a..=b {
                rules.push(Extractor::word_shape(i, "chris2")?);
            }
        }
        "allunicodeshapes" => {
            for i in a..=b {
                rules.push(Extractor::word_shape(i, "chris4")?);
            }
        }
        "allunicodeshapeconjunction" => {
            rules.push(Extractor::word_shape_conjunction(a, b, "chris4")?);
        }
        _ => return Ok(false),
    }
    Ok(true)
}
