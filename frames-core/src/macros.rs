//! # Macros de Arquitetura
//!
//! Atalhos históricos para arquiteturas completas. `left3words` é o tagger
//! trigrama simples (CMM da esquerda para a direita); os `bidirectional*`
//! também olham tags à direita e são mais precisos, porém mais lentos.
//!
//! A substituição é feita **por token inteiro**: `bidirectional` nunca casa
//! dentro de `bidirectional5words`. Mesmo assim a tabela fica ordenada do nome
//! mais longo para o mais curto entre nomes que são substrings um do outro.

use crate::token::split_tokens;

/// Tabela `(nome, expansão)`. Nomes diferenciam maiúsculas.
pub const MACROS: &[(&str, &str)] = &[
    (
        "bidirectional5words",
        "words(-2,2),order(-2,2),twoTags(-1,1),wordTag(0,-1),wordTag(0,1),biwords(-1,1)",
    ),
    (
        "bidirectional",
        "words(-1,1),order(-2,2),twoTags(-1,1),wordTag(0,-1),wordTag(0,1),biwords(-1,1)",
    ),
    ("left3words", "words(-1,1),order(2)"),
    ("left5words", "words(-2,2),order(2)"),
    ("generic", "words(-1,1),order(2),biwords(-1,0),wordTag(0,-1)"),
];

/// Expansão de um nome de macro, se existir.
pub fn lookup(name: &str) -> Option<&'static str> {
    MACROS
        .iter()
        .find(|(macro_name, _)| *macro_name == name)
        .map(|(_, expansion)| *expansion)
}

/// Reescreve todas as ocorrências de macros na arquitetura.
///
/// Nunca falha: se a string não puder ser tokenizada ela volta intacta, e o
/// compilador reporta o erro de sintaxe logo em seguida. Expansões não são
/// re-expandidas.
pub fn expand(arch: &str) -> String {
    let Ok(tokens) = split_tokens(arch) else {
        return arch.to_string();
    };
    tokens
        .iter()
        .map(|token| match (&token.args, lookup(&token.name)) {
            (None, Some(expansion)) => expansion,
            _ => token.text.as_str(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
