//! # Formas de Palavra (Word Shapes)
//!
//! Mapeia um token para uma classe de equivalência grosseira da sua forma
//! superficial: `Foo5` → `Xxxd`, `McDonald's` → `Xx'Xxs`... Assim o modelo
//! generaliza para palavras nunca vistas que "se parecem" com palavras vistas.
//!
//! ## Esquemas
//!
//! | Nome     | Ideia                                                        |
//! |----------|--------------------------------------------------------------|
//! | `dan1`   | Uma categoria global: ALL-DIGITS, ALL-UPPER, MIXED-CASE...   |
//! | `chris1` | Categorias um pouco mais finas (NUMBER, CAPITALIZED, ...)    |
//! | `chris2` | Classes por caractere ASCII; palavras longas comprimidas     |
//! | `chris4` | Como `chris2`, mas ciente de Unicode (grafemas, outras escritas) |
//!
//! Nenhum esquema guarda cache: [`WordShaper`] é `Copy` e `shape` é uma função
//! pura, então pode ser chamada de qualquer thread ao mesmo tempo.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{FramesError, Result};

/// Quantos caracteres de cada ponta são preservados literalmente em palavras longas.
const BOUNDARY_SIZE: usize = 2;

/// Esquema de classificação de forma de palavra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordShaper {
    Dan1,
    Chris1,
    Chris2,
    Chris4,
}

impl WordShaper {
    /// Busca um esquema pelo nome (sem diferenciar maiúsculas).
    pub fn lookup(name: &str) -> Result<Self> {
        [
            WordShaper::Dan1,
            WordShaper::Chris1,
            WordShaper::Chris2,
            WordShaper::Chris4,
        ]
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| FramesError::UnknownShaper(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            WordShaper::Dan1 => "dan1",
            WordShaper::Chris1 => "chris1",
            WordShaper::Chris2 => "chris2",
            WordShaper::Chris4 => "chris4",
        }
    }

    /// Forma da palavra segundo este esquema. Total: a string vazia mapeia
    /// para a string vazia.
    pub fn shape(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        match self {
            WordShaper::Dan1 => shape_dan1(word).to_string(),
            WordShaper::Chris1 => shape_chris1(word).to_string(),
            WordShaper::Chris2 => {
                let classes: Vec<char> = word.chars().map(chris2_class).collect();
                compress(&classes)
            }
            WordShaper::Chris4 => {
                let classes: Vec<char> = word
                    .graphemes(true)
                    .filter_map(|g| g.chars().next())
                    .map(chris4_class)
                    .collect();
                compress(&classes)
            }
        }
    }
}

impl std::fmt::Display for WordShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn shape_dan1(word: &str) -> &'static str {
    let mut digit = true;
    let mut upper = true;
    let mut lower = true;
    let mut mixed = true;
    for (i, c) in word.chars().enumerate() {
        if !c.is_numeric() {
            digit = false;
        }
        if !c.is_lowercase() {
            lower = false;
        }
        if !c.is_uppercase() {
            upper = false;
        }
        if (i == 0 && !c.is_uppercase()) || (i > 0 && !c.is_lowercase()) {
            mixed = false;
        }
    }
    if digit {
        "ALL-DIGITS"
    } else if upper {
        "ALL-UPPER"
    } else if lower {
        "ALL-LOWER"
    } else if mixed {
        "MIXED-CASE"
    } else {
        "OTHER"
    }
}

fn shape_chris1(word: &str) -> &'static str {
    let has_digit = word.chars().any(char::is_numeric);
    let has_alpha = word.chars().any(char::is_alphabetic);
    let has_upper = word.chars().any(char::is_uppercase);
    let has_lower = word.chars().any(char::is_lowercase);
    let first_upper = word.chars().next().is_some_and(char::is_uppercase);

    if !has_alpha {
        if !has_digit {
            return "SYMBOL";
        }
        if word
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
        {
            return "NUMBER";
        }
        return if word.ends_with('%') { "PERCENT" } else { "DIGIT-SYMBOL" };
    }
    if has_digit {
        return if has_upper { "UPPER-DIGIT" } else { "LOWER-DIGIT" };
    }
    match (has_upper, has_lower) {
        (true, false) => "ALLCAPS",
        (false, _) => "LOWERCASE",
        (true, true) if first_upper && word.chars().skip(1).all(|c| !c.is_uppercase()) => {
            "CAPITALIZED"
        }
        (true, true) => "MIXEDCASE",
    }
}

fn chris2_class(c: char) -> char {
    if c.is_ascii_uppercase() {
        'X'
    } else if c.is_ascii_lowercase() {
        'x'
    } else if c.is_ascii_digit() {
        'd'
    } else if ('\u{0391}'..='\u{03C9}').contains(&c) {
        // letras gregas (comuns em nomes de genes e fórmulas)
        'g'
    } else {
        c
    }
}

fn chris4_class(c: char) -> char {
    if c.is_uppercase() {
        'X'
    } else if c.is_lowercase() {
        'x'
    } else if c.is_numeric() {
        'd'
    } else if c.is_alphabetic() {
        // escritas sem caixa (CJK, árabe, devanágari...)
        'c'
    } else if c.is_ascii() {
        c
    } else {
        'o'
    }
}

/// Preserva as pontas e resume o miolo como o conjunto ordenado de classes.
fn compress(classes: &[char]) -> String {
    if classes.len() <= BOUNDARY_SIZE * 2 {
        return classes.iter().collect();
    }
    let (begin, rest) = classes.split_at(BOUNDARY_SIZE);
    let (middle, end) = rest.split_at(rest.len() - BOUNDARY_SIZE);
    let seen: BTreeSet<char> = middle.iter().copied().collect();

    let mut out = String::with_capacity(BOUNDARY_SIZE * 2 + seen.len());
    out.extend(begin);
    out.extend(seen);
    out.extend(end);
    out
}
