//! # Extratores de Features
//!
//! Um [`Extractor`] é a unidade atômica do modelo: dado um cursor
//! ([`History`]) e o armazenamento de sequências, ele devolve uma **chave de
//! feature** (uma `String`). O modelo de Máxima Entropia conjuga cada chave
//! com a tag candidata da posição corrente.
//!
//! ## Catálogo
//!
//! | Variante                   | Chave                                  | Dinâmico |
//! |----------------------------|----------------------------------------|----------|
//! | `Word(p)`                  | `w(p)`                                 | não      |
//! | `Tag(p)`                   | `t(p)`                                 | sim      |
//! | `LowercaseWord(p)`         | `lower(w(p))`                          | não      |
//! | `CWordCapCase`             | `w(0)` se tiver maiúsculas, senão `0`  | não      |
//! | `WordTag(w, t)`            | `t(t)!w(w)`                            | sim      |
//! | `TwoWords(a, b)`           | `w(maior)!w(menor)`                    | não      |
//! | `TwoTags(a, b)`            | `t(menor)!t(maior)`                    | sim      |
//! | `TwoWordsTag(w1, w2, t)`   | `w(w1)!t(t)!w(w2)`                     | sim      |
//! | `ContinuousTagConjunction` | tags de `m` até 0 (exclusivo)          | sim      |
//! | `ThreeTags(a, b, c)`       | `t(p1)!t(p2)!t(p3)` ordenados          | sim      |
//! | `WordTwoTags(w, a, b)`     | `t(p1)!w(w)!t(p2)` ordenados           | sim      |
//! | `VerbalVbnZero(n)`         | `1` se há auxiliar have/be à esquerda  | não      |
//! | `WordShape(p, s)`          | `shape(w(p))`                          | não      |
//! | `WordShapeConjunction`     | formas de `l..=r` unidas por `|`       | não      |
//!
//! ## Janela de contexto
//!
//! `left_context`/`right_context` dizem quantas tags antes/depois do cursor o
//! motor de busca precisa ter hipotetizado antes de chamar `extract`. Elas são
//! **derivadas** de [`Extractor::tag_offsets`] a cada chamada, nunca
//! armazenadas, então não existe valor padrão que possa ficar desatualizado.
//!
//! Extratores são imutáveis, `Send + Sync` e não guardam cache algum.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::{History, SequenceStore, NA};
use crate::shape::WordShaper;

/// Separador entre os campos de uma chave conjunta.
pub const SEP: char = '!';

/// Separador entre formas em [`Extractor::WordShapeConjunction`].
pub const SHAPE_SEP: char = '|';

/// Valor "desligado" das features binárias.
pub const ZERO: &str = "0";

const ONE: &str = "1";

static VBN_STOPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:and|or|but|,|;|-|--)$").expect("regex válida"));

static VBN_AUXILIARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:have|has|having|had|is|am|are|was|were|be|being|been|'ve|'s|s|'d|'re|'m|gotten|got|gets|get|getting)$",
    )
    .expect("regex válida")
});

/// Regra de extração de features. Conjunto fechado de variantes.
///
/// Prefira os construtores (`Extractor::two_tags`, ...) aos literais: eles
/// normalizam a ordem dos deslocamentos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extractor {
    Word { position: i32 },
    Tag { position: i32 },
    LowercaseWord { position: i32 },
    CWordCapCase,
    WordTag { word: i32, tag: i32 },
    /// `high >= low`; a chave começa pela posição mais alta.
    TwoWords { high: i32, low: i32 },
    /// `left <= right`.
    TwoTags { left: i32, right: i32 },
    /// `left_word <= right_word`.
    TwoWordsTag { left_word: i32, right_word: i32, tag: i32 },
    ContinuousTagConjunction { max_position: i32 },
    /// `first <= second <= third`.
    ThreeTags { first: i32, second: i32, third: i32 },
    /// `left_tag <= right_tag`.
    WordTwoTags { word: i32, left_tag: i32, right_tag: i32 },
    VerbalVbnZero { bound: i32 },
    WordShape { position: i32, shaper: WordShaper },
    WordShapeConjunction { left: i32, right: i32, shaper: WordShaper },
}

impl Extractor {
    pub fn word(position: i32) -> Self {
        Extractor::Word { position }
    }

    pub fn tag(position: i32) -> Self {
        Extractor::Tag { position }
    }

    pub fn lowercase_word(position: i32) -> Self {
        Extractor::LowercaseWord { position }
    }

    /// A palavra corrente se ela tiver alguma letra maiúscula, `0` caso contrário.
    pub fn cword_cap_case() -> Self {
        Extractor::CWordCapCase
    }

    pub fn word_tag(word: i32, tag: i32) -> Self {
        Extractor::WordTag { word, tag }
    }

    /// Par de palavras em qualquer ordem: `two_words(1, -1) == two_words(-1, 1)`.
    pub fn two_words(position1: i32, position2: i32) -> Self {
        Extractor::TwoWords {
            high: position1.max(position2),
            low: position1.min(position2),
        }
    }

    /// Bigrama de palavras adjacentes `left` e `left + 1`.
    pub fn biword(left: i32) -> Self {
        Self::two_words(left, left + 1)
    }

    /// Par de tags em qualquer ordem. Posições iguais são aceitas.
    pub fn two_tags(position1: i32, position2: i32) -> Self {
        Extractor::TwoTags {
            left: position1.min(position2),
            right: position1.max(position2),
        }
    }

    pub fn two_words_tag(word1: i32, word2: i32, tag: i32) -> Self {
        Extractor::TwoWordsTag {
            left_word: word1.min(word2),
            right_word: word1.max(word2),
            tag,
        }
    }

    /// n-grama de tags contíguas de `max_position` até a posição corrente
    /// (exclusive). Ex.: `-3` conjuga `t-3!t-2!t-1`.
    pub fn continuous_tag_conjunction(max_position: i32) -> Self {
        Extractor::ContinuousTagConjunction { max_position }
    }

    pub fn three_tags(position1: i32, position2: i32, position3: i32) -> Self {
        let mut p = [position1, position2, position3];
        p.sort();
        Extractor::ThreeTags {
            first: p[0],
            second: p[1],
            third: p[2],
        }
    }

    /// Palavra `word` entre duas tags; as posições das tags são ordenadas.
    pub fn word_two_tags(word: i32, tag1: i32, tag2: i32) -> Self {
        Extractor::WordTwoTags {
            word,
            left_tag: tag1.min(tag2),
            right_tag: tag1.max(tag2),
        }
    }

    pub fn verbal_vbn_zero(bound: i32) -> Self {
        Extractor::VerbalVbnZero { bound }
    }

    pub fn word_shape(position: i32, shaper: &str) -> Result<Self> {
        Ok(Extractor::WordShape {
            position,
            shaper: WordShaper::lookup(shaper)?,
        })
    }

    pub fn word_shape_conjunction(left: i32, right: i32, shaper: &str) -> Result<Self> {
        Ok(Extractor::WordShapeConjunction {
            left,
            right,
            shaper: WordShaper::lookup(shaper)?,
        })
    }

    /// Nome da variante (estável, usado na UI e em logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Extractor::Word { .. } => "Word",
            Extractor::Tag { .. } => "Tag",
            Extractor::LowercaseWord { .. } => "LowercaseWord",
            Extractor::CWordCapCase => "CWordCapCase",
            Extractor::WordTag { .. } => "WordTag",
            Extractor::TwoWords { .. } => "TwoWords",
            Extractor::TwoTags { .. } => "TwoTags",
            Extractor::TwoWordsTag { .. } => "TwoWordsTag",
            Extractor::ContinuousTagConjunction { .. } => "ContinuousTagConjunction",
            Extractor::ThreeTags { .. } => "ThreeTags",
            Extractor::WordTwoTags { .. } => "WordTwoTags",
            Extractor::VerbalVbnZero { .. } => "VerbalVbnZero",
            Extractor::WordShape { .. } => "WordShape",
            Extractor::WordShapeConjunction { .. } => "WordShapeConjunction",
        }
    }

    /// Deslocamento principal da regra, quando ela tem um só.
    pub fn position(&self) -> Option<i32> {
        match *self {
            Extractor::Word { position }
            | Extractor::Tag { position }
            | Extractor::LowercaseWord { position }
            | Extractor::WordShape { position, .. } => Some(position),
            Extractor::CWordCapCase | Extractor::TwoWords { .. } => Some(0),
            Extractor::WordTag { tag, .. } => Some(tag),
            Extractor::ContinuousTagConjunction { max_position } => Some(max_position),
            _ => None,
        }
    }

    /// `true` se [`Extractor::position`] endereça a sequência de tags.
    pub fn is_tag_extractor(&self) -> bool {
        matches!(
            self,
            Extractor::Tag { .. }
                | Extractor::WordTag { .. }
                | Extractor::ContinuousTagConjunction { .. }
        )
    }

    /// Deslocamentos de tag lidos por `extract`.
    pub fn tag_offsets(&self) -> Vec<i32> {
        match *self {
            Extractor::Tag { position } => vec![position],
            Extractor::WordTag { tag, .. } | Extractor::TwoWordsTag { tag, .. } => vec![tag],
            Extractor::TwoTags { left, right } => vec![left, right],
            Extractor::ContinuousTagConjunction { max_position } => {
                conjunction_offsets(max_position)
            }
            Extractor::ThreeTags {
                first,
                second,
                third,
            } => vec![first, second, third],
            Extractor::WordTwoTags {
                left_tag,
                right_tag,
                ..
            } => vec![left_tag, right_tag],
            _ => Vec::new(),
        }
    }

    /// Deslocamentos de palavra lidos por `extract`.
    pub fn word_offsets(&self) -> Vec<i32> {
        match *self {
            Extractor::Word { position }
            | Extractor::LowercaseWord { position }
            | Extractor::WordShape { position, .. } => vec![position],
            Extractor::CWordCapCase => vec![0],
            Extractor::WordTag { word, .. } | Extractor::WordTwoTags { word, .. } => vec![word],
            Extractor::TwoWords { high, low } => vec![high, low],
            Extractor::TwoWordsTag {
                left_word,
                right_word,
                ..
            } => vec![left_word, right_word],
            Extractor::VerbalVbnZero { bound } => {
                std::iter::once(0).chain((1..=bound).map(|i| -i)).collect()
            }
            Extractor::WordShapeConjunction { left, right, .. } => (left..=right).collect(),
            Extractor::Tag { .. }
            | Extractor::TwoTags { .. }
            | Extractor::ContinuousTagConjunction { .. }
            | Extractor::ThreeTags { .. } => Vec::new(),
        }
    }

    /// Quantas tags à esquerda do cursor precisam estar atribuídas.
    pub fn left_context(&self) -> usize {
        self.tag_offsets()
            .into_iter()
            .map(|o| o.min(0).unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Quantas tags à direita do cursor precisam estar atribuídas.
    pub fn right_context(&self) -> usize {
        self.tag_offsets()
            .into_iter()
            .map(|o| o.max(0).unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Depende apenas da posição corrente (permite pré-computar por palavra).
    pub fn is_local(&self) -> bool {
        match *self {
            Extractor::Word { position }
            | Extractor::LowercaseWord { position }
            | Extractor::WordShape { position, .. } => position == 0,
            Extractor::CWordCapCase => true,
            _ => false,
        }
    }

    /// Depende de tags hipotetizadas durante a busca.
    pub fn is_dynamic(&self) -> bool {
        !self.tag_offsets().is_empty()
    }

    /// Produz a chave de feature para o cursor `h`.
    pub fn extract<S: SequenceStore + ?Sized>(&self, h: &History, store: &S) -> Result<String> {
        let w = |offset: i32| store.word_at(h, offset);
        let t = |offset: i32| store.tag_at(h, offset);

        Ok(match *self {
            Extractor::Word { position } => w(position)?.to_string(),
            Extractor::Tag { position } => t(position)?.to_string(),
            Extractor::LowercaseWord { position } => w(position)?.to_lowercase(),
            Extractor::CWordCapCase => {
                let cw = w(0)?;
                if cw.to_lowercase() == cw {
                    ZERO.to_string()
                } else {
                    cw.to_string()
                }
            }
            Extractor::WordTag { word, tag } => format!("{}{SEP}{}", t(tag)?, w(word)?),
            Extractor::TwoWords { high, low } => format!("{}{SEP}{}", w(high)?, w(low)?),
            Extractor::TwoTags { left, right } => format!("{}{SEP}{}", t(left)?, t(right)?),
            Extractor::TwoWordsTag {
                left_word,
                right_word,
                tag,
            } => format!("{}{SEP}{}{SEP}{}", w(left_word)?, t(tag)?, w(right_word)?),
            Extractor::ContinuousTagConjunction { max_position } => {
                let mut key = String::new();
                for (i, offset) in conjunction_offsets(max_position).into_iter().enumerate() {
                    if i > 0 {
                        key.push(SEP);
                    }
                    key.push_str(t(offset)?);
                }
                key
            }
            Extractor::ThreeTags {
                first,
                second,
                third,
            } => format!("{}{SEP}{}{SEP}{}", t(first)?, t(second)?, t(third)?),
            Extractor::WordTwoTags {
                word,
                left_tag,
                right_tag,
            } => format!("{}{SEP}{}{SEP}{}", t(left_tag)?, w(word)?, t(right_tag)?),
            Extractor::VerbalVbnZero { bound } => extract_vbn(bound, w)?.to_string(),
            Extractor::WordShape { position, shaper } => shaper.shape(w(position)?),
            Extractor::WordShapeConjunction {
                left,
                right,
                shaper,
            } => {
                let mut key = String::new();
                for j in left..=right {
                    if j > left {
                        key.push(SHAPE_SEP);
                    }
                    key.push_str(&shaper.shape(w(j)?));
                }
                key
            }
        })
    }
}

/// Deslocamentos de uma conjunção contínua, na ordem em que entram na chave:
/// da ponta distante em direção ao cursor.
fn conjunction_offsets(max_position: i32) -> Vec<i32> {
    if max_position < 0 {
        (max_position..0).collect()
    } else {
        (1..=max_position).rev().collect()
    }
}

/// Heurística sem dicionário: a palavra corrente termina em `-ed`/`-en` e há
/// um auxiliar (have/be/get) a até `bound` palavras à esquerda, antes de
/// qualquer conjunção ou pontuação que interrompa o sintagma.
fn extract_vbn<'a, F>(bound: i32, w: F) -> Result<&'static str>
where
    F: Fn(i32) -> Result<&'a str>,
{
    let cword = w(0)?;
    if !(cword.ends_with("ed") || cword.ends_with("en")) {
        return Ok(ZERO);
    }
    for index in 1..=bound {
        let word = w(-index)?;
        if word == NA || VBN_STOPPER.is_match(word) {
            break;
        }
        if VBN_AUXILIARY.is_match(word) {
            return Ok(ONE);
        }
    }
    Ok(ZERO)
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match *self {
            Extractor::Word { position } | Extractor::LowercaseWord { position } => {
                write!(f, "{kind}(w{position})")
            }
            Extractor::Tag { position } => write!(f, "{kind}(t{position})"),
            Extractor::CWordCapCase => write!(f, "{kind}"),
            Extractor::WordTag { word, tag } => write!(f, "{kind}(w{word},t{tag})"),
            Extractor::TwoWords { high, low } => write!(f, "{kind}(w{high},w{low})"),
            Extractor::TwoTags { left, right } => write!(f, "{kind}(t{left},t{right})"),
            Extractor::TwoWordsTag {
                left_word,
                right_word,
                tag,
            } => write!(f, "{kind}(w{left_word},t{tag},w{right_word})"),
            Extractor::ContinuousTagConjunction { max_position } => {
                write!(f, "{kind}(t{max_position})")
            }
            Extractor::ThreeTags {
                first,
                second,
                third,
            } => write!(f, "{kind}(t{first},t{second},t{third})"),
            Extractor::WordTwoTags {
                word,
                left_tag,
                right_tag,
            } => write!(f, "{kind}(t{left_tag},t{right_tag},w{word})"),
            Extractor::VerbalVbnZero { bound } => write!(f, "{kind}({bound})"),
            Extractor::WordShape { position, shaper } => write!(f, "{kind}(w{position},{shaper})"),
            Extractor::WordShapeConjunction {
                left,
                right,
                shaper,
            } => write!(f, "{kind}({left},{right},{shaper})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramesError;
    use crate::history::{Sentence, TaggedCorpus};

    /// "The old dog barks loudly" com as duas primeiras tags atribuídas,
    /// cursor em "dog".
    fn setup() -> (TaggedCorpus, History) {
        let mut s = Sentence::new(["The", "old", "dog", "barks", "loudly"]);
        s.set_tag(0, "DT");
        s.set_tag(1, "JJ");
        (TaggedCorpus::from(vec![s]), History::new(0, 2))
    }

    fn full() -> (TaggedCorpus, History) {
        let s = Sentence::with_tags(
            ["The", "old", "dog", "barks", "loudly"],
            ["DT", "JJ", "NN", "VBZ", "RB"],
        );
        (TaggedCorpus::from(vec![s]), History::new(0, 2))
    }

    #[test]
    fn test_single_word_and_tag() {
        let (c, h) = setup();
        assert_eq!(Extractor::word(0).extract(&h, &c).unwrap(), "dog");
        assert_eq!(Extractor::word(-3).extract(&h, &c).unwrap(), NA);
        assert_eq!(Extractor::tag(-1).extract(&h, &c).unwrap(), "JJ");
        assert_eq!(Extractor::lowercase_word(-2).extract(&h, &c).unwrap(), "the");
    }

    #[test]
    fn test_two_words_is_commutative() {
        let (c, h) = setup();
        let a = Extractor::two_words(1, -1);
        let b = Extractor::two_words(-1, 1);
        assert_eq!(a, b);
        // posição mais alta primeiro
        assert_eq!(a.extract(&h, &c).unwrap(), "barks!old");
        assert_eq!(Extractor::biword(-1).extract(&h, &c).unwrap(), "dog!old");
    }

    #[test]
    fn test_two_tags_is_commutative() {
        let (c, h) = full();
        let a = Extractor::two_tags(1, -1);
        assert_eq!(a, Extractor::two_tags(-1, 1));
        assert_eq!(a.extract(&h, &c).unwrap(), "JJ!VBZ");
        assert_eq!((a.left_context(), a.right_context()), (1, 1));
    }

    #[test]
    fn test_degenerate_two_tags_repeats_field() {
        let (c, h) = setup();
        let e = Extractor::two_tags(-1, -1);
        assert_eq!(e.extract(&h, &c).unwrap(), "JJ!JJ");
        assert_eq!((e.left_context(), e.right_context()), (1, 0));
    }

    #[test]
    fn test_word_tag() {
        let (c, h) = setup();
        let e = Extractor::word_tag(0, -1);
        assert_eq!(e.extract(&h, &c).unwrap(), "JJ!dog");
        assert_eq!(e.position(), Some(-1));
        assert!(e.is_tag_extractor());
        assert!(e.is_dynamic());
        assert!(!e.is_local());
    }

    #[test]
    fn test_continuous_tag_conjunction_both_sides() {
        let (c, h) = full();
        let left = Extractor::continuous_tag_conjunction(-2);
        assert_eq!(left.extract(&h, &c).unwrap(), "DT!JJ");
        assert_eq!((left.left_context(), left.right_context()), (2, 0));

        let right = Extractor::continuous_tag_conjunction(2);
        // da ponta distante em direção ao cursor
        assert_eq!(right.extract(&h, &c).unwrap(), "RB!VBZ");
        assert_eq!((right.left_context(), right.right_context()), (0, 2));
    }

    #[test]
    fn test_three_tags_sorted() {
        let (c, h) = full();
        let e = Extractor::three_tags(1, -2, -1);
        assert_eq!(
            e,
            Extractor::ThreeTags {
                first: -2,
                second: -1,
                third: 1
            }
        );
        assert_eq!(e.extract(&h, &c).unwrap(), "DT!JJ!VBZ");
        assert_eq!((e.left_context(), e.right_context()), (2, 1));
    }

    #[test]
    fn test_word_two_tags_keeps_both_positions() {
        // Regressão: as duas posições de tag precisam sobreviver à ordenação,
        // sem que uma sobrescreva a outra.
        let (c, h) = full();
        let e = Extractor::word_two_tags(0, -2, 1);
        assert_eq!(e, Extractor::word_two_tags(0, 1, -2));
        assert_eq!(
            e,
            Extractor::WordTwoTags {
                word: 0,
                left_tag: -2,
                right_tag: 1
            }
        );
        assert_eq!(e.extract(&h, &c).unwrap(), "DT!dog!VBZ");
        assert_eq!((e.left_context(), e.right_context()), (2, 1));
    }

    #[test]
    fn test_two_words_tag() {
        let (c, h) = setup();
        let e = Extractor::two_words_tag(1, -1, -1);
        assert_eq!(e.extract(&h, &c).unwrap(), "old!JJ!barks");
        assert_eq!((e.left_context(), e.right_context()), (1, 0));
    }

    #[test]
    fn test_dynamic_rule_needs_hypothesis() {
        let (c, h) = setup();
        let e = Extractor::two_tags(-1, 1);
        assert!(matches!(
            e.extract(&h, &c),
            Err(FramesError::TagUnassigned { position: 3 })
        ));
    }

    #[test]
    fn test_cword_cap_case() {
        let c = TaggedCorpus::from(vec![Sentence::new(["Paris", "is", "nice"])]);
        let e = Extractor::cword_cap_case();
        assert!(e.is_local());
        assert!(!e.is_dynamic());
        assert_eq!(e.extract(&History::new(0, 0), &c).unwrap(), "Paris");
        assert_eq!(e.extract(&History::new(0, 1), &c).unwrap(), ZERO);
    }

    #[test]
    fn test_verbal_vbn_zero() {
        let c = TaggedCorpus::from(vec![
            Sentence::new(["it", "has", "been", "eaten"]),
            Sentence::new(["has", "and", "walked"]),
            Sentence::new(["they", "walked"]),
        ]);
        let e = Extractor::verbal_vbn_zero(4);
        assert_eq!(e.extract(&History::new(0, 3), &c).unwrap(), "1");
        // conjunção interrompe a busca
        assert_eq!(e.extract(&History::new(1, 2), &c).unwrap(), "0");
        assert_eq!(e.extract(&History::new(2, 1), &c).unwrap(), "0");
        // palavra corrente sem sufixo de particípio
        assert_eq!(e.extract(&History::new(0, 1), &c).unwrap(), "0");
        assert!(!e.is_dynamic());
        assert_eq!(e.word_offsets(), vec![0, -1, -2, -3, -4]);
    }

    #[test]
    fn test_word_shapes() {
        let c = TaggedCorpus::from(vec![Sentence::new(["in", "Foo5", "Inc."])]);
        let h = History::new(0, 1);
        let single = Extractor::word_shape(0, "chris2").unwrap();
        assert!(single.is_local());
        assert_eq!(single.extract(&h, &c).unwrap(), "Xxxd");

        let conj = Extractor::word_shape_conjunction(-1, 1, "chris4").unwrap();
        assert!(!conj.is_local());
        assert!(!conj.is_dynamic());
        assert_eq!(conj.extract(&h, &c).unwrap(), "xx|Xxxd|Xxx.");
        assert_eq!(conj.position(), None);

        assert!(Extractor::word_shape(0, "nope").is_err());
    }

    #[test]
    fn test_locality() {
        assert!(Extractor::word(0).is_local());
        assert!(!Extractor::word(1).is_local());
        assert!(!Extractor::tag(-1).is_local());
        assert!(!Extractor::two_words(0, 0).is_local());
        assert!(Extractor::lowercase_word(0).is_local());
    }

    #[test]
    fn test_display() {
        assert_eq!(Extractor::two_tags(1, -1).to_string(), "TwoTags(t-1,t1)");
        assert_eq!(Extractor::word_tag(0, -1).to_string(), "WordTag(w0,t-1)");
        assert_eq!(
            Extractor::word_shape(-1, "chris2").unwrap().to_string(),
            "WordShape(w-1,chris2)"
        );
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let json = serde_json::to_string(&Extractor::two_tags(-1, 1)).unwrap();
        assert_eq!(json, r#"{"kind":"two_tags","left":-1,"right":1}"#);
    }

    #[test]
    fn test_context_of_extreme_offsets() {
        let e = Extractor::tag(i32::MIN);
        assert_eq!(e.left_context(), i32::MIN.unsigned_abs() as usize);
        assert_eq!(e.right_context(), 0);
        let e = Extractor::two_tags(i32::MIN, i32::MAX);
        assert_eq!(e.right_context(), i32::MAX as usize);
    }

    #[test]
    fn test_rules_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Extractor>();
    }
}
