//! # Histórico e Armazenamento de Sequências
//!
//! Um extrator nunca enxerga a sentença inteira: ele recebe um **cursor**
//! ([`History`]) dizendo "onde" estamos e pede palavras ou tags por
//! deslocamento relativo a esse ponto.
//!
//! ```text
//!  posição:   0      1       2
//!  palavra:  The    dog    barks
//!  tag:      DT     ???     ???
//!                    ^ cursor (offset 0)
//!  word_at(-1) = "The"   tag_at(-1) = "DT"   tag_at(1) -> TagUnassigned
//! ```
//!
//! Posições antes do início ou depois do fim da sentença são lidas como o
//! símbolo de fronteira [`NA`]. Já uma tag *dentro* da sentença que ainda não
//! foi hipotetizada é um erro: significa que o motor de busca invocou um
//! extrator sem o contexto declarado em `left_context`/`right_context`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FramesError, Result};

/// Símbolo de fronteira para posições fora da sentença.
pub const NA: &str = "NA";

/// Cursor de extração: sentença e posição dentro dela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct History {
    /// Índice da sentença no armazenamento.
    pub sentence: usize,
    /// Posição (0-based) do token corrente na sentença.
    pub position: usize,
}

impl History {
    pub fn new(sentence: usize, position: usize) -> Self {
        Self { sentence, position }
    }
}

/// Contrato consumido pelos extratores.
///
/// Implementações devem ser somente leitura durante a extração; os extratores
/// são compartilhados entre threads e podem ser chamados em qualquer ordem.
pub trait SequenceStore {
    /// Palavra no deslocamento `offset` a partir do cursor.
    fn word_at(&self, h: &History, offset: i32) -> Result<&str>;
    /// Tag (ouro ou hipotetizada) no deslocamento `offset` a partir do cursor.
    fn tag_at(&self, h: &History, offset: i32) -> Result<&str>;
}

/// Uma sentença com palavras e tags paralelas.
///
/// `tags[i] == None` significa que a posição `i` ainda não recebeu tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub words: Vec<String>,
    pub tags: Vec<Option<String>>,
}

impl Sentence {
    /// Sentença sem nenhuma tag atribuída.
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let tags = vec![None; words.len()];
        Self { words, tags }
    }

    /// Sentença totalmente anotada (treino com tags ouro).
    ///
    /// Se houver menos tags que palavras, as posições restantes ficam sem tag.
    pub fn with_tags<S, T>(
        words: impl IntoIterator<Item = S>,
        tags: impl IntoIterator<Item = T>,
    ) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        let mut sentence = Self::new(words);
        for (slot, tag) in sentence.tags.iter_mut().zip(tags) {
            *slot = Some(tag.into());
        }
        sentence
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Atribui (ou troca) a tag hipotetizada de uma posição.
    ///
    /// Devolve `false`, sem alterar nada, quando `position` está fora da
    /// sentença.
    pub fn set_tag(&mut self, position: usize, tag: impl Into<String>) -> bool {
        match self.tags.get_mut(position) {
            Some(slot) => {
                *slot = Some(tag.into());
                true
            }
            None => {
                debug!(position, len = self.words.len(), "tag fora da sentença descartada");
                false
            }
        }
    }

    /// Sentença com as tags parciais de `tags` (`None` deixa a posição sem
    /// tag). Mais tags do que palavras é erro.
    pub fn with_partial_tags<S: Into<String>>(
        words: impl IntoIterator<Item = S>,
        tags: Vec<Option<String>>,
    ) -> Result<Self> {
        let mut sentence = Self::new(words);
        if tags.len() > sentence.len() {
            return Err(FramesError::TooManyTags {
                words: sentence.len(),
                tags: tags.len(),
            });
        }
        for (slot, tag) in sentence.tags.iter_mut().zip(tags) {
            *slot = tag;
        }
        Ok(sentence)
    }

    /// Desfaz as hipóteses a partir de `position` (inclusive).
    pub fn clear_tags_from(&mut self, position: usize) {
        for slot in self.tags.iter_mut().skip(position) {
            *slot = None;
        }
    }

    /// Resolve `position + offset`; `None` quando cai fora da sentença.
    fn resolve(&self, position: usize, offset: i32) -> Option<usize> {
        let target = position as i64 + i64::from(offset);
        if target < 0 || target >= self.words.len() as i64 {
            None
        } else {
            Some(target as usize)
        }
    }
}

/// Armazenamento em memória de várias sentenças.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedCorpus {
    sentences: Vec<Sentence>,
}

impl TaggedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona uma sentença e devolve seu índice.
    pub fn push(&mut self, sentence: Sentence) -> usize {
        self.sentences.push(sentence);
        self.sentences.len() - 1
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentence_mut(&mut self, index: usize) -> Option<&mut Sentence> {
        self.sentences.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Todos os cursores de uma sentença, em ordem.
    pub fn histories(&self, sentence: usize) -> impl Iterator<Item = History> + '_ {
        let len = self.sentences.get(sentence).map_or(0, Sentence::len);
        (0..len).map(move |position| History::new(sentence, position))
    }

    fn checked(&self, h: &History) -> Result<&Sentence> {
        match self.sentences.get(h.sentence) {
            Some(s) if h.position < s.len() => Ok(s),
            _ => Err(FramesError::CursorOutOfRange {
                sentence: h.sentence,
                position: h.position,
            }),
        }
    }
}

impl From<Vec<Sentence>> for TaggedCorpus {
    fn from(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }
}

impl SequenceStore for TaggedCorpus {
    fn word_at(&self, h: &History, offset: i32) -> Result<&str> {
        let sentence = self.checked(h)?;
        Ok(match sentence.resolve(h.position, offset) {
            Some(i) => sentence.words[i].as_str(),
            None => NA,
        })
    }

    fn tag_at(&self, h: &History, offset: i32) -> Result<&str> {
        let sentence = self.checked(h)?;
        match sentence.resolve(h.position, offset) {
            Some(i) => sentence.tags[i]
                .as_deref()
                .ok_or(FramesError::TagUnassigned { position: i }),
            None => Ok(NA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> TaggedCorpus {
        let mut s = Sentence::new(["The", "dog", "barks"]);
        s.set_tag(0, "DT");
        TaggedCorpus::from(vec![s])
    }

    #[test]
    fn test_word_offsets_and_boundaries() {
        let c = corpus();
        let h = History::new(0, 1);
        assert_eq!(c.word_at(&h, -1).unwrap(), "The");
        assert_eq!(c.word_at(&h, 0).unwrap(), "dog");
        assert_eq!(c.word_at(&h, 1).unwrap(), "barks");
        assert_eq!(c.word_at(&h, -2).unwrap(), NA);
        assert_eq!(c.word_at(&h, 2).unwrap(), NA);
    }

    #[test]
    fn test_unassigned_tag_fails_loudly() {
        let c = corpus();
        let h = History::new(0, 1);
        assert_eq!(c.tag_at(&h, -1).unwrap(), "DT");
        assert!(matches!(
            c.tag_at(&h, 1),
            Err(FramesError::TagUnassigned { position: 2 })
        ));
        // fora da sentença é fronteira, não erro
        assert_eq!(c.tag_at(&h, -5).unwrap(), NA);
    }

    #[test]
    fn test_cursor_out_of_range() {
        let c = corpus();
        assert!(matches!(
            c.word_at(&History::new(0, 3), 0),
            Err(FramesError::CursorOutOfRange { .. })
        ));
        assert!(c.word_at(&History::new(1, 0), 0).is_err());
    }

    #[test]
    fn test_with_tags_and_clear() {
        let mut s = Sentence::with_tags(["a", "b", "c"], ["X", "Y"]);
        assert_eq!(s.tags, vec![Some("X".into()), Some("Y".into()), None]);
        s.clear_tags_from(1);
        assert_eq!(s.tags, vec![Some("X".into()), None, None]);
    }

    #[test]
    fn test_set_tag_out_of_range_is_reported() {
        let mut s = Sentence::new(["a", "b"]);
        assert!(s.set_tag(1, "X"));
        assert!(!s.set_tag(2, "Y"));
        assert_eq!(s.tags, vec![None, Some("X".into())]);
    }

    #[test]
    fn test_with_partial_tags() {
        let s = Sentence::with_partial_tags(["a", "b", "c"], vec![Some("X".into()), None]).unwrap();
        assert_eq!(s.tags, vec![Some("X".into()), None, None]);
        assert!(matches!(
            Sentence::with_partial_tags(["a"], vec![None, Some("Y".into())]),
            Err(FramesError::TooManyTags { words: 1, tags: 2 })
        ));
    }

    #[test]
    fn test_histories() {
        let c = corpus();
        let hs: Vec<History> = c.histories(0).collect();
        assert_eq!(hs.len(), 3);
        assert_eq!(hs[2], History::new(0, 2));
        assert_eq!(c.histories(7).count(), 0);
    }
}
