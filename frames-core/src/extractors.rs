//! # Conjunto Compilado de Extratores
//!
//! O motor de treino/decodificação não olha só regra a regra: ele precisa da
//! janela de contexto **global** (o maior `left_context`/`right_context`) e de
//! uma partição das regras por custo de avaliação:
//!
//! - **locais**: só leem a palavra corrente, podem ser pré-computadas por palavra;
//! - **contexto local**: leem palavras vizinhas, pré-computáveis por sentença;
//! - **dinâmicas**: leem tags hipotetizadas, recomputadas a cada hipótese.

use std::ops::Index;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractor::Extractor;
use crate::history::{History, SequenceStore};

/// Lista ordenada e imutável de regras. O índice de cada regra é a sua
/// identidade no modelo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extractors {
    rules: Vec<Extractor>,
}

impl Extractors {
    pub fn new(rules: Vec<Extractor>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Extractor> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Extractor> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Extractor] {
        &self.rules
    }

    pub fn into_vec(self) -> Vec<Extractor> {
        self.rules
    }

    /// Maior `left_context` entre todas as regras.
    pub fn left_context(&self) -> usize {
        self.rules.iter().map(Extractor::left_context).max().unwrap_or(0)
    }

    /// Maior `right_context` entre todas as regras.
    pub fn right_context(&self) -> usize {
        self.rules.iter().map(Extractor::right_context).max().unwrap_or(0)
    }

    /// Índices das regras locais.
    pub fn local(&self) -> Vec<usize> {
        self.indices(|e| e.is_local())
    }

    /// Índices das regras estáticas que leem vizinhos.
    pub fn local_context(&self) -> Vec<usize> {
        self.indices(|e| !e.is_local() && !e.is_dynamic())
    }

    /// Índices das regras que dependem de tags hipotetizadas.
    pub fn dynamic(&self) -> Vec<usize> {
        self.indices(Extractor::is_dynamic)
    }

    fn indices(&self, keep: impl Fn(&Extractor) -> bool) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Uma chave por regra, na ordem das regras.
    pub fn extract<S>(&self, h: &History, store: &S) -> Result<Vec<String>>
    where
        S: SequenceStore + ?Sized,
    {
        self.rules.iter().map(|e| e.extract(h, store)).collect()
    }

    /// Chaves de todas as regras não dinâmicas em cada cursor, em paralelo.
    ///
    /// Cada elemento do resultado corresponde a um cursor de `histories` e
    /// contém pares `(índice da regra, chave)`. As regras são compartilhadas
    /// somente leitura entre as threads do rayon.
    pub fn extract_static_par<S>(
        &self,
        histories: &[History],
        store: &S,
    ) -> Result<Vec<Vec<(usize, String)>>>
    where
        S: SequenceStore + Sync + ?Sized,
    {
        let statics: Vec<usize> = self.indices(|e| !e.is_dynamic());
        histories
            .par_iter()
            .map(|h| {
                statics
                    .iter()
                    .map(|&i| self.rules[i].extract(h, store).map(|key| (i, key)))
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }
}

impl Index<usize> for Extractors {
    type Output = Extractor;

    fn index(&self, index: usize) -> &Extractor {
        &self.rules[index]
    }
}

impl<'a> IntoIterator for &'a Extractors {
    type Item = &'a Extractor;
    type IntoIter = std::slice::Iter<'a, Extractor>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Extractor> for Extractors {
    fn from_iter<I: IntoIterator<Item = Extractor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Extractor>> for Extractors {
    fn from(rules: Vec<Extractor>) -> Self {
        Self::new(rules)
    }
}
