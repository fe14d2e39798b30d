//! # Inspeção de Arquiteturas com Eventos Observáveis
//!
//! Compila uma arquitetura e aplica todas as regras a uma sentença, emitindo
//! eventos por um canal (`mpsc`) para que o servidor web possa transmitir o
//! progresso ao cliente posição por posição.
//!
//! Regras dinâmicas cuja janela de contexto ainda não tem tags viram uma
//! entrada com `error` preenchido: a inspeção mostra isso em vez de abortar.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractor::Extractor;
use crate::extractors::Extractors;
use crate::frames::{CompiledFrames, FrameCompiler, Warning};
use crate::history::{History, Sentence, SequenceStore, TaggedCorpus};

/// Descrição de uma regra compilada, para exibição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub index: usize,
    /// Ex.: `TwoTags(t-1,t1)`.
    pub name: String,
    pub kind: String,
    pub left_context: usize,
    pub right_context: usize,
    pub local: bool,
    pub dynamic: bool,
}

impl RuleInfo {
    pub fn new(index: usize, rule: &Extractor) -> Self {
        Self {
            index,
            name: rule.to_string(),
            kind: rule.kind().to_string(),
            left_context: rule.left_context(),
            right_context: rule.right_context(),
            local: rule.is_local(),
            dynamic: rule.is_dynamic(),
        }
    }
}

/// Resultado de uma regra em uma posição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureKey {
    pub rule: usize,
    pub key: Option<String>,
    pub error: Option<String>,
}

/// Eventos emitidos durante a inspeção.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InspectEvent {
    /// **Passo 1**: arquitetura compilada.
    Compiled {
        rules: Vec<RuleInfo>,
        warnings: Vec<Warning>,
        left_context: usize,
        right_context: usize,
    },
    /// **Passo 2** (loop): chaves de todas as regras em uma posição.
    PositionExtracted {
        position: usize,
        word: String,
        features: Vec<FeatureKey>,
    },
    /// **Conclusão**.
    Done {
        total_positions: usize,
        processing_ms: u64,
    },
    /// Erro fatal de configuração.
    Error { message: String },
}

/// Resultado síncrono da inspeção.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inspection {
    pub rules: Vec<RuleInfo>,
    pub warnings: Vec<Warning>,
    pub positions: Vec<Vec<FeatureKey>>,
}

/// Descreve todas as regras de uma compilação.
pub fn describe(compiled: &CompiledFrames) -> Vec<RuleInfo> {
    compiled
        .extractors
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleInfo::new(i, rule))
        .collect()
}

/// Aplica cada regra no cursor `h`, guardando a chave ou o erro.
pub fn feature_keys<S>(rules: &Extractors, h: &History, store: &S) -> Vec<FeatureKey>
where
    S: SequenceStore + ?Sized,
{
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| match rule.extract(h, store) {
            Ok(key) => FeatureKey {
                rule: i,
                key: Some(key),
                error: None,
            },
            Err(e) => FeatureKey {
                rule: i,
                key: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Inspector {
    pub compiler: FrameCompiler,
}

impl Inspector {
    pub fn new(compiler: FrameCompiler) -> Self {
        Self { compiler }
    }

    /// Versão síncrona: consome os eventos e devolve o resultado consolidado.
    pub fn inspect(&self, arch: &str, sentence: Sentence) -> Result<Inspection> {
        let compiled = self.compiler.compile(arch)?;
        let (tx, rx) = mpsc::channel();
        self.inspect_compiled(&compiled, sentence, &tx, Instant::now());
        drop(tx);

        let mut inspection = Inspection::default();
        for event in rx {
            match event {
                InspectEvent::Compiled {
                    rules, warnings, ..
                } => {
                    inspection.rules = rules;
                    inspection.warnings = warnings;
                }
                InspectEvent::PositionExtracted { features, .. } => {
                    inspection.positions.push(features)
                }
                InspectEvent::Done { .. } | InspectEvent::Error { .. } => {}
            }
        }
        Ok(inspection)
    }

    /// Compila e envia os eventos pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `Compiled` (ou `Error`, encerrando o fluxo).
    /// 2. `PositionExtracted` para cada palavra.
    /// 3. `Done`.
    pub fn inspect_streaming(&self, arch: &str, sentence: Sentence, tx: mpsc::Sender<InspectEvent>) {
        let start = Instant::now();
        match self.compiler.compile(arch) {
            Ok(compiled) => self.inspect_compiled(&compiled, sentence, &tx, start),
            Err(e) => {
                let _ = tx.send(InspectEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    fn inspect_compiled(
        &self,
        compiled: &CompiledFrames,
        sentence: Sentence,
        tx: &mpsc::Sender<InspectEvent>,
        start: Instant,
    ) {
        let rules = &compiled.extractors;
        let _ = tx.send(InspectEvent::Compiled {
            rules: describe(compiled),
            warnings: compiled.warnings.clone(),
            left_context: rules.left_context(),
            right_context: rules.right_context(),
        });

        let words = sentence.words.clone();
        let corpus = TaggedCorpus::from(vec![sentence]);
        for (position, word) in words.into_iter().enumerate() {
            let features = feature_keys(rules, &History::new(0, position), &corpus);
            let _ = tx.send(InspectEvent::PositionExtracted {
                position,
                word,
                features,
            });
        }

        let _ = tx.send(InspectEvent::Done {
            total_positions: corpus.sentence(0).map_or(0, Sentence::len),
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}
