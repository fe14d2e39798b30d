//! # frames-core: Compilador de Arquiteturas de Features para Taggers de Sequência
//!
//! Um tagger de classes gramaticais (CMM/MaxEnt) descreve as features que usa
//! por uma **string de arquitetura**, por exemplo
//! `"bidirectional5words,allwordshapes(-1,1)"`. Este crate compila essa
//! string em uma lista ordenada de regras ([`Extractor`]) e avalia cada regra
//! sobre um cursor em uma sentença, produzindo a chave textual da feature.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Macros** ([`macros`]): `left3words`, `bidirectional`... viram listas de tokens.
//! 2.  **Tokenização** ([`token`]): separação por vírgulas de nível superior e leitura dos argumentos.
//! 3.  **Compilação** ([`frames`]): cada palavra-chave gera uma ou mais regras, na ordem dos tokens.
//! 4.  **Regras** ([`extractor`]): deslocamentos, janela de contexto, localidade e dinamismo.
//! 5.  **Extração** ([`extractors`], [`history`]): chaves por cursor, com fronteira `NA`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use frames_core::{compile, History, Sentence, SequenceStore, TaggedCorpus};
//!
//! let compiled = compile("words(-1,1),twoTags(-1,1)").unwrap();
//! let rules = compiled.extractors;
//! assert_eq!(rules.len(), 4);
//! assert_eq!((rules.left_context(), rules.right_context()), (1, 1));
//!
//! let corpus = TaggedCorpus::from(vec![Sentence::with_tags(
//!     ["I", "saw", "it"],
//!     ["PRP", "VBD", "PRP"],
//! )]);
//! let keys = rules.extract(&History::new(0, 1), &corpus).unwrap();
//! assert_eq!(keys, vec!["I", "saw", "it", "PRP!PRP"]);
//! assert_eq!(corpus.word_at(&History::new(0, 0), -1).unwrap(), "NA");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`frames`]: o compilador e a política para tokens desconhecidos.
//! - [`extractor`]: o catálogo fechado de regras.
//! - [`shape`]: esquemas de forma de palavra (`chris2`, `chris4`...).
//! - [`inspect`]: inspeção passo a passo com eventos, usada pelo servidor web.

pub mod config;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod frames;
pub mod history;
pub mod inspect;
pub mod macros;
pub mod shape;
pub mod token;

pub use config::FramesConfig;
pub use error::{FramesError, Result};
pub use extractor::Extractor;
pub use extractors::Extractors;
pub use frames::{compile, CompiledFrames, FrameCompiler, Warning};
pub use history::{History, Sentence, SequenceStore, TaggedCorpus, NA};
pub use inspect::{InspectEvent, Inspector};
pub use shape::WordShaper;
