//! # Configuração
//!
//! A arquitetura normalmente chega junto com o resto da configuração do
//! tagger. Aqui só nos interessa a parte que alimenta o compilador.
//!
//! ```json
//! { "arch": "bidirectional5words,allwordshapes(-1,1)", "expand_macros": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frames::{CompiledFrames, FrameCompiler};

/// Arquitetura usada quando nenhuma é informada.
pub const DEFAULT_ARCH: &str = "left3words";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramesConfig {
    /// String de arquitetura (macros permitidas).
    pub arch: String,
    /// Expande `left3words`, `bidirectional`... antes de compilar.
    pub expand_macros: bool,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            arch: DEFAULT_ARCH.to_string(),
            expand_macros: true,
        }
    }
}

impl FramesConfig {
    pub fn new(arch: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            ..Self::default()
        }
    }

    /// Lê a configuração de um JSON; campos ausentes usam o padrão.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn compiler(&self) -> FrameCompiler {
        FrameCompiler {
            expand_macros: self.expand_macros,
        }
    }

    pub fn compile(&self) -> Result<CompiledFrames> {
        self.compiler().compile(&self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramesError;

    #[test]
    fn test_defaults() {
        let config = FramesConfig::from_json("{}").unwrap();
        assert_eq!(config, FramesConfig::default());
        assert_eq!(config.compile().unwrap().extractors.len(), 5);
    }

    #[test]
    fn test_from_json() {
        let config =
            FramesConfig::from_json(r#"{"arch": "words(-2,2)", "expand_macros": false}"#).unwrap();
        assert_eq!(config.arch, "words(-2,2)");
        assert!(!config.compiler().expand_macros);
        assert_eq!(config.compile().unwrap().extractors.len(), 5);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            FramesConfig::from_json("{\"arch\": 3}"),
            Err(FramesError::Config(_))
        ));
    }
}
