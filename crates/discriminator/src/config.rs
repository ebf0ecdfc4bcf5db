// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ELECTRA architecture description, deserialized from `config.json`.
//!
//! Only the fields the forward pass needs are read; dropout rates,
//! initializer ranges and the like are ignored.
//!
//! # Format
//! ```json
//! {
//!   "model_type": "electra",
//!   "architectures": ["ElectraForPreTraining"],
//!   "embedding_size": 128,
//!   "hidden_size": 256,
//!   "num_hidden_layers": 12,
//!   "num_attention_heads": 4,
//!   "intermediate_size": 1024,
//!   "hidden_act": "gelu",
//!   "max_position_embeddings": 512,
//!   "type_vocab_size": 2,
//!   "vocab_size": 30522,
//!   "layer_norm_eps": 1e-12
//! }
//! ```

use crate::DiscriminatorError;
use candle_core::Tensor;
use std::path::Path;

/// Activation used in the feed-forward blocks and the discriminator head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenAct {
    /// Exact (erf-based) GELU.
    Gelu,
    /// Tanh approximation of GELU.
    GeluNew,
    Relu,
}

impl HiddenAct {
    pub(crate) fn apply(self, x: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            Self::Gelu => x.gelu_erf(),
            Self::GeluNew => x.gelu(),
            Self::Relu => x.relu(),
        }
    }
}

/// Architecture hyper-parameters of an ELECTRA discriminator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ElectraConfig {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// Width of the token embeddings. Smaller than `hidden_size` for the
    /// small variant, in which case a projection follows the embeddings.
    pub embedding_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    #[serde(default = "default_act")]
    pub hidden_act: HiddenAct,
    #[serde(default = "default_max_positions")]
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab")]
    pub type_vocab_size: usize,
    pub vocab_size: usize,
    #[serde(default = "default_eps")]
    pub layer_norm_eps: f64,
}

fn default_model_type() -> String {
    "electra".to_string()
}

fn default_act() -> HiddenAct {
    HiddenAct::Gelu
}

fn default_max_positions() -> usize {
    512
}

fn default_type_vocab() -> usize {
    2
}

fn default_eps() -> f64 {
    1e-12
}

impl ElectraConfig {
    /// Reads and validates a `config.json` file.
    pub fn from_file(path: &Path) -> Result<Self, DiscriminatorError> {
        let content = std::fs::read_to_string(path).map_err(|e| DiscriminatorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parses and validates a `config.json` string.
    pub fn from_json(json: &str) -> Result<Self, DiscriminatorError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DiscriminatorError::InvalidConfig(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the hyper-parameters describe a buildable model.
    pub fn validate(&self) -> Result<(), DiscriminatorError> {
        if self.model_type != "electra" {
            return Err(DiscriminatorError::InvalidConfig(format!(
                "unsupported model_type '{}', expected 'electra'",
                self.model_type
            )));
        }
        if self.num_attention_heads == 0 || self.hidden_size % self.num_attention_heads != 0 {
            return Err(DiscriminatorError::InvalidConfig(format!(
                "hidden_size {} is not divisible by num_attention_heads {}",
                self.hidden_size, self.num_attention_heads
            )));
        }
        if self.embedding_size == 0 || self.vocab_size == 0 || self.max_position_embeddings == 0 {
            return Err(DiscriminatorError::InvalidConfig(
                "embedding_size, vocab_size and max_position_embeddings must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Per-head dimension of the self-attention blocks.
    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_attention_heads
    }

    /// Whether the embeddings are projected up to `hidden_size`.
    pub fn has_embedding_projection(&self) -> bool {
        self.embedding_size != self.hidden_size
    }

    /// Human-readable summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "electra: {} layers, hidden {}, {} heads, embeddings {}{}",
            self.num_hidden_layers,
            self.hidden_size,
            self.num_attention_heads,
            self.embedding_size,
            if self.has_embedding_projection() {
                " (projected)"
            } else {
                ""
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CONFIG: &str = r#"{
        "architectures": ["ElectraForPreTraining"],
        "attention_probs_dropout_prob": 0.1,
        "embedding_size": 128,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "hidden_size": 256,
        "initializer_range": 0.02,
        "intermediate_size": 1024,
        "layer_norm_eps": 1e-12,
        "max_position_embeddings": 512,
        "model_type": "electra",
        "num_attention_heads": 4,
        "num_hidden_layers": 12,
        "pad_token_id": 0,
        "type_vocab_size": 2,
        "vocab_size": 30522
    }"#;

    #[test]
    fn test_parse_small_config() {
        let c = ElectraConfig::from_json(SMALL_CONFIG).unwrap();
        assert_eq!(c.hidden_size, 256);
        assert_eq!(c.embedding_size, 128);
        assert_eq!(c.hidden_act, HiddenAct::Gelu);
        assert_eq!(c.head_dim(), 64);
        assert!(c.has_embedding_projection());
        assert!(c.summary().contains("(projected)"));
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{
            "embedding_size": 768, "hidden_size": 768, "num_hidden_layers": 12,
            "num_attention_heads": 12, "intermediate_size": 3072, "vocab_size": 30522
        }"#;
        let c = ElectraConfig::from_json(json).unwrap();
        assert_eq!(c.model_type, "electra");
        assert_eq!(c.max_position_embeddings, 512);
        assert_eq!(c.type_vocab_size, 2);
        assert!(!c.has_embedding_projection());
    }

    #[test]
    fn test_gelu_new_activation() {
        let json = SMALL_CONFIG.replace("\"gelu\"", "\"gelu_new\"");
        let c = ElectraConfig::from_json(&json).unwrap();
        assert_eq!(c.hidden_act, HiddenAct::GeluNew);
    }

    #[test]
    fn test_rejects_indivisible_heads() {
        let json = SMALL_CONFIG.replace("\"num_attention_heads\": 4", "\"num_attention_heads\": 3");
        assert!(matches!(
            ElectraConfig::from_json(&json),
            Err(DiscriminatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_other_model_type() {
        let json = SMALL_CONFIG.replace("\"electra\"", "\"bert\"");
        assert!(ElectraConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ElectraConfig::from_json("{ not json"),
            Err(DiscriminatorError::InvalidConfig(_))
        ));
    }
}
