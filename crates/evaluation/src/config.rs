// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Evaluation configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! provider = "hub"
//! models = [
//!     "google/electra-small-discriminator",
//!     "google/electra-base-discriminator",
//! ]
//! sentences = ["time is 6 am", "dog barked"]
//!
//! [[references]]
//! sentence = "dog barked"
//! genuine = true
//!
//! [hub]
//! cache_dir = "/var/cache/hf"
//! revision = "main"
//! ```

use crate::EvalError;
use discriminator::{HubSettings, ModelId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Models evaluated when no list is configured, smallest first.
pub const DEFAULT_MODELS: [&str; 3] = [
    "google/electra-small-discriminator",
    "google/electra-base-discriminator",
    "google/electra-large-discriminator",
];

/// Sentences evaluated when no list is configured.
pub const DEFAULT_SENTENCES: [&str; 5] = [
    "time is 6 am",
    "clock shows time as 25pm",
    "triangle has three corners",
    "dog barked",
    "adam said hello [SEP] eve responded how are you",
];

/// Where models come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hugging Face Hub download (cached).
    #[default]
    Hub,
    /// Model ids are local directories.
    Local,
}

/// A ground-truth label for one sentence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reference {
    pub sentence: String,
    /// `true` if the sentence is unmodified, `false` if a token was replaced.
    pub genuine: bool,
}

/// Configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Directory that local model ids are resolved against.
    #[serde(default)]
    pub local_root: Option<PathBuf>,
    /// Models in evaluation order.
    pub models: Vec<ModelId>,
    /// Sentences in evaluation order.
    pub sentences: Vec<String>,
    /// Optional labels used only for the agreement report.
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub hub: HubSettings,
}

impl EvaluationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, EvalError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, EvalError> {
        toml::from_str(toml_str)
            .map_err(|e| EvalError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, EvalError> {
        toml::to_string_pretty(self)
            .map_err(|e| EvalError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks the lists for blank or duplicate entries.
    ///
    /// Empty lists are allowed and produce an empty result table.
    pub fn validate(&self) -> Result<(), EvalError> {
        validate_inputs(&self.models, &self.sentences)?;

        let mut seen = HashSet::new();
        for r in &self.references {
            if !seen.insert(r.sentence.as_str()) {
                return Err(EvalError::Config(format!(
                    "duplicate reference for sentence '{}'",
                    r.sentence
                )));
            }
        }
        Ok(())
    }
}

/// Rejects blank model ids and duplicate models or sentences, which would
/// otherwise produce duplicate (model, sentence) rows.
pub fn validate_inputs(models: &[ModelId], sentences: &[String]) -> Result<(), EvalError> {
    let mut seen_models = HashSet::new();
    for m in models {
        if m.as_str().trim().is_empty() {
            return Err(EvalError::Config("blank model identifier".into()));
        }
        if !seen_models.insert(m) {
            return Err(EvalError::Config(format!("duplicate model '{m}'")));
        }
    }

    let mut seen_sentences = HashSet::new();
    for s in sentences {
        if !seen_sentences.insert(s.as_str()) {
            return Err(EvalError::Config(format!("duplicate sentence '{s}'")));
        }
    }
    Ok(())
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Hub,
            local_root: None,
            models: DEFAULT_MODELS.iter().map(|m| ModelId::from(*m)).collect(),
            sentences: DEFAULT_SENTENCES.iter().map(|s| s.to_string()).collect(),
            references: Vec::new(),
            hub: HubSettings::default(),
        }
    }
}
