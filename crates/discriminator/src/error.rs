// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and discriminator inference.

/// Errors raised while loading a discriminator or running it.
#[derive(Debug, thiserror::Error)]
pub enum DiscriminatorError {
    /// A file could not be fetched from the Hugging Face Hub.
    #[error("hub download failed for '{model}' ({file}): {detail}")]
    Hub {
        model: String,
        file: String,
        detail: String,
    },

    /// A required model file is missing from a local model directory.
    #[error("model file not found: {path}")]
    MissingFile { path: String },

    /// A model file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// `config.json` is malformed or describes an unsupported model.
    #[error("invalid model config: {0}")]
    InvalidConfig(String),

    /// The tokenizer could not be loaded or rejected the input.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A tensor operation failed while loading weights or running the model.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// The tokenized input exceeds the model's position embedding table.
    #[error("sequence of {tokens} tokens exceeds the model limit of {max}")]
    SequenceTooLong { tokens: usize, max: usize },
}
