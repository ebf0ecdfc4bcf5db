// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sentence tokenization backed by a `tokenizer.json` file.

use crate::{DiscriminatorError, Encoded, SentenceEncoder};
use std::path::Path;
use tokenizers::Tokenizer;

/// WordPiece tokenizer loaded from a Hugging Face `tokenizer.json`.
///
/// Adds `[CLS]`/`[SEP]` around the input, so the discriminator scores
/// those tokens too. A literal `[SEP]` inside the sentence is kept as the
/// separator token.
pub struct HfSentenceEncoder {
    tokenizer: Tokenizer,
}

impl HfSentenceEncoder {
    pub fn from_file(path: &Path) -> Result<Self, DiscriminatorError> {
        if !path.exists() {
            return Err(DiscriminatorError::MissingFile {
                path: path.display().to_string(),
            });
        }
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            DiscriminatorError::Tokenizer(format!("cannot load '{}': {e}", path.display()))
        })?;
        Ok(Self { tokenizer })
    }

    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

impl SentenceEncoder for HfSentenceEncoder {
    fn encode(&self, sentence: &str) -> Result<Encoded, DiscriminatorError> {
        let encoding = self
            .tokenizer
            .encode(sentence, true)
            .map_err(|e| DiscriminatorError::Tokenizer(format!("tokenization failed: {e}")))?;

        Ok(Encoded {
            ids: encoding.get_ids().to_vec(),
            tokens: encoding.get_tokens().to_vec(),
        })
    }
}
