// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tokenized inputs and raw discriminator outputs.

/// A sentence after tokenization, special tokens included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Encoded {
    pub ids: Vec<u32>,
    /// Token strings aligned with `ids`, kept for display.
    pub tokens: Vec<String>,
}

impl Encoded {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Raw result of one discriminator call: one logit per input token.
///
/// A positive score means the model judged that token to be replaced.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct InferenceOutput {
    pub scores: Vec<f32>,
    /// Token strings aligned with `scores`. May be empty when the
    /// discriminator was called without them.
    pub tokens: Vec<String>,
}

impl InferenceOutput {
    pub fn new(scores: Vec<f32>, tokens: Vec<String>) -> Self {
        Self { scores, tokens }
    }

    /// Number of scored tokens.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Pairs each score with its token string, using `?` where no token
    /// string is available.
    pub fn token_scores(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.scores.iter().enumerate().map(|(i, s)| {
            let token = self.tokens.get(i).map(String::as_str).unwrap_or("?");
            (token, *s)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_scores_aligned() {
        let out = InferenceOutput::new(
            vec![-1.0, 2.5],
            vec!["[CLS]".into(), "dog".into()],
        );
        let pairs: Vec<_> = out.token_scores().collect();
        assert_eq!(pairs, vec![("[CLS]", -1.0), ("dog", 2.5)]);
    }

    #[test]
    fn test_token_scores_without_tokens() {
        let out = InferenceOutput::new(vec![0.5], Vec::new());
        let pairs: Vec<_> = out.token_scores().collect();
        assert_eq!(pairs, vec![("?", 0.5)]);
    }
}
