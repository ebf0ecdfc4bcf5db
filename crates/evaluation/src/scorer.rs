// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sign-threshold scoring of discriminator output.
//!
//! A token counts as flagged when its logit is strictly positive. A
//! sentence is *verified* (`true`) only if no token is flagged; a single
//! flagged token makes it `false`. This is an any-flag rule, not a vote.
//! `NaN` never compares greater than zero and so never flags a token.

use discriminator::InferenceOutput;

/// Number of tokens whose score is strictly positive.
pub fn flagged_count(output: &InferenceOutput) -> usize {
    output.scores.iter().filter(|s| **s > 0.0).count()
}

/// Indices of flagged tokens, in token order.
pub fn flagged_positions(output: &InferenceOutput) -> Vec<usize> {
    output
        .scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Maps one output to a prediction: `true` if no token was flagged.
///
/// An empty score sequence has nothing flagged and yields `true`.
pub fn fact_check(output: &InferenceOutput) -> bool {
    flagged_count(output) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(scores: &[f32]) -> InferenceOutput {
        InferenceOutput::new(scores.to_vec(), Vec::new())
    }

    #[test]
    fn test_all_non_positive_is_verified() {
        assert!(fact_check(&out(&[-3.2, -0.1, 0.0, -7.5])));
    }

    #[test]
    fn test_single_positive_is_not_verified() {
        assert!(!fact_check(&out(&[-3.2, 0.01, -1.0])));
        assert_eq!(flagged_positions(&out(&[-3.2, 0.01, -1.0])), vec![1]);
    }

    #[test]
    fn test_many_positive_same_as_one() {
        assert!(!fact_check(&out(&[1.0, 2.0, 3.0])));
        assert_eq!(flagged_count(&out(&[1.0, 2.0, 3.0])), 3);
    }

    #[test]
    fn test_empty_is_verified() {
        assert!(fact_check(&out(&[])));
        assert!(flagged_positions(&out(&[])).is_empty());
    }

    #[test]
    fn test_zero_is_not_flagged() {
        assert!(fact_check(&out(&[0.0, -0.0])));
    }

    #[test]
    fn test_nan_is_not_flagged() {
        assert!(fact_check(&out(&[f32::NAN, -1.0])));
    }

    #[test]
    fn test_positive_infinity_is_flagged() {
        assert!(!fact_check(&out(&[f32::INFINITY])));
    }
}
