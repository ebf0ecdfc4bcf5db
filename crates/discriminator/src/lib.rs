// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # discriminator
//!
//! Loads pretrained ELECTRA discriminators and scores sentences token by
//! token.
//!
//! # Key Components
//!
//! - [`ModelProvider`]: turns a [`ModelId`] into a [`LoadedModel`]
//!   (tokenizer + discriminator). [`HubModelProvider`] downloads from the
//!   Hugging Face Hub; [`LocalModelProvider`] reads a directory.
//! - [`ElectraDiscriminator`]: the encoder and replaced-token head,
//!   implemented with `candle-nn`.
//! - [`HfSentenceEncoder`]: `tokenizer.json` tokenization.
//! - [`InferenceOutput`]: one raw logit per token.
//!
//! # Example
//! ```no_run
//! use discriminator::{HubModelProvider, HubSettings, ModelId, ModelProvider};
//!
//! let provider = HubModelProvider::new(&HubSettings::default()).unwrap();
//! let model = provider
//!     .load(&ModelId::from("google/electra-small-discriminator"))
//!     .unwrap();
//! let output = model.infer("the dog barked").unwrap();
//! for (token, score) in output.token_scores() {
//!     println!("{token:>12} {score:+.3}");
//! }
//! ```

pub mod config;
mod device;
mod electra;
mod encoder;
mod error;
mod output;
mod provider;

pub use config::{ElectraConfig, HiddenAct};
pub use device::select_device;
pub use electra::ElectraDiscriminator;
pub use encoder::HfSentenceEncoder;
pub use error::DiscriminatorError;
pub use output::{Encoded, InferenceOutput};
pub use provider::{
    load_from_files, CandleDiscriminator, Discriminator, HubModelProvider, HubSettings,
    LoadedModel, LocalModelProvider, ModelFiles, ModelId, ModelProvider, SentenceEncoder,
    WeightsFile,
};
