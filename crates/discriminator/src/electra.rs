// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ELECTRA discriminator forward pass on candle.
//!
//! ```text
//! input_ids [1, seq]
//!     │  word + position + token-type embeddings, LayerNorm
//!     │  embeddings_project (only when embedding_size != hidden_size)
//!     ▼
//! N × encoder layer (post-LN)
//!     │  self-attention → dense → +residual → LayerNorm
//!     │  intermediate → act → dense → +residual → LayerNorm
//!     ▼
//! discriminator_predictions: dense → act → dense_prediction
//!     ▼
//! logits [1, seq]   one score per token, > 0 means "replaced"
//! ```
//!
//! Tensor names follow the `ElectraForPreTraining` checkpoints
//! (`electra.embeddings.*`, `electra.encoder.layer.{i}.*`,
//! `discriminator_predictions.*`).

use crate::config::{ElectraConfig, HiddenAct};
use candle_core::{Result, Tensor, D};
use candle_nn::{embedding, linear, Embedding, LayerNorm, Linear, Module, VarBuilder};

/// Loads a LayerNorm, accepting both `weight`/`bias` and the older
/// `gamma`/`beta` tensor names.
fn layer_norm(size: usize, eps: f64, vb: VarBuilder) -> Result<LayerNorm> {
    let (weight, bias) = match (vb.get(size, "weight"), vb.get(size, "bias")) {
        (Ok(w), Ok(b)) => (w, b),
        (Err(err), _) | (_, Err(err)) => match (vb.get(size, "gamma"), vb.get(size, "beta")) {
            (Ok(w), Ok(b)) => (w, b),
            _ => return Err(err),
        },
    };
    Ok(LayerNorm::new(weight, bias, eps))
}

struct Embeddings {
    word: Embedding,
    position: Embedding,
    token_type: Embedding,
    layer_norm: LayerNorm,
}

impl Embeddings {
    fn load(vb: VarBuilder, c: &ElectraConfig) -> Result<Self> {
        Ok(Self {
            word: embedding(c.vocab_size, c.embedding_size, vb.pp("word_embeddings"))?,
            position: embedding(
                c.max_position_embeddings,
                c.embedding_size,
                vb.pp("position_embeddings"),
            )?,
            token_type: embedding(c.type_vocab_size, c.embedding_size, vb.pp("token_type_embeddings"))?,
            layer_norm: layer_norm(c.embedding_size, c.layer_norm_eps, vb.pp("LayerNorm"))?,
        })
    }

    fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let (_batch, seq_len) = input_ids.dims2()?;
        let positions = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;
        // Single-segment input: every token has type 0.
        let token_types = input_ids.zeros_like()?;

        let x = self
            .word
            .forward(input_ids)?
            .broadcast_add(&self.position.forward(&positions)?)?
            .broadcast_add(&self.token_type.forward(&token_types)?)?;
        self.layer_norm.forward(&x)
    }
}

struct SelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    layer_norm: LayerNorm,
    num_heads: usize,
    head_dim: usize,
}

impl SelfAttention {
    fn load(vb: VarBuilder, c: &ElectraConfig) -> Result<Self> {
        let h = c.hidden_size;
        Ok(Self {
            query: linear(h, h, vb.pp("self.query"))?,
            key: linear(h, h, vb.pp("self.key"))?,
            value: linear(h, h, vb.pp("self.value"))?,
            output: linear(h, h, vb.pp("output.dense"))?,
            layer_norm: layer_norm(h, c.layer_norm_eps, vb.pp("output.LayerNorm"))?,
            num_heads: c.num_attention_heads,
            head_dim: c.head_dim(),
        })
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden) = x.dims3()?;
        let split_heads = |t: Tensor| -> Result<Tensor> {
            t.reshape((batch, seq_len, self.num_heads, self.head_dim))?
                .transpose(1, 2)?
                .contiguous()
        };

        let q = split_heads(self.query.forward(x)?)?;
        let k = split_heads(self.key.forward(x)?)?;
        let v = split_heads(self.value.forward(x)?)?;

        let scale = 1.0 / (self.head_dim as f64).sqrt();
        let scores = q.matmul(&k.t()?.contiguous()?)?.affine(scale, 0.0)?;
        // No padding in a single-sentence batch, so no attention mask.
        let probs = candle_nn::ops::softmax_last_dim(&scores)?;

        let context = probs
            .matmul(&v)?
            .transpose(1, 2)?
            .contiguous()?
            .reshape((batch, seq_len, hidden))?;

        let projected = self.output.forward(&context)?;
        self.layer_norm.forward(&projected.add(x)?)
    }
}

struct EncoderLayer {
    attention: SelfAttention,
    intermediate: Linear,
    output: Linear,
    layer_norm: LayerNorm,
    act: HiddenAct,
}

impl EncoderLayer {
    fn load(vb: VarBuilder, c: &ElectraConfig) -> Result<Self> {
        Ok(Self {
            attention: SelfAttention::load(vb.pp("attention"), c)?,
            intermediate: linear(c.hidden_size, c.intermediate_size, vb.pp("intermediate.dense"))?,
            output: linear(c.intermediate_size, c.hidden_size, vb.pp("output.dense"))?,
            layer_norm: layer_norm(c.hidden_size, c.layer_norm_eps, vb.pp("output.LayerNorm"))?,
            act: c.hidden_act,
        })
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let attended = self.attention.forward(x)?;
        let h = self.act.apply(&self.intermediate.forward(&attended)?)?;
        let h = self.output.forward(&h)?;
        self.layer_norm.forward(&h.add(&attended)?)
    }
}

struct DiscriminatorHead {
    dense: Linear,
    prediction: Linear,
    act: HiddenAct,
}

impl DiscriminatorHead {
    fn load(vb: VarBuilder, c: &ElectraConfig) -> Result<Self> {
        Ok(Self {
            dense: linear(c.hidden_size, c.hidden_size, vb.pp("dense"))?,
            prediction: linear(c.hidden_size, 1, vb.pp("dense_prediction"))?,
            act: c.hidden_act,
        })
    }

    fn forward(&self, hidden: &Tensor) -> Result<Tensor> {
        let h = self.act.apply(&self.dense.forward(hidden)?)?;
        self.prediction.forward(&h)?.squeeze(D::Minus1)
    }
}

/// An ELECTRA encoder with its replaced-token-detection head.
pub struct ElectraDiscriminator {
    embeddings: Embeddings,
    projection: Option<Linear>,
    layers: Vec<EncoderLayer>,
    head: DiscriminatorHead,
}

impl ElectraDiscriminator {
    /// Builds the model from an `ElectraForPreTraining` weight set.
    pub fn load(vb: VarBuilder, config: &ElectraConfig) -> Result<Self> {
        let electra = vb.pp("electra");

        let embeddings = Embeddings::load(electra.pp("embeddings"), config)?;
        let projection = if config.has_embedding_projection() {
            Some(linear(
                config.embedding_size,
                config.hidden_size,
                electra.pp("embeddings_project"),
            )?)
        } else {
            None
        };

        let layers = (0..config.num_hidden_layers)
            .map(|i| EncoderLayer::load(electra.pp(format!("encoder.layer.{i}")), config))
            .collect::<Result<Vec<_>>>()?;

        let head = DiscriminatorHead::load(vb.pp("discriminator_predictions"), config)?;

        Ok(Self {
            embeddings,
            projection,
            layers,
            head,
        })
    }

    /// Runs the model on `[batch, seq]` token ids and returns
    /// `[batch, seq]` replaced-token logits.
    pub fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let mut hidden = self.embeddings.forward(input_ids)?;
        if let Some(projection) = &self.projection {
            hidden = projection.forward(&hidden)?;
        }
        for layer in &self.layers {
            hidden = layer.forward(&hidden)?;
        }
        self.head.forward(&hidden)
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}
