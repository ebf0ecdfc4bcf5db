// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model providers: turn a [`ModelId`] into a ready encoder + discriminator.
//!
//! ```text
//! ModelId ──► ModelProvider::load ──► LoadedModel { encoder, discriminator }
//!                 │
//!                 ├─ HubModelProvider    (downloads via hf-hub, cached)
//!                 └─ LocalModelProvider  (reads a model directory)
//! ```
//!
//! Both concrete providers resolve the same three files and hand them to
//! [`load_from_files`].

use crate::{
    select_device, DiscriminatorError, ElectraConfig, ElectraDiscriminator, Encoded,
    HfSentenceEncoder, InferenceOutput,
};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Opaque name of a pretrained discriminator, e.g.
/// `google/electra-small-discriminator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `/`, used as a compact chart label.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Text → token ids.
pub trait SentenceEncoder {
    fn encode(&self, sentence: &str) -> Result<Encoded, DiscriminatorError>;
}

/// Token ids → per-token replaced-token scores.
pub trait Discriminator {
    fn discriminate(&self, encoded: &Encoded) -> Result<InferenceOutput, DiscriminatorError>;
}

/// A tokenizer and discriminator bound to one model identifier.
///
/// Dropping it releases the model weights.
pub struct LoadedModel {
    pub id: ModelId,
    pub encoder: Box<dyn SentenceEncoder>,
    pub discriminator: Box<dyn Discriminator>,
}

impl LoadedModel {
    /// Tokenizes `sentence` and runs the discriminator on it.
    pub fn infer(&self, sentence: &str) -> Result<InferenceOutput, DiscriminatorError> {
        let encoded = self.encoder.encode(sentence)?;
        self.discriminator.discriminate(&encoded)
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Supplies loaded models on demand.
pub trait ModelProvider {
    /// Loads the model named by `id`. May be slow (downloads, weight
    /// mapping) and fails if the identifier is unknown or unreachable.
    fn load(&self, id: &ModelId) -> Result<LoadedModel, DiscriminatorError>;
}

/// Hugging Face Hub options.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HubSettings {
    /// Cache directory; the hf-hub default (`~/.cache/huggingface`) when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Branch, tag or commit; `main` when unset.
    #[serde(default)]
    pub revision: Option<String>,
    /// Show download progress bars.
    #[serde(default)]
    pub progress: bool,
}

/// Where the weights live and in which container format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsFile {
    SafeTensors(PathBuf),
    PyTorch(PathBuf),
}

/// The three files needed to build a discriminator.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: WeightsFile,
}

/// Candle-backed [`Discriminator`].
pub struct CandleDiscriminator {
    model: ElectraDiscriminator,
    device: Device,
    max_positions: usize,
}

impl CandleDiscriminator {
    pub fn new(model: ElectraDiscriminator, device: Device, max_positions: usize) -> Self {
        Self {
            model,
            device,
            max_positions,
        }
    }
}

impl Discriminator for CandleDiscriminator {
    fn discriminate(&self, encoded: &Encoded) -> Result<InferenceOutput, DiscriminatorError> {
        if encoded.len() > self.max_positions {
            return Err(DiscriminatorError::SequenceTooLong {
                tokens: encoded.len(),
                max: self.max_positions,
            });
        }
        if encoded.is_empty() {
            return Ok(InferenceOutput::default());
        }

        let input_ids = Tensor::new(encoded.ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let logits = self.model.forward(&input_ids)?;
        let scores: Vec<f32> = logits.squeeze(0)?.to_dtype(DType::F32)?.to_vec1()?;

        Ok(InferenceOutput::new(scores, encoded.tokens.clone()))
    }
}

/// Builds a [`LoadedModel`] from files already on disk.
pub fn load_from_files(
    id: &ModelId,
    files: &ModelFiles,
    device: &Device,
) -> Result<LoadedModel, DiscriminatorError> {
    let config = ElectraConfig::from_file(&files.config)?;
    tracing::info!("{id}: {}", config.summary());

    let encoder = HfSentenceEncoder::from_file(&files.tokenizer)?;
    if encoder.vocab_size() > config.vocab_size {
        tracing::warn!(
            "{id}: tokenizer vocabulary ({}) is larger than the embedding table ({})",
            encoder.vocab_size(),
            config.vocab_size,
        );
    }

    let vb = match &files.weights {
        // SAFETY: the safetensors file is opened read-only and stays mapped
        // for as long as the VarBuilder needs it.
        WeightsFile::SafeTensors(path) => unsafe {
            VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)?
        },
        WeightsFile::PyTorch(path) => VarBuilder::from_pth(path, DType::F32, device)?,
    };
    let model = ElectraDiscriminator::load(vb, &config)?;

    Ok(LoadedModel {
        id: id.clone(),
        encoder: Box::new(encoder),
        discriminator: Box::new(CandleDiscriminator::new(
            model,
            device.clone(),
            config.max_position_embeddings,
        )),
    })
}

/// Downloads models from the Hugging Face Hub (blocking client).
pub struct HubModelProvider {
    api: hf_hub::api::sync::Api,
    revision: Option<String>,
    device: Device,
}

impl HubModelProvider {
    pub fn new(settings: &HubSettings) -> Result<Self, DiscriminatorError> {
        let mut builder = hf_hub::api::sync::ApiBuilder::new().with_progress(settings.progress);
        if let Some(dir) = &settings.cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }
        let api = builder.build().map_err(|e| DiscriminatorError::Hub {
            model: "<none>".into(),
            file: "<client>".into(),
            detail: e.to_string(),
        })?;

        Ok(Self {
            api,
            revision: settings.revision.clone(),
            device: select_device(),
        })
    }

    fn fetch(&self, id: &ModelId) -> Result<ModelFiles, DiscriminatorError> {
        use hf_hub::{Repo, RepoType};

        let repo = match &self.revision {
            Some(rev) => Repo::with_revision(id.to_string(), RepoType::Model, rev.clone()),
            None => Repo::model(id.to_string()),
        };
        let repo = self.api.repo(repo);

        let get = |file: &str| {
            repo.get(file).map_err(|e| DiscriminatorError::Hub {
                model: id.to_string(),
                file: file.to_string(),
                detail: e.to_string(),
            })
        };

        let config = get(CONFIG_FILE)?;
        let tokenizer = get(TOKENIZER_FILE)?;
        let weights = match get(SAFETENSORS_FILE) {
            Ok(path) => WeightsFile::SafeTensors(path),
            Err(e) => {
                tracing::warn!("{e}; falling back to {PYTORCH_FILE}");
                WeightsFile::PyTorch(get(PYTORCH_FILE)?)
            }
        };

        Ok(ModelFiles {
            config,
            tokenizer,
            weights,
        })
    }
}

impl ModelProvider for HubModelProvider {
    fn load(&self, id: &ModelId) -> Result<LoadedModel, DiscriminatorError> {
        tracing::info!("fetching {id} from the hub");
        let files = self.fetch(id)?;
        load_from_files(id, &files, &self.device)
    }
}

/// Loads models from local directories holding `config.json`,
/// `tokenizer.json` and the weights.
///
/// The identifier is a directory path, joined onto `root` when one is set.
pub struct LocalModelProvider {
    root: Option<PathBuf>,
    device: Device,
}

impl LocalModelProvider {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            device: select_device(),
        }
    }

    /// Resolves the model directory and the files inside it.
    pub fn resolve(&self, id: &ModelId) -> Result<ModelFiles, DiscriminatorError> {
        let dir = match &self.root {
            Some(root) => root.join(id.as_str()),
            None => PathBuf::from(id.as_str()),
        };
        resolve_dir(&dir)
    }
}

fn resolve_dir(dir: &Path) -> Result<ModelFiles, DiscriminatorError> {
    let required = |name: &str| {
        let path = dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DiscriminatorError::MissingFile {
                path: path.display().to_string(),
            })
        }
    };

    let config = required(CONFIG_FILE)?;
    let tokenizer = required(TOKENIZER_FILE)?;
    let weights = match required(SAFETENSORS_FILE) {
        Ok(path) => WeightsFile::SafeTensors(path),
        Err(_) => WeightsFile::PyTorch(required(PYTORCH_FILE)?),
    };

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

impl ModelProvider for LocalModelProvider {
    fn load(&self, id: &ModelId) -> Result<LoadedModel, DiscriminatorError> {
        let files = self.resolve(id)?;
        tracing::info!("loading {id} from {}", files.config.display());
        load_from_files(id, &files, &self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("electra_eval_provider_test").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_model_id_short_name() {
        let id = ModelId::from("google/electra-small-discriminator");
        assert_eq!(id.short_name(), "electra-small-discriminator");
        assert_eq!(ModelId::from("local").short_name(), "local");
        assert_eq!(id.to_string(), "google/electra-small-discriminator");
    }

    #[test]
    fn test_resolve_prefers_safetensors() {
        let dir = scratch_dir("both");
        for f in [CONFIG_FILE, TOKENIZER_FILE, SAFETENSORS_FILE, PYTORCH_FILE] {
            std::fs::write(dir.join(f), b"").unwrap();
        }
        let files = resolve_dir(&dir).unwrap();
        assert_eq!(files.weights, WeightsFile::SafeTensors(dir.join(SAFETENSORS_FILE)));
    }

    #[test]
    fn test_resolve_falls_back_to_pytorch() {
        let dir = scratch_dir("pth");
        for f in [CONFIG_FILE, TOKENIZER_FILE, PYTORCH_FILE] {
            std::fs::write(dir.join(f), b"").unwrap();
        }
        let files = resolve_dir(&dir).unwrap();
        assert_eq!(files.weights, WeightsFile::PyTorch(dir.join(PYTORCH_FILE)));
    }

    #[test]
    fn test_local_provider_missing_dir() {
        let provider = LocalModelProvider::new(None);
        let err = provider
            .load(&ModelId::from("/no/such/model/dir"))
            .unwrap_err();
        assert!(matches!(err, DiscriminatorError::MissingFile { .. }));
    }

    #[test]
    fn test_local_provider_joins_root() {
        let dir = scratch_dir("rooted");
        let model_dir = dir.join("tiny");
        std::fs::create_dir_all(&model_dir).unwrap();
        for f in [CONFIG_FILE, TOKENIZER_FILE, SAFETENSORS_FILE] {
            std::fs::write(model_dir.join(f), b"").unwrap();
        }
        let provider = LocalModelProvider::new(Some(dir));
        let files = provider.resolve(&ModelId::from("tiny")).unwrap();
        assert_eq!(files.config, model_dir.join(CONFIG_FILE));
    }

    #[test]
    fn test_candle_discriminator_rejects_long_input() {
        use crate::config::HiddenAct;

        let device = Device::Cpu;
        let config = ElectraConfig {
            model_type: "electra".into(),
            embedding_size: 8,
            hidden_size: 8,
            num_hidden_layers: 1,
            num_attention_heads: 2,
            intermediate_size: 16,
            hidden_act: HiddenAct::Gelu,
            max_position_embeddings: 4,
            type_vocab_size: 2,
            vocab_size: 16,
            layer_norm_eps: 1e-12,
        };
        let model =
            ElectraDiscriminator::load(VarBuilder::zeros(DType::F32, &device), &config).unwrap();
        let disc = CandleDiscriminator::new(model, device, config.max_position_embeddings);

        let long = Encoded {
            ids: vec![1; 5],
            tokens: Vec::new(),
        };
        assert!(matches!(
            disc.discriminate(&long),
            Err(DiscriminatorError::SequenceTooLong { tokens: 5, max: 4 })
        ));

        let empty = disc.discriminate(&Encoded::default()).unwrap();
        assert!(empty.is_empty());

        let ok = disc
            .discriminate(&Encoded {
                ids: vec![2, 3, 4],
                tokens: vec!["[CLS]".into(), "a".into(), "[SEP]".into()],
            })
            .unwrap();
        assert_eq!(ok.len(), 3);
        assert_eq!(ok.tokens.len(), 3);
    }

    #[test]
    #[ignore = "downloads google/electra-small-discriminator from the hub"]
    fn test_hub_small_discriminator() {
        let provider = HubModelProvider::new(&HubSettings::default()).unwrap();
        let model = provider
            .load(&ModelId::from("google/electra-small-discriminator"))
            .unwrap();
        let out = model.infer("time is 6 am").unwrap();
        assert!(out.len() >= 5);
    }
}
