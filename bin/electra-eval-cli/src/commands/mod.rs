// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the helpers they share.

pub mod evaluate;
pub mod score;
pub mod status;

use crate::SourceArgs;
use evaluation::{EvaluationConfig, ProviderKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialises the tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the config file (or the defaults) and applies source overrides.
pub fn load_config(
    path: Option<PathBuf>,
    source: &SourceArgs,
) -> anyhow::Result<EvaluationConfig> {
    let mut config = match path {
        Some(p) => {
            tracing::info!("loading config from {}", p.display());
            EvaluationConfig::from_file(&p)?
        }
        None => EvaluationConfig::default(),
    };

    if source.local {
        config.provider = ProviderKind::Local;
    }
    if let Some(dir) = &source.cache_dir {
        config.hub.cache_dir = Some(dir.clone());
    }
    if let Some(rev) = &source.revision {
        config.hub.revision = Some(rev.clone());
    }
    Ok(config)
}

/// Horizontal bar of `width` cells for `value` on a `[0, max]` scale.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

/// Truncates a string on a character boundary, with ellipsis.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(5.0, 10.0, 10), "#####.....");
        assert_eq!(bar(20.0, 10.0, 4), "####");
        assert_eq!(bar(1.0, 0.0, 3), "...");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("dog barked", 20), "dog barked");
        assert_eq!(truncate("adam said hello [SEP] eve", 10), "adam sa...");
    }

    #[test]
    fn test_load_config_overrides() {
        let source = SourceArgs {
            local: true,
            cache_dir: Some(PathBuf::from("/tmp/hf")),
            revision: None,
        };
        let c = load_config(None, &source).unwrap();
        assert_eq!(c.provider, ProviderKind::Local);
        assert_eq!(c.hub.cache_dir, Some(PathBuf::from("/tmp/hf")));
        assert_eq!(c.models.len(), 3);
    }
}
