// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for resource monitoring.

/// Errors that can occur when sampling process or host memory.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Failed to read a procfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// A field was present but its value was not a `<n> kB` quantity.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The memory source does not exist on this host (a procfs file off
    /// Linux, or a platform the fallback sampler does not cover).
    #[error("memory source not available: {path}")]
    NotAvailable { path: String },
}
