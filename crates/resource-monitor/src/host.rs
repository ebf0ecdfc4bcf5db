// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host memory via `/proc/meminfo`.
//!
//! Gives context for the per-process samples: a 1.3 GB resident set means
//! something different on an 8 GB laptop than on a 64 GB server.

use crate::{procfs, MonitorError};
use std::path::Path;

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Host memory state.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct HostMemory {
    /// Total physical memory in bytes.
    pub total_bytes: u64,
    /// Memory the kernel estimates is available for new allocations.
    pub available_bytes: u64,
}

impl HostMemory {
    /// Reads host memory from `/proc/meminfo`.
    pub fn read() -> Result<Self, MonitorError> {
        Self::read_from(Path::new(MEMINFO_PATH))
    }

    pub(crate) fn read_from(path: &Path) -> Result<Self, MonitorError> {
        let content = procfs::read(path)?;
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, source_path: &Path) -> Result<Self, MonitorError> {
        let [total, available] =
            procfs::kb_fields(content, ["MemTotal", "MemAvailable"], source_path)?;

        Ok(Self {
            total_bytes: procfs::require(total, "MemTotal", source_path)?,
            available_bytes: procfs::require(available, "MemAvailable", source_path)?,
        })
    }

    /// Bytes in use (`total - available`).
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    /// Fraction of host memory in use, in `[0.0, 1.0]`.
    pub fn utilisation(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes() as f64 / self.total_bytes as f64
    }

    pub fn total_mb(&self) -> u64 {
        self.total_bytes / (1024 * 1024)
    }

    pub fn available_mb(&self) -> u64 {
        self.available_bytes / (1024 * 1024)
    }
}
