// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Resident memory of the current process.
//!
//! Linux reads `/proc/self/status`. Other platforms (macOS, Windows) go
//! through the `memory-stats` crate, which reports the current resident
//! set but no peak.
//!
//! The sample covers the whole process: model weights, tokenizer tables,
//! allocator slack and anything else alive at the time of the read. It is
//! not scoped to a single inference call.

use crate::{procfs, MonitorError};
use std::path::Path;

/// Default path to the status file of the calling process.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
const STATUS_PATH: &str = "/proc/self/status";

/// Resident memory of the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ProcessMemory {
    /// Current resident set size (`VmRSS`) in bytes.
    pub resident_bytes: u64,
    /// Peak resident set size (`VmHWM`) in bytes. Zero if the kernel does
    /// not report it.
    pub peak_resident_bytes: u64,
}

impl ProcessMemory {
    /// Samples the resident set of the calling process.
    #[cfg(target_os = "linux")]
    pub fn read() -> Result<Self, MonitorError> {
        Self::read_from(Path::new(STATUS_PATH))
    }

    /// Samples the resident set of the calling process.
    #[cfg(not(target_os = "linux"))]
    pub fn read() -> Result<Self, MonitorError> {
        let stats = memory_stats::memory_stats().ok_or_else(|| MonitorError::NotAvailable {
            path: format!("process memory statistics on {}", std::env::consts::OS),
        })?;
        Ok(Self::from_physical(stats.physical_mem))
    }

    /// Builds a sample from a platform resident-set figure with no peak.
    #[cfg_attr(target_os = "linux", allow(dead_code))]
    pub(crate) fn from_physical(physical_bytes: usize) -> Self {
        Self {
            resident_bytes: physical_bytes as u64,
            peak_resident_bytes: 0,
        }
    }

    /// Samples from a specific status file (for testing).
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    pub(crate) fn read_from(path: &Path) -> Result<Self, MonitorError> {
        let content = procfs::read(path)?;
        Self::parse(&content, path)
    }

    /// Parses the content of a `/proc/<pid>/status`-formatted string.
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    pub(crate) fn parse(content: &str, source_path: &Path) -> Result<Self, MonitorError> {
        let [rss, hwm] = procfs::kb_fields(content, ["VmRSS", "VmHWM"], source_path)?;

        Ok(Self {
            resident_bytes: procfs::require(rss, "VmRSS", source_path)?,
            peak_resident_bytes: hwm.unwrap_or(0),
        })
    }

    /// Returns the current resident set in megabytes.
    pub fn resident_mb(&self) -> f64 {
        self.resident_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Samples only the current resident set size in bytes.
///
/// Convenience for callers that record a single number per measurement.
pub fn resident_bytes() -> Result<u64, MonitorError> {
    ProcessMemory::read().map(|m| m.resident_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_STATUS: &str = "\
Name:\telectra-eval
Umask:\t0022
State:\tR (running)
VmPeak:\t 2345678 kB
VmSize:\t 2345600 kB
VmHWM:\t  812340 kB
VmRSS:\t  798765 kB
RssAnon:\t  700000 kB
Threads:\t1
";

    #[test]
    fn test_parse_status() {
        let mem = ProcessMemory::parse(SAMPLE_STATUS, Path::new("/proc/self/status")).unwrap();
        assert_eq!(mem.resident_bytes, 798765 * 1024);
        assert_eq!(mem.peak_resident_bytes, 812340 * 1024);
    }

    #[test]
    fn test_resident_mb() {
        let mem = ProcessMemory {
            resident_bytes: 256 * 1024 * 1024,
            peak_resident_bytes: 0,
        };
        assert!((mem.resident_mb() - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_hwm_defaults_to_zero() {
        let status = "Name:\tx\nVmRSS:\t 1000 kB\n";
        let mem = ProcessMemory::parse(status, Path::new("/proc/self/status")).unwrap();
        assert_eq!(mem.resident_bytes, 1000 * 1024);
        assert_eq!(mem.peak_resident_bytes, 0);
    }

    #[test]
    fn test_missing_rss() {
        let status = "Name:\tx\nVmHWM:\t 1000 kB\n";
        let result = ProcessMemory::parse(status, Path::new("/proc/self/status"));
        assert!(matches!(result, Err(MonitorError::ParseError { .. })));
    }

    #[test]
    fn test_read_from_file() {
        let dir = std::env::temp_dir().join("electra_eval_monitor_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("status_test");
        std::fs::write(&path, SAMPLE_STATUS).unwrap();
        let mem = ProcessMemory::read_from(&path).unwrap();
        assert_eq!(mem.resident_bytes, 798765 * 1024);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_self() {
        // Runs against the real host on every supported platform.
        let mem = ProcessMemory::read().unwrap();
        assert!(mem.resident_bytes > 0);
        assert!(resident_bytes().unwrap() > 0);
    }

    #[test]
    fn test_from_physical_has_no_peak() {
        let mem = ProcessMemory::from_physical(64 * 1024 * 1024);
        assert_eq!(mem.resident_bytes, 64 * 1024 * 1024);
        assert_eq!(mem.peak_resident_bytes, 0);
        assert!((mem.resident_mb() - 64.0).abs() < 1e-9);
    }
}
