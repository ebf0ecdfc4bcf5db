// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time view of process and host memory together.

use crate::{HostMemory, MonitorError, ProcessMemory};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process and host memory read back to back.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResourceSnapshot {
    pub process: ProcessMemory,
    /// `None` when `/proc/meminfo` cannot be read; the process sample is
    /// the one that matters for measurements.
    pub host: Option<HostMemory>,
    /// Unix timestamp in milliseconds when the snapshot was taken.
    pub timestamp_ms: u64,
}

impl ResourceSnapshot {
    /// Captures a new snapshot. Fails only if the process sample fails.
    pub fn capture() -> Result<Self, MonitorError> {
        let process = ProcessMemory::read()?;
        let host = match HostMemory::read() {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!("host memory unavailable: {e}");
                None
            }
        };

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(Self {
            process,
            host,
            timestamp_ms,
        })
    }

    /// One-line summary for logs and CLI output.
    ///
    /// ```text
    /// Process: 812.4 MB resident (peak 830.1 MB), Host: 9235/15931 MB avail (42% used)
    /// ```
    pub fn summary(&self) -> String {
        let peak_mb = self.process.peak_resident_bytes as f64 / (1024.0 * 1024.0);
        let process = format!(
            "Process: {:.1} MB resident (peak {:.1} MB)",
            self.process.resident_mb(),
            peak_mb,
        );
        match &self.host {
            Some(h) => format!(
                "{process}, Host: {}/{} MB avail ({:.0}% used)",
                h.available_mb(),
                h.total_mb(),
                h.utilisation() * 100.0,
            ),
            None => format!("{process}, Host: unavailable"),
        }
    }

    /// Share of host memory held by this process, if host data is present.
    pub fn process_share(&self) -> Option<f64> {
        self.host
            .filter(|h| h.total_bytes > 0)
            .map(|h| self.process.resident_bytes as f64 / h.total_bytes as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(host: Option<HostMemory>) -> ResourceSnapshot {
        ResourceSnapshot {
            process: ProcessMemory {
                resident_bytes: 512 * 1024 * 1024,
                peak_resident_bytes: 600 * 1024 * 1024,
            },
            host,
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_capture_on_linux() {
        if std::path::Path::new("/proc/self/status").exists() {
            let snap = ResourceSnapshot::capture().unwrap();
            assert!(snap.process.resident_bytes > 0);
            assert!(snap.timestamp_ms > 0);
        }
    }

    #[test]
    fn test_summary_with_host() {
        let snap = sample(Some(HostMemory {
            total_bytes: 4096 * 1024 * 1024,
            available_bytes: 2048 * 1024 * 1024,
        }));
        let s = snap.summary();
        assert!(s.contains("512.0 MB resident"));
        assert!(s.contains("peak 600.0 MB"));
        assert!(s.contains("2048/4096 MB avail"));
        assert!(s.contains("50% used"));
    }

    #[test]
    fn test_summary_without_host() {
        let s = sample(None).summary();
        assert!(s.ends_with("Host: unavailable"));
    }

    #[test]
    fn test_process_share() {
        let snap = sample(Some(HostMemory {
            total_bytes: 2048 * 1024 * 1024,
            available_bytes: 0,
        }));
        assert!((snap.process_share().unwrap() - 0.25).abs() < 1e-9);
        assert!(sample(None).process_share().is_none());
    }
}
