// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-monitor
//!
//! Reads memory figures for the evaluation harness.
//!
//! # Monitored Metrics
//! - **Process resident set**: `VmRSS` / `VmHWM` from `/proc/self/status`
//!   on Linux, the `memory-stats` crate elsewhere.
//!   This is what each measurement record stores.
//! - **Host memory**: total and available from `/proc/meminfo`, shown as
//!   context by the CLI.
//!
//! Reads are cheap (one small file each) and safe to call between every
//! inference call.
//!
//! # Example
//! ```no_run
//! let rss = resource_monitor::resident_bytes().expect("no process memory source");
//! println!("resident: {rss} bytes");
//! println!("{}", resource_monitor::snapshot().unwrap().summary());
//! ```

mod error;
mod host;
mod process;
mod procfs;
mod snapshot;

pub use error::MonitorError;
pub use host::HostMemory;
pub use process::{resident_bytes, ProcessMemory};
pub use snapshot::ResourceSnapshot;

/// Captures a point-in-time snapshot of process and host memory.
///
/// Convenience wrapper around [`ResourceSnapshot::capture()`].
pub fn snapshot() -> Result<ResourceSnapshot, MonitorError> {
    ResourceSnapshot::capture()
}
