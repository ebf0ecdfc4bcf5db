// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Compute device selection: CUDA > Metal > CPU.

use candle_core::Device;

/// Selects the best available device for the enabled features.
///
/// Without the `cuda` or `metal` feature this is always the CPU.
pub fn select_device() -> Device {
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            tracing::info!("using CUDA device 0");
            return device;
        }
        tracing::warn!("cuda feature enabled but no GPU available, falling back");
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            tracing::info!("using Metal device 0");
            return device;
        }
        tracing::warn!("metal feature enabled but no device available, falling back");
    }

    Device::Cpu
}
