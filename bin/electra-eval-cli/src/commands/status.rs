// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `electra-eval status` command: display process and host memory.
//!
//! Useful as a baseline before `evaluate`: the per-sentence memory column
//! is the whole-process resident set, so it starts from this figure.

use super::bar;

pub fn execute() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          electra-eval · Resource Status             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let snapshot = resource_monitor::snapshot()?;

    println!("  Process");
    println!("   Resident:     {:.1} MB", snapshot.process.resident_mb());
    println!(
        "   Peak:         {:.1} MB",
        snapshot.process.peak_resident_bytes as f64 / (1024.0 * 1024.0),
    );
    if let Some(share) = snapshot.process_share() {
        println!("   Host share:   {:.2}%", share * 100.0);
    }
    println!();

    match &snapshot.host {
        Some(host) => {
            let used_mb = host.used_bytes() / (1024 * 1024);
            println!("  Host");
            println!("   Total:        {} MB", host.total_mb());
            println!("   Available:    {} MB", host.available_mb());
            println!(
                "   Used:         {} MB ({:.1}%)  [{}]",
                used_mb,
                host.utilisation() * 100.0,
                bar(host.utilisation(), 1.0, 20),
            );
            // Rough guide: the large discriminator needs ~1.3 GB of f32 weights.
            if host.available_mb() < 2048 {
                println!("   WARNING: under 2 GB available; the large model may not fit");
            }
        }
        None => println!("  Host memory unavailable"),
    }
    println!();
    println!("{}", snapshot.summary());

    Ok(())
}
