use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{step, OnFailure};

const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run(host_only: bool) -> Result<()> {
    println!();
    println!("{}", "🔍 Checking smart-amp...".cyan().bold());
    println!();

    let total_start = Instant::now();

    if host_only {
        println!("{}", "  Skipping embedded target".dimmed());
        println!();
    } else {
        // no_std with defmt logging, as shipped on the MCU
        step(
            "Embedded target (no_std, defmt)",
            &[
                "check",
                "-p",
                "smart-amp",
                "--target",
                EMBEDDED_TARGET,
                "--features",
                "defmt",
            ],
            OnFailure::Abort,
        )?;
    }

    step(
        "Host build (tracing)",
        &["check", "-p", "smart-amp", "--features", "tracing,std"],
        OnFailure::Abort,
    )?;

    step(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if step("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
