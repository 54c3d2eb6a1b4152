//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `complexlane_core` linkage and print a deterministic demo run.
//! - Start file logging only when `COMPLEXLANE_LOG_DIR` holds a non-blank path.

use complexlane_core::config::LOG_DIR_ENV;
use complexlane_core::{axpb, mul, scale_inplace, ArrayHandle, KernelResult, LoggingConfig, Sample};
use std::process::ExitCode;

const DEMO_LEN: usize = 8;

fn main() -> ExitCode {
    println!("complexlane_core ping={}", complexlane_core::ping());
    println!("complexlane_core version={}", complexlane_core::core_version());

    if log_dir_requested(std::env::var(LOG_DIR_ENV).ok().as_deref()) {
        if let Err(err) = LoggingConfig::from_env().and_then(|config| config.apply()) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn log_dir_requested(value: Option<&str>) -> bool {
    value.is_some_and(|raw| !raw.trim().is_empty())
}

fn run_demo() -> KernelResult<()> {
    let mut x: Vec<Sample> = (0..DEMO_LEN)
        .map(|k| Sample::new(k as f32, k as f32))
        .collect();
    println!("x = {}", format_samples(&x));

    scale_inplace(
        &mut ArrayHandle::from_samples_mut(&mut x),
        Sample::new(0.5, 0.25),
    )?;
    println!("scaled x = {}", format_samples(&x));

    let y = axpb(
        &ArrayHandle::from_samples(&x),
        Sample::new(2.0, 0.0),
        Sample::new(1.0, -1.0),
    )?;
    println!("y = 2x + (1-1j) = {}", format_samples(y.as_slice()));

    let z = mul(&ArrayHandle::from_samples(&x), &y.handle())?;
    println!("z = x*y = {}", format_samples(z.as_slice()));

    Ok(())
}

fn format_samples(samples: &[Sample]) -> String {
    let items = samples
        .iter()
        .map(|z| format!("{}{:+}j", z.re, z.im))
        .collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}
