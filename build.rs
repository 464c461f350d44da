//! Build script for RF scanner firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (memory.x comes from embassy-stm32)
//! - Nothing for host (`std`) builds

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds have no linker scripts to pull in
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    let target = std::env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumb") {
        return;
    }

    // `--nmagic` is required if memory section addresses are not aligned to 0x10000
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
