fn main() {
    println!("cargo:rerun-if-env-changed=SWEEP_BUILD_HASH");

    let hash =
        std::env::var("SWEEP_BUILD_HASH").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| {
            std::process::Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        });

    // Shown by `sweep --version` next to the package version
    println!("cargo:rustc-env=SWEEP_BUILD_HASH={hash}");
}
