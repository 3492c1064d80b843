//! Compile-time build information for `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `numcrunch --version`.
pub fn version_line() -> String {
    format!(
        "numcrunch {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
