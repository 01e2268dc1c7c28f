//! Layering guardrails for the workspace.
//!
//! - `oopunit_core` is the vocabulary crate and must stay dependency-free.
//! - The engine crate must not pull the proc-macro toolchain (`syn`, `quote`, `proc-macro2`) into its own
//!   `[dependencies]`; only `oopunit_derive` uses it.

/// Non-comment entries of the `[dependencies]` table of `manifest`.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut entries = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some(name) = line_no_comment.split('=').next() {
            entries.push(name.trim().to_string());
        }
    }
    entries
}

#[test]
fn core_vocabulary_has_no_dependencies() {
    let manifest = include_str!("../crates/oopunit_core/Cargo.toml");
    let deps = dependencies(manifest);
    assert!(deps.is_empty(), "`oopunit_core` must stay dependency-free, found {deps:?}");
}

#[test]
fn engine_does_not_depend_on_the_macro_toolchain() {
    let manifest = include_str!("../Cargo.toml");
    let deps = dependencies(manifest);
    assert!(deps.iter().any(|dep| dep == "oopunit_core"), "engine must depend on `oopunit_core`");
    for forbidden in ["syn", "quote", "proc-macro2"] {
        assert!(
            !deps.iter().any(|dep| dep == forbidden),
            "`{forbidden}` must not appear in the engine's [dependencies]; it belongs to `oopunit_derive`"
        );
    }
}
