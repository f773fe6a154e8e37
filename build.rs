/// winprobe build script.
///
/// The probes only mean something on Windows. Other hosts still build the
/// portable protocol layer (and its tests), so warn instead of failing.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=winprobe targets Windows \
             (CARGO_CFG_TARGET_OS = {target_os:?}); probe binaries will only log an error"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
