// ── Platform layer ────────────────────────────────────────────────────────────
//
// The probes talk to the OS only through the `*Api` traits in `probes`.  The
// real implementation lives in the `win32` sub-module and is compiled on
// Windows only; no `unsafe` lives outside it.

#[cfg(windows)]
pub mod win32;
