// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states which
// invariant makes the call sound.
//
// `Win32` is a zero-sized handle that implements every probe's API trait with
// the real calls.  Acquired OS objects are wrapped in the RAII types from
// `handle` so they are released on every path.

#![allow(unsafe_code)]

use windows::Win32::Foundation::GetLastError;

// ── Sub-modules ───────────────────────────────────────────────────────────────

mod cursor;
pub(crate) mod handle;
mod input;
mod runtime;
mod thread_time;

pub use handle::{Event, Library, Worker};

/// The live operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32;

// ── Error helpers ─────────────────────────────────────────────────────────────

/// The raw last-error code of the calling thread.
///
/// Call immediately after a Win32 function that signals failure: `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
pub(crate) fn last_error_code() -> u32 {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    // It is always safe to call and never fails.
    unsafe { GetLastError() }.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// These hit the real OS.  The input and cursor probes are left out: they move
// the live cursor and inject keystrokes into whatever has focus.
