// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32`, which holds
// every Win32 FFI call the probes make.  Each unsafe block in that module
// MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Reference probes for native Win32 primitives.
//!
//! Each probe prints a start marker and a single `name=value` report line so
//! that another implementation of the same APIs can be diffed against it.

pub mod error;
pub mod logging;
pub mod platform;
pub mod probe;
pub mod probes;
pub mod report;
pub mod runner;

pub use error::{ProbeError, Result};
pub use probe::{Probe, Session, Transcript};
pub use report::{Address, CaptureField, FieldValue, Report};
