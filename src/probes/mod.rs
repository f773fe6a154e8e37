// ── Probe procedures ──────────────────────────────────────────────────────────
//
// One module per capability cluster.  Each defines:
//   • the native calls it needs, as a trait (implemented for real by
//     `platform::win32::Win32`, and by recording fakes in tests),
//   • the fixed inputs of its call sequence,
//   • a capture struct whose `report()` fixes field names and order,
//   • the `Probe` impl that runs the sequence.
//
// The modules share nothing but the reporting convention.

pub mod cursor;
pub mod input;
pub mod runtime;
pub mod thread_time;

pub use cursor::CursorProbe;
pub use input::InputProbe;
pub use runtime::RuntimeProbe;
pub use thread_time::ThreadTimeProbe;
