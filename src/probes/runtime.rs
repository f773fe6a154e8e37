// ── Runtime / module probe ────────────────────────────────────────────────────
//
// Last-error round trip, tick counter, and the load → resolve → free chain of
// a dynamically loaded library, plus a lookup of an already-loaded module.
//
// The chain never short-circuits: if the load fails, symbol resolution still
// runs against the null handle and its natural (null) result is captured.

use std::{ffi::CStr, time::Duration};

use crate::{
    error::Result,
    probe::{Probe, Session},
    report::{Address, FieldValue, Report},
};

// ── Native calls ──────────────────────────────────────────────────────────────

/// A library handle returned by `LoadLibrary`, possibly null.
///
/// Dropping it calls `FreeLibrary` exactly when the handle is non-null.
pub trait LoadedLibrary {
    fn address(&self) -> Address;
}

/// The process/module primitives this probe exercises.
pub trait RuntimeApi {
    type Library: LoadedLibrary;

    /// `SetLastError`.
    fn set_last_error(&self, code: u32);
    /// `GetLastError`.
    fn last_error(&self) -> u32;
    /// `GetTickCount`.
    fn tick_count(&self) -> u32;
    /// `LoadLibraryA`; a failed load yields a null library.
    fn load_library(&self, name: &CStr) -> Self::Library;
    /// `GetProcAddress`, called even when `library` is null.
    fn proc_address(&self, library: &Self::Library, symbol: &CStr) -> Address;
    /// `GetModuleHandleA`.  The handle is borrowed, never freed.
    fn module_handle(&self, name: &CStr) -> Address;
    /// `Sleep`.
    fn sleep(&self, duration: Duration);
}

// ── Fixed inputs ──────────────────────────────────────────────────────────────

/// Written with `SetLastError` and expected back from `GetLastError`.
pub const LAST_ERROR_SENTINEL: u32 = 42;
pub const LIBRARY: &CStr = c"user32.dll";
pub const SYMBOL: &CStr = c"SetCursorPos";
pub const LOADED_MODULE: &CStr = c"kernel32.dll";
/// Pause after the library is released, before the probe returns.
pub const SETTLE: Duration = Duration::from_millis(10);

// ── Capture ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeCapture {
    pub last_error: u32,
    pub tick: u32,
    pub proc_address: Address,
    pub module: Address,
}

impl RuntimeCapture {
    pub fn report(&self) -> Report {
        Report::new()
            .field("GetLastError", FieldValue::U32(self.last_error))
            .field("tick", FieldValue::U32(self.tick))
            .field("proc", FieldValue::Address(self.proc_address))
            .field("module", FieldValue::Address(self.module))
    }
}

// ── Probe ─────────────────────────────────────────────────────────────────────

pub struct RuntimeProbe<A> {
    api: A,
}

impl<A: RuntimeApi> RuntimeProbe<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: RuntimeApi> Probe for RuntimeProbe<A> {
    const NAME: &'static str = "runtime_debug";

    fn exercise(&self, session: &mut Session<'_>) -> Result<()> {
        // Read back immediately: any later call may overwrite the value.
        self.api.set_last_error(LAST_ERROR_SENTINEL);
        let last_error = self.api.last_error();
        let tick = self.api.tick_count();

        {
            let library = self.api.load_library(LIBRARY);
            if library.address().is_null() {
                tracing::debug!(library = ?LIBRARY, "library did not load; resolving against null");
            }
            let proc_address = self.api.proc_address(&library, SYMBOL);
            let module = self.api.module_handle(LOADED_MODULE);

            let capture = RuntimeCapture {
                last_error,
                tick,
                proc_address,
                module,
            };
            tracing::debug!(?capture, "runtime captured");
            session.report(capture.report())?;
            // `library` is freed here, after the report.
        }

        self.api.sleep(SETTLE);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
