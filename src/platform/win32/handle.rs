// ── RAII wrappers for probe-owned OS objects ──────────────────────────────────
//
// Each wrapper may hold a null handle when acquisition failed.  Calls made
// through a null handle still go to the OS (and fail there naturally); drop
// releases only handles that were actually acquired.

#![allow(unsafe_code)]

use windows::Win32::Foundation::{CloseHandle, FreeLibrary, HANDLE, HMODULE};

use crate::report::Address;

// ── Library ───────────────────────────────────────────────────────────────────

/// A module loaded by `LoadLibraryA`.  `FreeLibrary` runs on drop.
///
/// Module handles obtained from `GetModuleHandleA` are borrowed and must never
/// be wrapped in this type.
pub struct Library(HMODULE);

impl Library {
    pub(crate) fn new(module: HMODULE) -> Self {
        Self(module)
    }

    /// The null library, used when the load failed.
    pub(crate) fn null() -> Self {
        Self(HMODULE::default())
    }

    pub(crate) fn raw(&self) -> HMODULE {
        self.0
    }

    pub fn address(&self) -> Address {
        Address(self.0 .0 as usize)
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if self.0.is_invalid() {
            return;
        }
        // SAFETY: self.0 was returned by a successful LoadLibraryA and has not
        // been freed since; this is the only owner.
        if let Err(e) = unsafe { FreeLibrary(self.0) } {
            tracing::warn!(error = %e, "FreeLibrary failed");
        }
    }
}

// ── Kernel handles ────────────────────────────────────────────────────────────

/// A kernel object handle closed with `CloseHandle` on drop.
struct OwnedHandle {
    handle: HANDLE,
    what: &'static str,
}

impl OwnedHandle {
    fn new(handle: HANDLE, what: &'static str) -> Self {
        Self { handle, what }
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        if self.handle.is_invalid() {
            return;
        }
        // SAFETY: the handle came from a successful Create* call, is owned
        // exclusively by this wrapper and has not been closed yet.
        if let Err(e) = unsafe { CloseHandle(self.handle) } {
            tracing::warn!(what = self.what, error = %e, "CloseHandle failed");
        }
    }
}

/// A named event from `CreateEventA`.
pub struct Event(OwnedHandle);

impl Event {
    pub(crate) fn new(handle: HANDLE) -> Self {
        Self(OwnedHandle::new(handle, "event"))
    }

    pub(crate) fn raw(&self) -> HANDLE {
        self.0.handle
    }
}

/// A thread from `CreateThread`.
///
/// Closing the handle does not stop the thread; a worker that outlived the
/// wait keeps running until it returns.
pub struct Worker(OwnedHandle);

impl Worker {
    pub(crate) fn new(handle: HANDLE) -> Self {
        Self(OwnedHandle::new(handle, "thread"))
    }

    pub(crate) fn raw(&self) -> HANDLE {
        self.0.handle
    }
}
