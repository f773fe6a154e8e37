#![allow(unsafe_code)]

use std::{ffi::CStr, time::Duration};

use windows::{
    core::PCSTR,
    Win32::{
        Foundation::{SetLastError, WIN32_ERROR},
        System::{
            LibraryLoader::{GetModuleHandleA, GetProcAddress, LoadLibraryA},
            SystemInformation::GetTickCount,
            Threading::Sleep,
        },
    },
};

use super::{handle::Library, last_error_code, Win32};
use crate::{
    error::ProbeError,
    probes::runtime::{LoadedLibrary, RuntimeApi},
    report::Address,
};

fn pcstr(s: &CStr) -> PCSTR {
    PCSTR(s.as_ptr().cast())
}

impl LoadedLibrary for Library {
    fn address(&self) -> Address {
        Library::address(self)
    }
}

impl RuntimeApi for Win32 {
    type Library = Library;

    fn set_last_error(&self, code: u32) {
        // SAFETY: writes this thread's last-error slot; always succeeds.
        unsafe { SetLastError(WIN32_ERROR(code)) }
    }

    fn last_error(&self) -> u32 {
        last_error_code()
    }

    fn tick_count(&self) -> u32 {
        // SAFETY: no parameters; always succeeds.
        unsafe { GetTickCount() }
    }

    fn load_library(&self, name: &CStr) -> Library {
        // SAFETY: `name` is a NUL-terminated string that outlives the call.
        match unsafe { LoadLibraryA(pcstr(name)) } {
            Ok(module) => Library::new(module),
            Err(e) => {
                tracing::debug!(error = %ProbeError::win32("LoadLibraryA", &e));
                Library::null()
            }
        }
    }

    fn proc_address(&self, library: &Library, symbol: &CStr) -> Address {
        // SAFETY: `symbol` is NUL-terminated and outlives the call.  A null
        // module handle is accepted by GetProcAddress (it simply fails or
        // searches the executable), so the call is made regardless.
        let proc = unsafe { GetProcAddress(library.raw(), pcstr(symbol)) };
        proc.map_or(Address::NULL, |f| Address(f as usize))
    }

    fn module_handle(&self, name: &CStr) -> Address {
        // SAFETY: `name` is NUL-terminated and outlives the call.  The returned
        // handle is not reference-counted and is never freed.
        match unsafe { GetModuleHandleA(pcstr(name)) } {
            Ok(module) => Address(module.0 as usize),
            Err(e) => {
                tracing::debug!(error = %ProbeError::win32("GetModuleHandleA", &e));
                Address::NULL
            }
        }
    }

    fn sleep(&self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        // SAFETY: no pointers; suspends the calling thread only.
        unsafe { Sleep(ms) }
    }
}
