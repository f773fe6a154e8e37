#![allow(unsafe_code)]

use std::{ffi::CStr, time::Duration};

use windows::{
    core::PCSTR,
    Win32::{
        Foundation::{BOOL, HANDLE, SYSTEMTIME, WAIT_OBJECT_0, WAIT_TIMEOUT},
        System::{
            Performance::{QueryPerformanceCounter, QueryPerformanceFrequency},
            SystemInformation::{GetLocalTime, GetSystemTime},
            Threading::{
                CreateEventA, CreateThread, ResetEvent, SetEvent, Sleep, WaitForSingleObject,
                THREAD_CREATION_FLAGS,
            },
        },
    },
};

use super::{
    handle::{Event, Worker},
    last_error_code, Win32,
};
use crate::{
    error::ProbeError,
    probes::thread_time::{
        CalendarTime, SyncEvent, ThreadTimeApi, WaitOutcome, WorkerThread, WORKER_SLEEP,
    },
};

fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

impl From<SYSTEMTIME> for CalendarTime {
    fn from(t: SYSTEMTIME) -> Self {
        Self {
            year: t.wYear,
            month: t.wMonth,
            day_of_week: t.wDayOfWeek,
            day: t.wDay,
            hour: t.wHour,
            minute: t.wMinute,
            second: t.wSecond,
            milliseconds: t.wMilliseconds,
        }
    }
}

// ── Worker thread ─────────────────────────────────────────────────────────────

// SAFETY: registered as the LPTHREAD_START_ROUTINE in CreateThread.  The
// parameter is unused, so no pointer is ever dereferenced.
unsafe extern "system" fn worker_main(_param: *mut core::ffi::c_void) -> u32 {
    Sleep(millis(WORKER_SLEEP));
    0
}

// ── Event / worker handles ────────────────────────────────────────────────────

impl SyncEvent for Event {
    fn set(&self) -> bool {
        // SAFETY: the handle is either a live event owned by `self` or null, in
        // which case SetEvent fails with ERROR_INVALID_HANDLE.
        unsafe { SetEvent(self.raw()) }.is_ok()
    }

    fn reset(&self) -> bool {
        // SAFETY: as for `set`.
        unsafe { ResetEvent(self.raw()) }.is_ok()
    }
}

impl WorkerThread for Worker {
    fn join_timeout(&self, timeout: Duration) -> WaitOutcome {
        // SAFETY: the handle is either a live thread owned by `self` or null,
        // in which case the wait returns WAIT_FAILED immediately.
        let wait = unsafe { WaitForSingleObject(self.raw(), millis(timeout)) };
        match wait {
            WAIT_OBJECT_0 => WaitOutcome::Finished,
            WAIT_TIMEOUT => WaitOutcome::TimedOut,
            _ => WaitOutcome::Failed(last_error_code()),
        }
    }
}

// ── ThreadTimeApi ─────────────────────────────────────────────────────────────

impl ThreadTimeApi for Win32 {
    type Event = Event;
    type Worker = Worker;

    fn create_event(&self, name: &CStr, manual_reset: bool, initially_set: bool) -> Event {
        // SAFETY: default security attributes; `name` is NUL-terminated and
        // outlives the call.  An existing event of the same name is opened
        // rather than created, which is the documented cross-instance collision.
        let created = unsafe {
            CreateEventA(
                None,
                BOOL::from(manual_reset),
                BOOL::from(initially_set),
                PCSTR(name.as_ptr().cast()),
            )
        };
        match created {
            Ok(handle) => Event::new(handle),
            Err(e) => {
                tracing::debug!(error = %ProbeError::win32("CreateEventA", &e));
                Event::new(HANDLE::default())
            }
        }
    }

    fn spawn_worker(&self) -> Worker {
        // SAFETY: worker_main has the LPTHREAD_START_ROUTINE signature and
        // ignores its (null) parameter; default stack size and security.
        let spawned = unsafe {
            CreateThread(
                None,
                0,
                Some(worker_main),
                None,
                THREAD_CREATION_FLAGS(0),
                None,
            )
        };
        match spawned {
            Ok(handle) => Worker::new(handle),
            Err(e) => {
                tracing::debug!(error = %ProbeError::win32("CreateThread", &e));
                Worker::new(HANDLE::default())
            }
        }
    }

    fn performance_frequency(&self) -> i64 {
        let mut freq = 0i64;
        // SAFETY: &mut freq is a valid, writable i64 for the duration of the call.
        if let Err(e) = unsafe { QueryPerformanceFrequency(&mut freq) } {
            tracing::debug!(error = %ProbeError::win32("QueryPerformanceFrequency", &e));
        }
        freq
    }

    fn performance_counter(&self) -> i64 {
        let mut ctr = 0i64;
        // SAFETY: &mut ctr is a valid, writable i64 for the duration of the call.
        if let Err(e) = unsafe { QueryPerformanceCounter(&mut ctr) } {
            tracing::debug!(error = %ProbeError::win32("QueryPerformanceCounter", &e));
        }
        ctr
    }

    fn system_time(&self) -> CalendarTime {
        // SAFETY: no parameters; returns the current UTC time by value.
        unsafe { GetSystemTime() }.into()
    }

    fn local_time(&self) -> CalendarTime {
        // SAFETY: no parameters; returns the current local time by value.
        unsafe { GetLocalTime() }.into()
    }
}
