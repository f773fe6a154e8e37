// ── Thread / time probe ───────────────────────────────────────────────────────
//
// Named manual-reset event, one worker thread joined with a bounded wait, the
// performance counter, and wall-clock time in UTC and local time.
//
// The event name is system-wide: two instances running at once open the same
// kernel object.  That collision is kept deliberately.
//
// The wait is the only suspension point.  A timeout is tolerated; the worker
// is never forcibly terminated, and both handles are closed on every path.

use std::time::Duration;

use crate::{
    error::Result,
    probe::{Probe, Session},
    report::{FieldValue, Report},
};

// ── Native types ──────────────────────────────────────────────────────────────

/// Calendar time as its raw sub-fields (`SYSTEMTIME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarTime {
    pub year: u16,
    pub month: u16,
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub milliseconds: u16,
}

/// Result of a bounded wait on a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Finished,
    TimedOut,
    /// The wait itself failed (e.g. the spawn failed and the handle is null).
    Failed(u32),
}

/// A named synchronisation event handle, possibly null.  Closed on drop.
pub trait SyncEvent {
    /// `SetEvent`.
    fn set(&self) -> bool;
    /// `ResetEvent`.
    fn reset(&self) -> bool;
}

/// A worker thread handle, possibly null.  Closed on drop without
/// terminating the thread.
pub trait WorkerThread {
    /// `WaitForSingleObject(thread, timeout)`.
    fn join_timeout(&self, timeout: Duration) -> WaitOutcome;
}

// ── Native calls ──────────────────────────────────────────────────────────────

/// The thread, event and clock primitives this probe exercises.
pub trait ThreadTimeApi {
    type Event: SyncEvent;
    type Worker: WorkerThread;

    /// `CreateEventA(NULL, manual_reset, initially_set, name)`.
    fn create_event(&self, name: &std::ffi::CStr, manual_reset: bool, initially_set: bool) -> Self::Event;
    /// `CreateThread` running a worker that sleeps for `WORKER_SLEEP`.
    fn spawn_worker(&self) -> Self::Worker;
    /// `QueryPerformanceFrequency`.
    fn performance_frequency(&self) -> i64;
    /// `QueryPerformanceCounter`.
    fn performance_counter(&self) -> i64;
    /// `GetSystemTime` (UTC).
    fn system_time(&self) -> CalendarTime;
    /// `GetLocalTime`.
    fn local_time(&self) -> CalendarTime;
}

// ── Fixed inputs ──────────────────────────────────────────────────────────────

pub const EVENT_NAME: &std::ffi::CStr = c"waygate_evt";
pub const WORKER_SLEEP: Duration = Duration::from_millis(1);
pub const WAIT_TIMEOUT: Duration = Duration::from_millis(1000);

// ── Capture ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadTimeCapture {
    pub frequency: i64,
    pub counter: i64,
    pub system: CalendarTime,
    pub local: CalendarTime,
}

impl ThreadTimeCapture {
    pub fn report(&self) -> Report {
        Report::new()
            .field("freq", FieldValue::I64(self.frequency))
            .field("ctr", FieldValue::I64(self.counter))
            .field("sys_h", FieldValue::U16(self.system.hour))
            .field("local_h", FieldValue::U16(self.local.hour))
    }
}

// ── Probe ─────────────────────────────────────────────────────────────────────

pub struct ThreadTimeProbe<A> {
    api: A,
}

impl<A: ThreadTimeApi> ThreadTimeProbe<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: ThreadTimeApi> Probe for ThreadTimeProbe<A> {
    const NAME: &'static str = "thread_time_debug";

    fn exercise(&self, session: &mut Session<'_>) -> Result<()> {
        // Declared event-first so the worker handle is closed first.
        let event = self.api.create_event(EVENT_NAME, true, false);
        let worker = self.api.spawn_worker();

        let set = event.set();
        let reset = event.reset();
        tracing::trace!(set, reset, "event signalled and reset");

        match worker.join_timeout(WAIT_TIMEOUT) {
            WaitOutcome::Finished => tracing::debug!("worker finished"),
            WaitOutcome::TimedOut => {
                tracing::debug!(timeout = ?WAIT_TIMEOUT, "worker still running; continuing")
            }
            WaitOutcome::Failed(code) => tracing::debug!(code, "wait on worker failed"),
        }

        let capture = ThreadTimeCapture {
            frequency: self.api.performance_frequency(),
            counter: self.api.performance_counter(),
            system: self.api.system_time(),
            local: self.api.local_time(),
        };
        tracing::debug!(?capture, "thread/time captured");
        session.report(capture.report())
        // `worker` then `event` are closed here, after the report.
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
