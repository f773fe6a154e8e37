#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::{BOOL, POINT},
    UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos, ShowCursor},
};

use super::Win32;
use crate::{
    error::ProbeError,
    probes::cursor::{CursorApi, Point},
};

impl CursorApi for Win32 {
    fn set_cursor_pos(&self, target: Point) -> bool {
        // SAFETY: no pointers; off-screen coordinates are clamped by the OS.
        match unsafe { SetCursorPos(target.x, target.y) } {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %ProbeError::win32("SetCursorPos", &e));
                false
            }
        }
    }

    fn cursor_pos(&self) -> Point {
        let mut p = POINT::default();
        // SAFETY: &mut p is a valid, writable POINT for the duration of the call.
        if let Err(e) = unsafe { GetCursorPos(&mut p) } {
            tracing::debug!(error = %ProbeError::win32("GetCursorPos", &e));
        }
        Point { x: p.x, y: p.y }
    }

    fn show_cursor(&self, show: bool) -> i32 {
        // SAFETY: adjusts this thread's cursor display counter; no pointers.
        unsafe { ShowCursor(BOOL::from(show)) }
    }
}
