// ── Input probe ───────────────────────────────────────────────────────────────
//
// Scan-code translation, key-state sampling, and synthetic key/mouse events
// through both the legacy single-event calls and `SendInput`.  The injected
// events are real and are not undone.

use crate::{
    error::Result,
    probe::{Probe, Session},
    report::{FieldValue, Report},
};

// ── Virtual keys ──────────────────────────────────────────────────────────────

/// A Win32 virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    pub const SHIFT: Self = Self(0x10);
    pub const CAPITAL: Self = Self(0x14);
    /// Letter keys share their code with the upper-case ASCII letter.
    pub const A: Self = Self(b'A' as u16);
}

/// Direction of a synthetic key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

// ── Native calls ──────────────────────────────────────────────────────────────

/// The keyboard/mouse primitives this probe exercises.
pub trait InputApi {
    /// `MapVirtualKey(vk, MAPVK_VK_TO_VSC)`.
    fn map_virtual_key_to_scan_code(&self, key: VirtualKey) -> u32;
    /// `GetAsyncKeyState`.
    fn async_key_state(&self, key: VirtualKey) -> i16;
    /// `GetKeyState`.
    fn key_state(&self, key: VirtualKey) -> i16;
    /// `keybd_event` with no scan code and no extra info.
    fn key_event(&self, key: VirtualKey, direction: KeyDirection);
    /// `mouse_event(MOUSEEVENTF_MOVE, dx, dy, 0, 0)`.
    fn mouse_move_event(&self, dx: i32, dy: i32);
    /// `SendInput` with a single relative-move `INPUT_MOUSE` record.
    /// Returns the number of events the OS accepted.
    fn send_mouse_move(&self, dx: i32, dy: i32) -> u32;
}

// ── Fixed inputs ──────────────────────────────────────────────────────────────

pub const SCAN_CODE_KEY: VirtualKey = VirtualKey::A;
pub const ASYNC_STATE_KEY: VirtualKey = VirtualKey::SHIFT;
pub const SYNC_STATE_KEY: VirtualKey = VirtualKey::CAPITAL;
pub const INJECTED_KEY: VirtualKey = VirtualKey::A;
pub const MOUSE_DELTA: (i32, i32) = (1, 1);

// ── Capture ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputCapture {
    /// Narrowed to `WORD`, as the scan code fits in 16 bits.
    pub scan_code: u16,
    pub async_key_state: i16,
    pub key_state: i16,
}

impl InputCapture {
    pub fn report(&self) -> Report {
        Report::new()
            .field("MapVirtualKey", FieldValue::U16(self.scan_code))
            .field("GetAsyncKeyState", FieldValue::I16(self.async_key_state))
            .field("GetKeyState", FieldValue::I16(self.key_state))
    }
}

// ── Probe ─────────────────────────────────────────────────────────────────────

pub struct InputProbe<A> {
    api: A,
}

impl<A: InputApi> InputProbe<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: InputApi> Probe for InputProbe<A> {
    const NAME: &'static str = "input_debug";

    fn exercise(&self, session: &mut Session<'_>) -> Result<()> {
        // Truncation to WORD is part of the captured value.
        let scan_code = self.api.map_virtual_key_to_scan_code(SCAN_CODE_KEY) as u16;
        let async_key_state = self.api.async_key_state(ASYNC_STATE_KEY);
        let key_state = self.api.key_state(SYNC_STATE_KEY);

        self.api.key_event(INJECTED_KEY, KeyDirection::Down);
        self.api.key_event(INJECTED_KEY, KeyDirection::Up);

        let (dx, dy) = MOUSE_DELTA;
        self.api.mouse_move_event(dx, dy);
        let accepted = self.api.send_mouse_move(dx, dy);
        if accepted != 1 {
            // Typically UIPI or a locked desktop; the query fields still stand.
            tracing::debug!(accepted, "SendInput did not accept the mouse event");
        }

        let capture = InputCapture {
            scan_code,
            async_key_state,
            key_state,
        };
        tracing::debug!(?capture, "input captured");
        session.report(capture.report())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::probe::run;

    #[derive(Default)]
    struct FakeInput {
        calls: RefCell<Vec<String>>,
        scan_code: u32,
        accepted: u32,
    }

    impl FakeInput {
        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl InputApi for &FakeInput {
        fn map_virtual_key_to_scan_code(&self, key: VirtualKey) -> u32 {
            self.log(format!("MapVirtualKey({:#x})", key.0));
            self.scan_code
        }
        fn async_key_state(&self, key: VirtualKey) -> i16 {
            self.log(format!("GetAsyncKeyState({:#x})", key.0));
            -32767
        }
        fn key_state(&self, key: VirtualKey) -> i16 {
            self.log(format!("GetKeyState({:#x})", key.0));
            1
        }
        fn key_event(&self, key: VirtualKey, direction: KeyDirection) {
            self.log(format!("keybd_event({:#x}, {direction:?})", key.0));
        }
        fn mouse_move_event(&self, dx: i32, dy: i32) {
            self.log(format!("mouse_event({dx}, {dy})"));
        }
        fn send_mouse_move(&self, dx: i32, dy: i32) -> u32 {
            self.log(format!("SendInput({dx}, {dy})"));
            self.accepted
        }
    }

    fn fake() -> FakeInput {
        FakeInput {
            scan_code: 30,
            accepted: 1,
            ..Default::default()
        }
    }

    #[test]
    fn report_line_has_fixed_fields() {
        let api = fake();
        let mut out = Vec::new();
        run(&InputProbe::new(&api), &mut out).expect("run");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "input_debug start\nMapVirtualKey=30 GetAsyncKeyState=-32767 GetKeyState=1\n"
        );
    }

    #[test]
    fn calls_run_in_fixed_order() {
        let api = fake();
        run(&InputProbe::new(&api), &mut Vec::new()).expect("run");
        assert_eq!(
            *api.calls.borrow(),
            [
                "MapVirtualKey(0x41)",
                "GetAsyncKeyState(0x10)",
                "GetKeyState(0x14)",
                "keybd_event(0x41, Down)",
                "keybd_event(0x41, Up)",
                "mouse_event(1, 1)",
                "SendInput(1, 1)",
            ]
        );
    }

    #[test]
    fn rejected_injection_does_not_change_fields() {
        let api = FakeInput {
            accepted: 0,
            ..fake()
        };
        let t = run(&InputProbe::new(&api), &mut Vec::new()).expect("run");
        let report = t.report.expect("report");
        assert_eq!(report.names(), ["MapVirtualKey", "GetAsyncKeyState", "GetKeyState"]);
        assert_eq!(report.get("MapVirtualKey"), Some(FieldValue::U16(30)));
    }

    #[test]
    fn scan_code_is_narrowed_to_a_word() {
        let api = FakeInput {
            scan_code: 0x1_001e,
            ..fake()
        };
        let t = run(&InputProbe::new(&api), &mut Vec::new()).expect("run");
        assert_eq!(t.report.unwrap().get("MapVirtualKey"), Some(FieldValue::U16(0x1e)));
    }
}
