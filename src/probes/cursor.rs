// ── Cursor probe ──────────────────────────────────────────────────────────────
//
// Absolute cursor positioning and visibility toggling.  The read-back point
// may differ from the target when it lies off-screen or something else moves
// the cursor in between; that is captured as-is.

use crate::{
    error::Result,
    probe::{Probe, Session},
    report::{FieldValue, Report},
};

/// A screen coordinate pair (`POINT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// The cursor primitives this probe exercises.
pub trait CursorApi {
    /// `SetCursorPos`; returns whether the OS accepted it.
    fn set_cursor_pos(&self, target: Point) -> bool;
    /// `GetCursorPos`; a failed call leaves the zeroed point.
    fn cursor_pos(&self) -> Point;
    /// `ShowCursor`; returns the new display counter.
    fn show_cursor(&self, show: bool) -> i32;
}

pub const TARGET: Point = Point { x: 500, y: 300 };

/// Fixed text that opens the report line.
const LABEL: &str = "cursor after SetCursorPos:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCapture {
    pub position: Point,
}

impl CursorCapture {
    pub fn report(&self) -> Report {
        Report::labelled(LABEL)
            .field("x", FieldValue::I32(self.position.x))
            .field("y", FieldValue::I32(self.position.y))
    }
}

pub struct CursorProbe<A> {
    api: A,
}

impl<A: CursorApi> CursorProbe<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: CursorApi> Probe for CursorProbe<A> {
    const NAME: &'static str = "setpos_debug";

    fn exercise(&self, session: &mut Session<'_>) -> Result<()> {
        if !self.api.set_cursor_pos(TARGET) {
            tracing::debug!(?TARGET, "SetCursorPos was rejected");
        }
        let position = self.api.cursor_pos();

        // Side effects only.
        let shown = self.api.show_cursor(true);
        let hidden = self.api.show_cursor(false);
        tracing::trace!(shown, hidden, "ShowCursor display counter");

        session.report(CursorCapture { position }.report())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::probe::run;

    /// A one-monitor desktop that clamps the cursor to its bounds.
    struct FakeDesktop {
        width: i32,
        height: i32,
        pos: Cell<Point>,
        counter: Cell<i32>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeDesktop {
        fn new(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                pos: Cell::new(Point::default()),
                counter: Cell::new(0),
                calls: RefCell::default(),
            }
        }
    }

    impl CursorApi for &FakeDesktop {
        fn set_cursor_pos(&self, target: Point) -> bool {
            self.calls.borrow_mut().push(format!("SetCursorPos({}, {})", target.x, target.y));
            self.pos.set(Point {
                x: target.x.clamp(0, self.width - 1),
                y: target.y.clamp(0, self.height - 1),
            });
            true
        }
        fn cursor_pos(&self) -> Point {
            self.calls.borrow_mut().push("GetCursorPos".to_owned());
            self.pos.get()
        }
        fn show_cursor(&self, show: bool) -> i32 {
            self.calls.borrow_mut().push(format!("ShowCursor({show})"));
            self.counter.set(self.counter.get() + if show { 1 } else { -1 });
            self.counter.get()
        }
    }

    #[test]
    fn reads_back_target_when_on_screen() {
        let desk = FakeDesktop::new(1920, 1080);
        let mut out = Vec::new();
        run(&CursorProbe::new(&desk), &mut out).expect("run");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "setpos_debug start\ncursor after SetCursorPos: x=500 y=300\n"
        );
    }

    #[test]
    fn clamped_position_is_reported_not_masked() {
        let desk = FakeDesktop::new(400, 200);
        let t = run(&CursorProbe::new(&desk), &mut Vec::new()).expect("run");
        let r = t.report.unwrap();
        assert_eq!(r.get("x"), Some(FieldValue::I32(399)));
        assert_eq!(r.get("y"), Some(FieldValue::I32(199)));
    }

    #[test]
    fn visibility_toggles_on_then_off() {
        let desk = FakeDesktop::new(1920, 1080);
        run(&CursorProbe::new(&desk), &mut Vec::new()).expect("run");
        assert_eq!(
            *desk.calls.borrow(),
            [
                "SetCursorPos(500, 300)",
                "GetCursorPos",
                "ShowCursor(true)",
                "ShowCursor(false)",
            ]
        );
        assert_eq!(desk.counter.get(), 0);
    }
}
