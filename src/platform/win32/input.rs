#![allow(unsafe_code)]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    keybd_event, mouse_event, GetAsyncKeyState, GetKeyState, MapVirtualKeyA, SendInput, INPUT,
    INPUT_0, INPUT_MOUSE, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MAPVK_VK_TO_VSC, MOUSEEVENTF_MOVE,
    MOUSEINPUT,
};

use super::Win32;
use crate::probes::input::{InputApi, KeyDirection, VirtualKey};

impl InputApi for Win32 {
    fn map_virtual_key_to_scan_code(&self, key: VirtualKey) -> u32 {
        // SAFETY: pure table lookup; any code/map-type pair is accepted.
        unsafe { MapVirtualKeyA(u32::from(key.0), MAPVK_VK_TO_VSC) }
    }

    fn async_key_state(&self, key: VirtualKey) -> i16 {
        // SAFETY: read-only query; invalid codes just return 0.
        unsafe { GetAsyncKeyState(i32::from(key.0)) }
    }

    fn key_state(&self, key: VirtualKey) -> i16 {
        // SAFETY: read-only query of this thread's keyboard state.
        unsafe { GetKeyState(i32::from(key.0)) }
    }

    fn key_event(&self, key: VirtualKey, direction: KeyDirection) {
        let flags = match direction {
            KeyDirection::Down => KEYBD_EVENT_FLAGS(0),
            KeyDirection::Up => KEYEVENTF_KEYUP,
        };
        // keybd_event takes a BYTE; every virtual-key code fits.
        let vk = key.0 as u8;
        // SAFETY: no pointers involved; the event is queued to the input stream.
        unsafe { keybd_event(vk, 0, flags, 0) }
    }

    fn mouse_move_event(&self, dx: i32, dy: i32) {
        // SAFETY: no pointers involved; a relative move with no wheel data.
        unsafe { mouse_event(MOUSEEVENTF_MOVE, dx, dy, 0, 0) }
    }

    fn send_mouse_move(&self, dx: i32, dy: i32) -> u32 {
        let inputs = [INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    dwFlags: MOUSEEVENTF_MOVE,
                    ..Default::default()
                },
            },
        }];
        // INPUT is a few dozen bytes; the cast to i32 is always lossless.
        let size = std::mem::size_of::<INPUT>() as i32;
        // SAFETY: `inputs` is a fully initialised INPUT array that outlives the
        // call, and `size` is the size of one element as SendInput requires.
        unsafe { SendInput(&inputs, size) }
    }
}
