//! Linux input event codes and the fixed symbol table for textual mappings.
//!
//! The mapping layer works on raw `u16` event codes so it stays independent
//! of the uinput backend. Only the codes the driver can actually bind are
//! listed here; the table doubles as the parser's symbol lookup and the
//! reverse lookup used when a descriptor is re-serialized.

/// Classification of an output event code by its event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Digital key or button (`EV_KEY`).
    Key,
    /// Absolute axis position (`EV_ABS`).
    Abs,
    /// Relative motion (`EV_REL`).
    Rel,
}

// EV_KEY: keyboard range (< 256)
pub const KEY_ESC: u16 = 1;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;
pub const KEY_5: u16 = 6;
pub const KEY_6: u16 = 7;
pub const KEY_7: u16 = 8;
pub const KEY_8: u16 = 9;
pub const KEY_9: u16 = 10;
pub const KEY_0: u16 = 11;
pub const KEY_BACKSPACE: u16 = 14;
pub const KEY_TAB: u16 = 15;
pub const KEY_Q: u16 = 16;
pub const KEY_W: u16 = 17;
pub const KEY_E: u16 = 18;
pub const KEY_R: u16 = 19;
pub const KEY_T: u16 = 20;
pub const KEY_Y: u16 = 21;
pub const KEY_U: u16 = 22;
pub const KEY_I: u16 = 23;
pub const KEY_O: u16 = 24;
pub const KEY_P: u16 = 25;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTCTRL: u16 = 29;
pub const KEY_A: u16 = 30;
pub const KEY_S: u16 = 31;
pub const KEY_D: u16 = 32;
pub const KEY_F: u16 = 33;
pub const KEY_G: u16 = 34;
pub const KEY_H: u16 = 35;
pub const KEY_J: u16 = 36;
pub const KEY_K: u16 = 37;
pub const KEY_L: u16 = 38;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_Z: u16 = 44;
pub const KEY_X: u16 = 45;
pub const KEY_C: u16 = 46;
pub const KEY_V: u16 = 47;
pub const KEY_B: u16 = 48;
pub const KEY_N: u16 = 49;
pub const KEY_M: u16 = 50;
pub const KEY_LEFTALT: u16 = 56;
pub const KEY_SPACE: u16 = 57;
pub const KEY_HOME: u16 = 102;
pub const KEY_UP: u16 = 103;
pub const KEY_PAGEUP: u16 = 104;
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;
pub const KEY_END: u16 = 107;
pub const KEY_DOWN: u16 = 108;
pub const KEY_PAGEDOWN: u16 = 109;
pub const KEY_INSERT: u16 = 110;
pub const KEY_DELETE: u16 = 111;

// EV_KEY: generic joystick buttons
pub const BTN_0: u16 = 0x100;
pub const BTN_1: u16 = 0x101;
pub const BTN_2: u16 = 0x102;
pub const BTN_3: u16 = 0x103;
pub const BTN_4: u16 = 0x104;
pub const BTN_5: u16 = 0x105;

// EV_KEY: mouse buttons (BTN_MOUSE..=BTN_TASK)
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_SIDE: u16 = 0x113;
pub const BTN_EXTRA: u16 = 0x114;
pub const BTN_FORWARD: u16 = 0x115;
pub const BTN_BACK: u16 = 0x116;
pub const BTN_TASK: u16 = 0x117;

// EV_KEY: joystick base buttons
pub const BTN_TRIGGER: u16 = 0x120;
pub const BTN_THUMB: u16 = 0x121;
pub const BTN_THUMB2: u16 = 0x122;
pub const BTN_TOP: u16 = 0x123;
pub const BTN_TOP2: u16 = 0x124;
pub const BTN_PINKIE: u16 = 0x125;
pub const BTN_BASE: u16 = 0x126;
pub const BTN_BASE2: u16 = 0x127;
pub const BTN_BASE3: u16 = 0x128;
pub const BTN_BASE4: u16 = 0x129;

// EV_KEY: gamepad buttons (xpad layout)
pub const BTN_A: u16 = 0x130;
pub const BTN_B: u16 = 0x131;
pub const BTN_C: u16 = 0x132;
pub const BTN_X: u16 = 0x133;
pub const BTN_Y: u16 = 0x134;
pub const BTN_Z: u16 = 0x135;
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;
pub const BTN_TL2: u16 = 0x138;
pub const BTN_TR2: u16 = 0x139;
pub const BTN_SELECT: u16 = 0x13a;
pub const BTN_START: u16 = 0x13b;
pub const BTN_MODE: u16 = 0x13c;
pub const BTN_THUMBL: u16 = 0x13d;
pub const BTN_THUMBR: u16 = 0x13e;

// EV_ABS
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_Z: u16 = 0x02;
pub const ABS_RX: u16 = 0x03;
pub const ABS_RY: u16 = 0x04;
pub const ABS_RZ: u16 = 0x05;
pub const ABS_THROTTLE: u16 = 0x06;
pub const ABS_RUDDER: u16 = 0x07;
pub const ABS_WHEEL: u16 = 0x08;
pub const ABS_GAS: u16 = 0x09;
pub const ABS_BRAKE: u16 = 0x0a;
pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;
pub const ABS_HAT1X: u16 = 0x12;
pub const ABS_HAT1Y: u16 = 0x13;

// EV_REL
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_Z: u16 = 0x02;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;

/// `true` for codes that belong on a keyboard device.
pub fn is_keyboard_key(code: u16) -> bool {
    code < 256
}

/// `true` for codes inside the mouse button window.
pub fn is_mouse_button(code: u16) -> bool {
    (BTN_LEFT..=BTN_TASK).contains(&code)
}

macro_rules! symbol_table {
    ($(($name:ident, $kind:ident)),* $(,)?) => {
        const SYMBOLS: &[(&str, EventKind, u16)] = &[
            $((stringify!($name), EventKind::$kind, $name),)*
        ];
    };
}

symbol_table![
    (KEY_ESC, Key),
    (KEY_1, Key),
    (KEY_2, Key),
    (KEY_3, Key),
    (KEY_4, Key),
    (KEY_5, Key),
    (KEY_6, Key),
    (KEY_7, Key),
    (KEY_8, Key),
    (KEY_9, Key),
    (KEY_0, Key),
    (KEY_BACKSPACE, Key),
    (KEY_TAB, Key),
    (KEY_Q, Key),
    (KEY_W, Key),
    (KEY_E, Key),
    (KEY_R, Key),
    (KEY_T, Key),
    (KEY_Y, Key),
    (KEY_U, Key),
    (KEY_I, Key),
    (KEY_O, Key),
    (KEY_P, Key),
    (KEY_ENTER, Key),
    (KEY_LEFTCTRL, Key),
    (KEY_A, Key),
    (KEY_S, Key),
    (KEY_D, Key),
    (KEY_F, Key),
    (KEY_G, Key),
    (KEY_H, Key),
    (KEY_J, Key),
    (KEY_K, Key),
    (KEY_L, Key),
    (KEY_LEFTSHIFT, Key),
    (KEY_Z, Key),
    (KEY_X, Key),
    (KEY_C, Key),
    (KEY_V, Key),
    (KEY_B, Key),
    (KEY_N, Key),
    (KEY_M, Key),
    (KEY_LEFTALT, Key),
    (KEY_SPACE, Key),
    (KEY_HOME, Key),
    (KEY_UP, Key),
    (KEY_PAGEUP, Key),
    (KEY_LEFT, Key),
    (KEY_RIGHT, Key),
    (KEY_END, Key),
    (KEY_DOWN, Key),
    (KEY_PAGEDOWN, Key),
    (KEY_INSERT, Key),
    (KEY_DELETE, Key),
    (BTN_0, Key),
    (BTN_1, Key),
    (BTN_2, Key),
    (BTN_3, Key),
    (BTN_4, Key),
    (BTN_5, Key),
    (BTN_LEFT, Key),
    (BTN_RIGHT, Key),
    (BTN_MIDDLE, Key),
    (BTN_SIDE, Key),
    (BTN_EXTRA, Key),
    (BTN_FORWARD, Key),
    (BTN_BACK, Key),
    (BTN_TASK, Key),
    (BTN_TRIGGER, Key),
    (BTN_THUMB, Key),
    (BTN_THUMB2, Key),
    (BTN_TOP, Key),
    (BTN_TOP2, Key),
    (BTN_PINKIE, Key),
    (BTN_BASE, Key),
    (BTN_BASE2, Key),
    (BTN_BASE3, Key),
    (BTN_BASE4, Key),
    (BTN_A, Key),
    (BTN_B, Key),
    (BTN_C, Key),
    (BTN_X, Key),
    (BTN_Y, Key),
    (BTN_Z, Key),
    (BTN_TL, Key),
    (BTN_TR, Key),
    (BTN_TL2, Key),
    (BTN_TR2, Key),
    (BTN_SELECT, Key),
    (BTN_START, Key),
    (BTN_MODE, Key),
    (BTN_THUMBL, Key),
    (BTN_THUMBR, Key),
    (ABS_X, Abs),
    (ABS_Y, Abs),
    (ABS_Z, Abs),
    (ABS_RX, Abs),
    (ABS_RY, Abs),
    (ABS_RZ, Abs),
    (ABS_THROTTLE, Abs),
    (ABS_RUDDER, Abs),
    (ABS_WHEEL, Abs),
    (ABS_GAS, Abs),
    (ABS_BRAKE, Abs),
    (ABS_HAT0X, Abs),
    (ABS_HAT0Y, Abs),
    (ABS_HAT1X, Abs),
    (ABS_HAT1Y, Abs),
    (REL_X, Rel),
    (REL_Y, Rel),
    (REL_Z, Rel),
    (REL_HWHEEL, Rel),
    (REL_WHEEL, Rel),
];

/// Resolves a symbolic event name to its kind and code.
pub fn lookup(name: &str) -> Option<(EventKind, u16)> {
    SYMBOLS
        .iter()
        .find(|(sym, _, _)| *sym == name)
        .map(|&(_, kind, code)| (kind, code))
}

/// Reverse lookup: the symbolic name for a kind/code pair, if it is in the
/// table. Codes outside the table have no textual representation.
pub fn name_of(kind: EventKind, code: u16) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|&&(_, k, c)| k == kind && c == code)
        .map(|&(sym, _, _)| sym)
}
