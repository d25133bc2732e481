use folio_protocol::CursorStyle;

/// Capability for changing the pointer cursor on hover.
///
/// Views never touch the host environment directly; the shell injects an
/// implementation (DOM cursor in the browser, status line in a terminal).
pub trait CursorController {
    fn set_cursor(&mut self, style: CursorStyle);
}

/// Ignores cursor requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCursor;

impl CursorController for NoCursor {
    fn set_cursor(&mut self, _style: CursorStyle) {}
}

/// Remembers the last requested cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub current: CursorStyle,
}

impl CursorController for CursorState {
    fn set_cursor(&mut self, style: CursorStyle) {
        self.current = style;
    }
}
