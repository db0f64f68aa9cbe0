//! Keyboard actions, independent of the keys bound to them.

/// What the reader wants to do. [`crate::config::KeyBindings`] maps keys to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Leave the initial page and load more cards. Default: m
    ShowMore,
    /// Rebuild the columns from scratch. Default: r
    Relayout,
    /// Focus the next visible card. Default: Tab/j/↓
    FocusNext,
    /// Focus the previous visible card. Default: Shift+Tab/k/↑
    FocusPrev,
    /// Open the focused card. Default: Enter
    OpenFocused,
    /// Close the open card. Default: Esc
    CloseModal,
    /// Exit. Default: q/Ctrl+c
    Quit,
}
