//! Enumerations for board state management.

/// What keystrokes on the board currently drive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardMode {
    /// Navigation and card actions.
    Normal,
    /// Typing into the search query.
    Search,
    /// Typing the title of a new task.
    QuickAdd,
    /// Waiting for `y` to confirm deleting the selected card.
    ConfirmDelete,
}
