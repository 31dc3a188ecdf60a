//! Input mode and screen navigation types.
//!
//! # State Machine
//!
//! The application operates in one of two input modes:
//! - **Normal**: Grid or detail navigation and commands
//! - **Search**: Active search with typing or result navigation focus
//!
//! Independently, a [`Navigation`] stack records which detail panels are open.
//! An empty stack shows the card grid.
//!
//! # Example
//!
//! ```rust
//! use countrydex::app::modes::{InputMode, Navigation, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let mut nav = Navigation::default();
//! nav.push("PER");
//! assert_eq!(nav.current().map(|c| c.code.as_str()), Some("PER"));
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through the filtered cards.
    ///
    /// Accepts h/j/k/l for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// One open detail panel: the country shown and the focused border link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCursor {
    /// Alpha-3 code of the displayed country.
    pub code: String,
    /// Index into the country's border list.
    pub border_index: usize,
}

/// Stack of open detail panels, grid at the bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    stack: Vec<DetailCursor>,
}

impl Navigation {
    /// Opens a detail panel on top of the current screen.
    pub fn push(&mut self, code: impl Into<String>) {
        self.stack.push(DetailCursor {
            code: code.into(),
            border_index: 0,
        });
    }

    /// Closes the top panel; returns `false` when already at the grid.
    pub fn pop(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<&DetailCursor> {
        self.stack.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut DetailCursor> {
        self.stack.last_mut()
    }

    /// Number of open detail panels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_grid(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popping_the_last_panel_returns_to_grid() {
        let mut nav = Navigation::default();
        nav.push("PER");
        nav.push("BOL");
        assert_eq!(nav.depth(), 2);
        assert!(nav.pop());
        assert_eq!(nav.current().map(|c| c.code.as_str()), Some("PER"));
        assert!(nav.pop());
        assert!(nav.is_grid());
        assert!(!nav.pop());
    }

    #[test]
    fn new_panels_focus_the_first_border() {
        let mut nav = Navigation::default();
        nav.push("PER");
        if let Some(cursor) = nav.current_mut() {
            cursor.border_index = 3;
        }
        nav.push("CHL");
        assert_eq!(nav.current().map(|c| c.border_index), Some(0));
    }
}
