//! Recall of previously submitted input lines.
//!
//! The cursor counts backwards from the newest entry: offset 0 is the most
//! recent line, offset `len - 1` the oldest. The resting state is "fresh",
//! meaning no entry is selected and the user is editing a new line.

/// Position of the history cursor.
///
/// Conventionally written as an integer in `[-1, len - 1]` where -1 is the
/// fresh-input sentinel; [`HistoryCursor::as_index`] gives that form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor(Option<usize>);

impl HistoryCursor {
    pub const FRESH: HistoryCursor = HistoryCursor(None);

    pub fn is_fresh(self) -> bool {
        self.0.is_none()
    }

    /// Entries back from the newest, or `None` at the sentinel.
    pub fn offset(self) -> Option<usize> {
        self.0
    }

    pub fn as_index(self) -> isize {
        self.0.map_or(-1, |offset| offset as isize)
    }

    /// One step toward older entries, clamped at the oldest of `len`.
    fn older(self, len: usize) -> Self {
        match (self.0, len) {
            (_, 0) => Self::FRESH,
            (None, _) => HistoryCursor(Some(0)),
            (Some(offset), len) => HistoryCursor(Some((offset + 1).min(len - 1))),
        }
    }

    /// One step toward newer entries, stopping at the sentinel.
    fn newer(self) -> Self {
        match self.0 {
            None | Some(0) => Self::FRESH,
            Some(offset) => HistoryCursor(Some(offset - 1)),
        }
    }

    /// Position in a log of `len` entries, counted from the front.
    fn position(self, len: usize) -> Option<usize> {
        self.0.and_then(|offset| len.checked_sub(1 + offset))
    }
}

/// Append-only log of submitted lines plus a navigation cursor.
#[derive(Debug, Clone, Default)]
pub struct InputHistory {
    entries: Vec<String>,
    cursor: HistoryCursor,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` and return the cursor to fresh input. Duplicates are
    /// kept.
    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.cursor = HistoryCursor::FRESH;
    }

    /// Step to the next older entry and return it. Stays on the oldest entry
    /// once reached; returns an empty string when the log is empty.
    pub fn navigate_up(&mut self) -> String {
        self.cursor = self.cursor.older(self.entries.len());
        self.current()
    }

    /// Step to the next newer entry and return it, or an empty string once
    /// back at fresh input.
    pub fn navigate_down(&mut self) -> String {
        self.cursor = self.cursor.newer();
        self.current()
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current(&self) -> String {
        self.cursor
            .position(self.entries.len())
            .and_then(|pos| self.entries.get(pos))
            .cloned()
            .unwrap_or_default()
    }
}
