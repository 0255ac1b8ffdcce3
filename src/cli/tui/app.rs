//! Picker state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::event::{Event, EventSource};
use super::item::{PickerItem, ScriptRow};
use super::ui::Terminal;
use super::views;
use super::Selection;
use crate::domain::ScriptEntry;

/// Where the picker session is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PickerState {
    /// List displayed, accepting input
    #[default]
    Active,
    /// User accepted the highlighted row
    Confirmed(ScriptEntry),
    /// User quit without choosing
    Cancelled,
}

/// Input mode while active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Filter,
}

/// Interactive script picker
pub struct Picker {
    /// All rows in catalog order
    rows: Vec<ScriptRow>,

    /// Indices into `rows` that match the current filter, best first
    visible: Vec<usize>,

    /// Current filter text
    query: String,

    /// Input mode
    mode: InputMode,

    /// Highlighted position within `visible`
    selected: usize,

    /// Session state
    state: PickerState,

    /// Terminal rows available for list items
    list_height: u16,
}

impl Picker {
    /// Create a picker over the given entries, in display order
    pub fn new(entries: Vec<ScriptEntry>) -> Self {
        let rows: Vec<ScriptRow> = entries.into_iter().map(ScriptRow::from).collect();
        let visible = (0..rows.len()).collect();

        Self {
            rows,
            visible,
            query: String::new(),
            mode: InputMode::Browse,
            selected: 0,
            state: PickerState::Active,
            list_height: 0,
        }
    }

    /// Run the picker loop until the user confirms or cancels
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventSource) -> Result<()> {
        let size = terminal.size()?;
        self.handle_resize(size.width, size.height);

        while self.is_active() {
            terminal.draw(|frame| views::list::draw(frame, self))?;
            self.handle_event(events.next()?);
        }

        Ok(())
    }

    /// Feed one terminal event to the state machine
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => self.handle_resize(width, height),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.is_active() {
            return;
        }

        // Ctrl+C and q cancel in every mode
        if is_quit_key(&key) {
            self.state = PickerState::Cancelled;
            return;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(key),
            InputMode::Filter => self.handle_filter_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.confirm(),

            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.visible.len().saturating_sub(1);
            }
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),

            KeyCode::Char('/') => {
                self.mode = InputMode::Filter;
            }
            KeyCode::Esc => self.clear_filter(),

            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.clear_filter();
                self.mode = InputMode::Browse;
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Char(c) if is_text_input(&key) => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    /// Recompute layout for a new terminal size
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.list_height = views::list::list_height(width, height);
    }

    /// Accept the highlighted row, if there is one
    fn confirm(&mut self) {
        if let Some(row) = self.selected_row() {
            self.state = PickerState::Confirmed(row.entry().clone());
        }
    }

    fn move_down(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    fn move_up(&mut self) {
        if !self.visible.is_empty() {
            self.selected = if self.selected == 0 {
                self.visible.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn page_down(&mut self) {
        let last = self.visible.len().saturating_sub(1);
        self.selected = (self.selected + self.page_size()).min(last);
    }

    fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size());
    }

    fn clear_filter(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
        }
    }

    /// Re-run the filter and reset the highlight
    fn refilter(&mut self) {
        self.selected = 0;

        if self.query.is_empty() {
            self.visible = (0..self.rows.len()).collect();
            return;
        }

        let pattern = Pattern::parse(&self.query, CaseMatching::Ignore, Normalization::Smart);
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();

        let mut scored: Vec<(usize, u32)> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                buf.clear();
                let haystack = Utf32Str::new(row.filter_value(), &mut buf);
                pattern.score(haystack, &mut matcher).map(|score| (idx, score))
            })
            .collect();

        // Stable sort keeps catalog order between equal scores
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        self.visible = scored.into_iter().map(|(idx, _)| idx).collect();
    }

    /// Returns true while the session accepts input
    pub fn is_active(&self) -> bool {
        self.state == PickerState::Active
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Highlighted position among visible rows
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Returns the highlighted row
    pub fn selected_row(&self) -> Option<&ScriptRow> {
        self.visible.get(self.selected).map(|&idx| &self.rows[idx])
    }

    /// Rows matching the current filter, in display order
    pub fn visible_rows(&self) -> impl Iterator<Item = &ScriptRow> {
        self.visible.iter().map(|&idx| &self.rows[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    /// Number of items that fit in the list area
    pub fn page_size(&self) -> usize {
        (self.list_height / views::list::ROWS_PER_ITEM).max(1) as usize
    }

    /// Finish the session
    pub fn into_selection(self) -> Selection {
        match self.state {
            PickerState::Confirmed(entry) => Selection::chosen(entry),
            PickerState::Active | PickerState::Cancelled => Selection::none(),
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => is_text_input(key),
        _ => false,
    }
}

/// Plain or shifted characters; other chords are never text
fn is_text_input(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScriptCatalog;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl_c() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    }

    fn type_text(picker: &mut Picker, text: &str) {
        for c in text.chars() {
            picker.handle_event(key(KeyCode::Char(c)));
        }
    }

    fn catalog() -> ScriptCatalog {
        ScriptCatalog::from_scripts([
            ("build", "tsc"),
            ("dev", "vite"),
            ("lint", "eslint ."),
            ("test", "jest"),
        ])
    }

    fn picker() -> Picker {
        Picker::new(catalog().with_suggestion(None))
    }

    fn visible_titles(picker: &Picker) -> Vec<&str> {
        picker.visible_rows().map(|r| r.title()).collect()
    }

    #[test]
    fn starts_active_on_first_row() {
        let p = picker();
        assert!(p.is_active());
        assert_eq!(p.mode(), InputMode::Browse);
        assert_eq!(p.selected_row().map(|r| r.title()), Some("build"));
        assert_eq!(p.visible_len(), 4);
    }

    #[test]
    fn enter_confirms_highlighted_entry() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Down));
        p.handle_event(key(KeyCode::Down));
        p.handle_event(key(KeyCode::Down));
        p.handle_event(key(KeyCode::Enter));

        assert_eq!(p.state(), &PickerState::Confirmed(ScriptEntry::new("test", "jest")));

        let (entry, ok) = p.into_selection().into_parts();
        assert!(ok);
        assert_eq!(entry.name, "test");
    }

    #[test]
    fn q_cancels() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('q')));

        assert_eq!(p.state(), &PickerState::Cancelled);
        let (entry, ok) = p.into_selection().into_parts();
        assert!(!ok);
        assert_eq!(entry, ScriptEntry::default());
    }

    #[test]
    fn ctrl_c_cancels_in_any_mode() {
        let mut p = picker();
        p.handle_event(ctrl_c());
        assert_eq!(p.state(), &PickerState::Cancelled);

        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "te");
        p.handle_event(ctrl_c());
        assert_eq!(p.state(), &PickerState::Cancelled);
    }

    #[test]
    fn terminal_states_ignore_further_input() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Enter));
        p.handle_event(key(KeyCode::Char('q')));

        assert_eq!(p.state(), &PickerState::Confirmed(ScriptEntry::new("build", "tsc")));
    }

    #[test]
    fn navigation_wraps() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Up));
        assert_eq!(p.selected_row().map(|r| r.title()), Some("test"));

        p.handle_event(key(KeyCode::Char('j')));
        assert_eq!(p.selected_row().map(|r| r.title()), Some("build"));

        p.handle_event(key(KeyCode::Char('G')));
        assert_eq!(p.selected_index(), 3);
        p.handle_event(key(KeyCode::Char('g')));
        assert_eq!(p.selected_index(), 0);
    }

    #[test]
    fn paging_is_clamped() {
        let mut p = picker();
        // Room for two items per page
        p.handle_resize(80, views::list::CHROME_HEIGHT + 2 * views::list::ROWS_PER_ITEM);
        assert_eq!(p.page_size(), 2);

        p.handle_event(key(KeyCode::PageDown));
        assert_eq!(p.selected_index(), 2);
        p.handle_event(key(KeyCode::PageDown));
        assert_eq!(p.selected_index(), 3);
        p.handle_event(key(KeyCode::PageUp));
        assert_eq!(p.selected_index(), 1);
    }

    #[test]
    fn resize_does_not_change_state() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Down));
        p.handle_event(Event::Resize(20, 5));

        assert!(p.is_active());
        assert_eq!(p.selected_index(), 1);
        assert_eq!(p.page_size(), 1);
    }

    #[test]
    fn filter_narrows_rows() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        assert_eq!(p.mode(), InputMode::Filter);

        type_text(&mut p, "tst");
        assert_eq!(p.query(), "tst");
        assert_eq!(visible_titles(&p), vec!["test"]);

        p.handle_event(key(KeyCode::Enter));
        assert_eq!(p.state(), &PickerState::Confirmed(ScriptEntry::new("test", "jest")));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "LINT");
        assert_eq!(visible_titles(&p), vec!["lint"]);
    }

    #[test]
    fn q_cancels_while_filtering() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "te");
        p.handle_event(key(KeyCode::Char('q')));

        assert_eq!(p.state(), &PickerState::Cancelled);
        assert!(p.into_selection().chosen.is_none());
    }

    #[test]
    fn modified_chords_are_not_filter_text() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        p.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        p.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        p.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)));

        assert!(p.is_active());
        assert_eq!(p.query(), "");
        assert_eq!(p.visible_len(), 4);

        // Shifted characters still count as text
        p.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)));
        assert_eq!(p.query(), "D");
        assert_eq!(p.visible_len(), 2);
    }

    #[test]
    fn ctrl_q_is_not_quit() {
        let mut p = picker();
        p.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(p.is_active());
    }

    #[test]
    fn enter_without_match_does_nothing() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "zzz");
        p.handle_event(key(KeyCode::Enter));

        assert!(p.is_active());
        assert!(p.selected_row().is_none());
    }

    #[test]
    fn backspace_and_escape_restore_rows() {
        let mut p = picker();
        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "dvx");
        assert_eq!(p.visible_len(), 0);

        p.handle_event(key(KeyCode::Backspace));
        assert_eq!(visible_titles(&p), vec!["dev"]);

        p.handle_event(key(KeyCode::Esc));
        assert_eq!(p.mode(), InputMode::Browse);
        assert_eq!(p.query(), "");
        assert_eq!(p.visible_len(), 4);
    }

    #[test]
    fn suggestion_row_comes_first_and_stays_filterable() {
        let mut p = Picker::new(catalog().with_suggestion(Some("lint")));
        assert_eq!(p.visible_len(), 5);

        let first = p.selected_row().unwrap();
        assert!(first.is_suggestion());
        assert_eq!(first.title(), "lint");

        p.handle_event(key(KeyCode::Char('/')));
        type_text(&mut p, "lint");
        assert_eq!(visible_titles(&p), vec!["lint", "lint"]);
    }

    #[test]
    fn confirming_suggestion_returns_script() {
        let mut p = Picker::new(catalog().with_suggestion(Some("dev")));
        p.handle_event(key(KeyCode::Enter));

        let (entry, ok) = p.into_selection().into_parts();
        assert!(ok);
        assert_eq!(entry.name, "dev");
        assert_eq!(entry.command, "vite");
    }

    #[test]
    fn empty_list_cannot_confirm() {
        let mut p = Picker::new(Vec::new());
        p.handle_event(key(KeyCode::Enter));
        p.handle_event(key(KeyCode::Down));

        assert!(p.is_active());
        p.handle_event(key(KeyCode::Char('q')));
        assert!(p.into_selection().chosen.is_none());
    }
}
