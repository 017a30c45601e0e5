use ropey::Rope;

use super::commands::Wrap;
use super::insert::{Selection, wrap_selection};

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The markdown source being edited, backed by a rope.
///
/// Tracks the cursor and an optional selection anchor. When an anchor is
/// set, the selection spans from the anchor to the cursor. Editing
/// operations replace an active selection the way a text area does.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer changed since creation or the last export.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the content of a line (without its line break).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(strip_line_break(&s).to_string())
    }

    /// Length of a line in bytes (without its line break).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Character offset of the first character of a line.
    pub fn line_start_offset(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Character offset of the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.char_idx_of(self.cursor)
    }

    /// The live selection in character offsets; a caret when nothing is
    /// selected.
    pub fn selection(&self) -> Selection {
        let cursor = self.cursor_offset();
        self.anchor.map_or_else(
            || Selection::caret(cursor),
            |anchor| Selection::new(self.char_idx_of(anchor), cursor),
        )
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection();
        if sel.is_empty() {
            return None;
        }
        Some(self.rope.slice(sel.start..sel.end).to_string())
    }

    /// Select a character range, leaving the cursor at its end.
    pub fn set_selection(&mut self, selection: Selection) {
        let selection = selection.clamp(self.len_chars());
        self.anchor = Some(self.offset_to_cursor(selection.start));
        self.cursor = self.offset_to_cursor(selection.end);
    }

    pub fn select_all(&mut self) {
        self.set_selection(Selection::new(0, self.len_chars()));
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Run a cursor motion while keeping the selection anchor in place.
    pub fn extend_selection(&mut self, motion: impl FnOnce(&mut Self)) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
        motion(self);
    }

    /// Delete the selected text, if any.
    ///
    /// Returns `true` if text was removed.
    pub fn delete_selection(&mut self) -> bool {
        let sel = self.selection();
        self.anchor = None;
        if sel.is_empty() {
            return false;
        }
        self.rope.remove(sel.start..sel.end);
        self.cursor = self.offset_to_cursor(sel.start);
        self.dirty = true;
        true
    }

    /// Replace the whole buffer, placing the cursor at a character offset.
    pub fn replace_text(&mut self, text: &str, cursor_offset: usize) {
        self.rope = Rope::from_str(text);
        self.anchor = None;
        self.cursor = self.offset_to_cursor(cursor_offset);
        self.dirty = true;
    }

    /// Wrap the live selection (or cursor) with a formatting directive.
    ///
    /// The cursor lands after the closing token.
    pub fn apply_wrap(&mut self, wrap: Wrap) {
        let (text, cursor) = wrap_selection(&self.text(), self.selection(), wrap.before, wrap.after);
        self.replace_text(&text, cursor);
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let char_idx = self.cursor_offset();
        self.rope.insert_char(char_idx, ch);
        if is_line_break(ch) {
            self.cursor = self.offset_to_cursor(char_idx + 1);
        } else {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        }
        self.dirty = true;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_offset();
        self.rope.insert(char_idx, s);
        self.cursor = self.offset_to_cursor(char_idx + s.chars().count());
        self.dirty = true;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let char_idx = self.cursor_offset();
        if char_idx == 0 {
            return false;
        }
        self.rope.remove(char_idx - 1..char_idx);
        self.cursor = self.offset_to_cursor(char_idx - 1);
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let char_idx = self.cursor_offset();
        if char_idx >= self.len_chars() {
            return false;
        }
        self.rope.remove(char_idx..=char_idx);
        self.dirty = true;
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col.min(line.len())];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = line.get(self.cursor.col..).unwrap_or_default();

        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and byte column, clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    /// Convert a line/byte-column position to a rope char index.
    fn char_idx_of(&self, cursor: Cursor) -> usize {
        let line_idx = cursor.line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line_idx);
        let line = self.line_at(line_idx).unwrap_or_default();
        let mut byte_col = cursor.col.min(line.len());
        while !line.is_char_boundary(byte_col) {
            byte_col -= 1;
        }
        line_start + line[..byte_col].chars().count()
    }

    /// Convert a rope char index to a line/byte-column position.
    fn offset_to_cursor(&self, char_idx: usize) -> Cursor {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(char_idx);
        let chars_in = char_idx - self.rope.line_to_char(line_idx);
        let line = self.line_at(line_idx).unwrap_or_default();
        let byte_col = line
            .chars()
            .take(chars_in)
            .map(char::len_utf8)
            .sum::<usize>();
        Cursor::at(line_idx, byte_col)
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col.min(line.len())];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.clamped_memory_col();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.col = self.clamped_memory_col();
        }
    }

    /// The sticky column clamped to the current line, on a char boundary.
    fn clamped_memory_col(&self) -> usize {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        col
    }
}

/// Whether ropey starts a new line after `ch`.
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// A rope line without the break that ends it.
fn strip_line_break(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix(is_line_break))
        .unwrap_or(line)
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::FormatCommand;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = EditorBuffer::from_text("hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_mark_clean_resets_dirty() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('!');
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("helloé".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 7));
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor_to_end() {
        let mut buf = EditorBuffer::from_text("ad");
        buf.move_cursor(Direction::Right);
        buf.insert_str("b\nc");
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_str("");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        buf.delete_back();
        assert_eq!(buf.text(), "caf");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    // --- Movement ---

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_vertical_move_lands_on_char_boundary() {
        let mut buf = EditorBuffer::from_text("abc\né");
        buf.move_to(0, 1);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_unicode_line_separator_is_not_part_of_the_line() {
        let buf = EditorBuffer::from_text("a\u{2028}b\u{0085}c\r\nd");
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.line_at(0).as_deref(), Some("a"));
        assert_eq!(buf.line_at(1).as_deref(), Some("b"));
        assert_eq!(buf.line_at(2).as_deref(), Some("c"));
        assert_eq!(buf.line_len(0), 1);
    }

    #[test]
    fn test_typing_at_end_of_line_before_separator() {
        let mut buf = EditorBuffer::from_text("a\u{2028}b");
        buf.move_end();
        buf.insert_char('X');
        assert_eq!(buf.text(), "aX\u{2028}b");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_typed_line_separator_moves_cursor_to_next_line() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_char('\u{2029}');
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.insert_char('X');
        assert_eq!(buf.text(), "a\u{2029}Xb");
    }

    #[test]
    fn test_word_motion_with_stale_column_does_not_panic() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        buf.cursor.col = 40;
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
        buf.cursor.col = 40;
        buf.move_word_right();
        assert_eq!(buf.cursor().line, 1);
    }

    #[test]
    fn test_move_word_left_from_middle_of_word() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 8);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_move_word_right_from_start() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_snaps_inside_multibyte_char() {
        let mut buf = EditorBuffer::from_text("é");
        buf.move_to(0, 1);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_move_to_end() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
    }

    // --- Offsets and selection ---

    #[test]
    fn test_cursor_offset_counts_chars_across_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncé d");
        buf.move_to(1, 3);
        assert_eq!(buf.cursor_offset(), 5);
    }

    #[test]
    fn test_selection_without_anchor_is_caret() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 2);
        assert_eq!(buf.selection(), Selection::caret(2));
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_extend_selection_tracks_anchor() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 6);
        buf.extend_selection(EditorBuffer::move_end);
        assert_eq!(buf.selection(), Selection::new(6, 11));
        assert_eq!(buf.selected_text(), Some("world".to_string()));
    }

    #[test]
    fn test_extend_selection_backwards_normalizes() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.extend_selection(|b| b.move_cursor(Direction::Left));
        buf.extend_selection(|b| b.move_cursor(Direction::Left));
        assert_eq!(buf.selection(), Selection::new(3, 5));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(Selection::new(6, 11));
        buf.insert_char('X');
        assert_eq!(buf.text(), "hello X");
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_backspace_deletes_selection_only() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(Selection::new(0, 6));
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "world");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_paste_replaces_selection() {
        let mut buf = EditorBuffer::from_text("one two");
        buf.set_selection(Selection::new(4, 7));
        buf.insert_str("three");
        assert_eq!(buf.text(), "one three");
    }

    #[test]
    fn test_select_all() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.select_all();
        assert_eq!(buf.selected_text(), Some("a\nb".to_string()));
    }

    #[test]
    fn test_replace_text_places_cursor_by_offset() {
        let mut buf = EditorBuffer::from_text("old");
        buf.replace_text("line one\nline two", 12);
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
        assert!(buf.is_dirty());
    }

    // --- Formatting ---

    #[test]
    fn test_apply_wrap_bolds_selection() {
        let mut buf = EditorBuffer::from_text("Hello world");
        buf.set_selection(Selection::new(6, 11));
        buf.apply_wrap(FormatCommand::Bold.wrap());
        assert_eq!(buf.text(), "Hello **world**");
        assert_eq!(buf.cursor_offset(), 15);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_apply_wrap_at_cursor_on_second_line() {
        let mut buf = EditorBuffer::from_text("# Title\nbody");
        buf.move_to(1, 0);
        buf.apply_wrap(FormatCommand::Quote.wrap());
        assert_eq!(buf.text(), "# Title\n> body");
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_apply_wrap_on_empty_buffer() {
        let mut buf = EditorBuffer::empty();
        buf.apply_wrap(FormatCommand::Link.wrap());
        assert_eq!(buf.text(), "[Text](https://)");
    }
}
