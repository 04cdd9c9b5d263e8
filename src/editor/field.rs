use ropey::Rope;

/// Cursor position inside a [`TextField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
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

/// A single form input backed by a rope.
///
/// Single-line fields ignore newlines; multi-line fields split the line at
/// the cursor.
pub struct TextField {
    rope: Rope,
    cursor: Cursor,
    multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self {
            rope: Rope::new(),
            cursor: Cursor::default(),
            multiline: false,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::single_line()
        }
    }

    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its trailing newline.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Replace the whole content and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.rope = Rope::from_str(&text);
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.line_len(last));
    }

    pub fn clear(&mut self) {
        self.rope = Rope::new();
        self.cursor = Cursor::default();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Enter key. A no-op on single-line fields.
    pub fn split_line(&mut self) {
        if !self.multiline {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the character before the cursor (Backspace).
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_line_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        true
    }

    /// Delete the character at the cursor (Delete).
    pub fn delete_forward(&mut self) -> bool {
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(char_idx..=char_idx);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(false),
            Direction::Down => self.move_vertical(true),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let byte_col = self.cursor.col.min(line.len());
        line_start + line[..byte_col].chars().count()
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
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

    fn move_vertical(&mut self, down: bool) {
        let target = if down {
            if self.cursor.line + 1 >= self.line_count() {
                return;
            }
            self.cursor.line + 1
        } else {
            let Some(prev) = self.cursor.line.checked_sub(1) else {
                return;
            };
            prev
        };
        let line = self.line_at(target).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.line = target;
        self.cursor.col = col;
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.rope.to_string())
            .field("cursor", &self.cursor)
            .field("multiline", &self.multiline)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: &mut TextField, text: &str) {
        for ch in text.chars() {
            field.insert_char(ch);
        }
    }

    #[test]
    fn test_empty_field_has_one_line() {
        let field = TextField::single_line();
        assert_eq!(field.line_count(), 1);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut field = TextField::single_line();
        typed(&mut field, "hello");
        assert_eq!(field.text(), "hello");
        assert_eq!(field.cursor().col, 5);
    }

    #[test]
    fn test_single_line_ignores_newline() {
        let mut field = TextField::single_line();
        typed(&mut field, "a\nb");
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn test_multi_line_splits_on_newline() {
        let mut field = TextField::multi_line();
        typed(&mut field, "one\ntwo");
        assert_eq!(field.line_count(), 2);
        assert_eq!(field.line_at(1), Some("two".to_string()));
        assert_eq!(field.cursor().line, 1);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut field = TextField::multi_line();
        typed(&mut field, "ab\nc");
        field.move_home();
        assert!(field.delete_back());
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor().col, 2);
    }

    #[test]
    fn test_backspace_handles_multibyte_chars() {
        let mut field = TextField::single_line();
        typed(&mut field, "café");
        assert!(field.delete_back());
        assert_eq!(field.text(), "caf");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = TextField::single_line();
        assert!(!field.delete_back());
    }

    #[test]
    fn test_delete_forward_at_cursor() {
        let mut field = TextField::single_line();
        typed(&mut field, "xyz");
        field.move_home();
        assert!(field.delete_forward());
        assert_eq!(field.text(), "yz");
        field.move_end();
        assert!(!field.delete_forward());
    }

    #[test]
    fn test_insert_in_middle() {
        let mut field = TextField::single_line();
        typed(&mut field, "ac");
        field.move_cursor(Direction::Left);
        field.insert_char('b');
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn test_vertical_movement_keeps_sticky_column() {
        let mut field = TextField::multi_line();
        field.set_text("long line\nab\nanother line");
        field.move_cursor(Direction::Up);
        field.move_cursor(Direction::Up);
        field.move_end();
        assert_eq!(field.cursor(), Cursor { line: 0, col: 9, col_memory: 9 });
        field.move_cursor(Direction::Down);
        assert_eq!(field.cursor().col, 2);
        field.move_cursor(Direction::Down);
        assert_eq!(field.cursor().col, 9);
    }

    #[test]
    fn test_vertical_move_snaps_to_char_boundary() {
        let mut field = TextField::multi_line();
        typed(&mut field, "a\né");
        field.move_cursor(Direction::Up);
        field.move_end();
        field.move_cursor(Direction::Down);
        assert_eq!(field.cursor().line, 1);
        assert_eq!(field.cursor().col, 0);

        field.insert_char('x');
        assert_eq!(field.text(), "a\nxé");
        field.move_cursor(Direction::Left);
        assert!(field.delete_back());
        assert_eq!(field.text(), "axé");
    }

    #[test]
    fn test_set_text_on_single_line_flattens_newlines() {
        let mut field = TextField::single_line();
        field.set_text("a\nb");
        assert_eq!(field.text(), "a b");
        assert_eq!(field.cursor().col, 3);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut field = TextField::multi_line();
        field.set_text("x\ny");
        field.clear();
        assert_eq!(field.text(), "");
        assert_eq!(field.cursor(), Cursor::default());
    }
}
