/// Single-line text being edited, with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    /// Cursor starts at the end of `text`.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().filter(|c| *c != '\n').collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    pub fn insert_char(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    /// Deletes from the start of the previous word up to the cursor.
    pub fn delete_word_back(&mut self) {
        let end = self.cursor;
        self.move_word_left();
        self.chars.drain(self.cursor..end);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn move_word_left(&mut self) {
        while self.cursor > 0 && self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
        while self.cursor > 0 && !self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
    }

    pub fn move_word_right(&mut self) {
        let len = self.chars.len();
        while self.cursor < len && !self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
        while self.cursor < len && self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
    }

    /// Text before the cursor, the char under it (if any), and the rest.
    pub fn split_at_cursor(&self) -> (String, Option<char>, String) {
        let before = self.chars[..self.cursor].iter().collect();
        let at = self.chars.get(self.cursor).copied();
        let after = self
            .chars
            .get(self.cursor + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        (before, at, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puts_cursor_at_end() {
        let buf = EditBuffer::new("hello");
        assert_eq!(buf.cursor(), 5);
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn new_drops_newlines() {
        assert_eq!(EditBuffer::new("a\nb").text(), "ab");
    }

    #[test]
    fn insert_at_cursor() {
        let mut buf = EditBuffer::new("hllo");
        buf.move_home();
        buf.move_right();
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn delete_back_at_start_is_noop() {
        let mut buf = EditBuffer::new("abc");
        buf.move_home();
        buf.delete_back();
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn delete_forward_removes_under_cursor() {
        let mut buf = EditBuffer::new("abc");
        buf.move_home();
        buf.delete_forward();
        assert_eq!(buf.text(), "bc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn delete_word_back_removes_previous_word() {
        let mut buf = EditBuffer::new("study for exam");
        buf.delete_word_back();
        assert_eq!(buf.text(), "study for ");
        buf.delete_word_back();
        assert_eq!(buf.text(), "study ");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut buf = EditBuffer::new("ab");
        buf.move_right();
        assert_eq!(buf.cursor(), 2);
        buf.move_home();
        buf.move_left();
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn word_movement() {
        let mut buf = EditBuffer::new("one two three");
        buf.move_word_left();
        assert_eq!(buf.cursor(), 8);
        buf.move_word_left();
        assert_eq!(buf.cursor(), 4);
        buf.move_word_right();
        assert_eq!(buf.cursor(), 8);
    }

    #[test]
    fn multibyte_chars() {
        let mut buf = EditBuffer::new("café");
        buf.delete_back();
        assert_eq!(buf.text(), "caf");
        buf.insert_str("é ✅");
        assert_eq!(buf.text(), "café ✅");
    }

    #[test]
    fn blank_detection() {
        assert!(EditBuffer::new("  ").is_blank());
        assert!(EditBuffer::default().is_blank());
        assert!(!EditBuffer::new(" x ").is_blank());
    }

    #[test]
    fn split_for_rendering() {
        let mut buf = EditBuffer::new("abc");
        assert_eq!(buf.split_at_cursor(), ("abc".into(), None, "".into()));
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.split_at_cursor(), ("a".into(), Some('b'), "c".into()));
    }
}
