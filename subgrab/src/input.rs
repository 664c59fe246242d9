//! Single-line text field state.
//!
//! The cursor is a char index, not a byte index, so multi-byte titles
//! ("Amélie", "千と千尋") edit correctly. Scrolling works in display columns,
//! so wide glyphs take two cells.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text to draw: the value itself, or one `*` per char when `masked`.
    pub fn display(&self, masked: bool) -> String {
        if masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// The slice of the display text that fits in `width` columns with the
    /// cursor visible, plus the cursor's column within it.
    pub fn visible_window(&self, width: usize, masked: bool) -> (String, u16) {
        let chars: Vec<char> = self.display(masked).chars().collect();
        let cols = |c: &char| c.width().unwrap_or(0);
        let cursor = self.cursor.min(chars.len());

        // Keep one column free for the cursor itself.
        let room = width.saturating_sub(1);
        let mut start = 0;
        let mut before: usize = chars[..cursor].iter().map(cols).sum();
        while before > room && start < cursor {
            before -= cols(&chars[start]);
            start += 1;
        }

        let mut used = 0;
        let visible: String = chars[start..]
            .iter()
            .take_while(|&&c| {
                used += cols(&c);
                used <= width
            })
            .collect();
        (visible, u16::try_from(before).unwrap_or(u16::MAX))
    }
}
