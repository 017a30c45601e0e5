//! Cursor-aware insertion of formatting wraps.
//!
//! Offsets are character offsets into the buffer, not byte offsets, so a
//! selection can never split a multi-byte character.

/// A selection range in character offsets, always normalized so that
/// `start <= end`. An empty selection is a plain cursor (caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection from two endpoints in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// An empty selection at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both endpoints to a buffer of `len_chars` characters.
    #[must_use]
    pub fn clamp(self, len_chars: usize) -> Self {
        Self::new(self.start.min(len_chars), self.end.min(len_chars))
    }
}

/// Insert `before` and `after` around `text[start..end]`.
///
/// Returns `text[..start] + before + text[start..end] + after + text[end..]`.
/// With `start == end` this inserts `before + after` at the cursor.
/// Any wrap strings are accepted verbatim, including ones that produce
/// unbalanced markdown.
///
/// Callers must pass `start <= end <= text.chars().count()`; use
/// [`Selection::clamp`] at the boundary when offsets come from elsewhere.
///
/// # Example
///
/// ```
/// use markpad::editor::insert;
///
/// assert_eq!(insert("Hello world", 6, 11, "**", "**"), "Hello **world**");
/// ```
pub fn insert(text: &str, start: usize, end: usize, before: &str, after: &str) -> String {
    debug_assert!(start <= end, "selection start {start} is after end {end}");
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end).max(start_byte);

    let mut out = String::with_capacity(text.len() + before.len() + after.len());
    out.push_str(&text[..start_byte]);
    out.push_str(before);
    out.push_str(&text[start_byte..end_byte]);
    out.push_str(after);
    out.push_str(&text[end_byte..]);
    out
}

/// Apply a wrap to a selection and report where the cursor should land.
///
/// The cursor goes immediately after the inserted `after` token.
pub fn wrap_selection(text: &str, selection: Selection, before: &str, after: &str) -> (String, usize) {
    let selection = selection.clamp(text.chars().count());
    let wrapped = insert(text, selection.start, selection.end, before, after);
    let cursor = selection.end + before.chars().count() + after.chars().count();
    (wrapped, cursor)
}

/// Convert a character offset to a byte offset, clamping past-the-end
/// offsets to the end of the string.
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn char_slice(text: &str, start: usize, end: usize) -> String {
        text.chars().skip(start).take(end - start).collect()
    }

    #[test]
    fn test_bold_wraps_selected_word() {
        assert_eq!(insert("Hello world", 6, 11, "**", "**"), "Hello **world**");
    }

    #[test]
    fn test_link_into_empty_buffer() {
        assert_eq!(insert("", 0, 0, "[Text](https://)", ""), "[Text](https://)");
    }

    #[test]
    fn test_empty_selection_inserts_both_tokens_at_cursor() {
        assert_eq!(insert("ab", 1, 1, "**", "**"), "a****b");
    }

    #[test]
    fn test_quote_prefix_at_line_start() {
        assert_eq!(insert("line", 0, 0, "> ", ""), "> line");
    }

    #[test]
    fn test_unbalanced_wrap_is_accepted() {
        assert_eq!(insert("text", 0, 4, "**", ""), "**text");
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        assert_eq!(insert("café au lait", 0, 4, "_", "_"), "_café_ au lait");
    }

    #[test]
    fn test_offset_past_end_appends() {
        assert_eq!(insert("abc", 3, 3, "==", "=="), "abc====");
    }

    #[test]
    fn test_double_application_nests() {
        let once = insert("Hello world", 6, 11, "**", "**");
        let twice = insert(&once, 6, 15, "**", "**");
        assert_eq!(twice, "Hello ****world****");
        assert_ne!(once, twice, "wrapping is not idempotent");
    }

    #[test]
    fn test_selection_normalizes_order() {
        assert_eq!(Selection::new(7, 2), Selection { start: 2, end: 7 });
        assert_eq!(Selection::new(7, 2).len(), 5);
    }

    #[test]
    fn test_selection_clamp() {
        assert_eq!(Selection::new(3, 40).clamp(10), Selection { start: 3, end: 10 });
        assert_eq!(Selection::caret(50).clamp(10), Selection::caret(10));
    }

    #[test]
    fn test_wrap_selection_places_cursor_after_closing_token() {
        let (text, cursor) = wrap_selection("Hello world", Selection::new(6, 11), "**", "**");
        assert_eq!(text, "Hello **world**");
        assert_eq!(cursor, 15);
    }

    #[test]
    fn test_wrap_selection_clamps_out_of_range() {
        let (text, cursor) = wrap_selection("abc", Selection::new(1, 99), "_", "_");
        assert_eq!(text, "a_bc_");
        assert_eq!(cursor, 5);
    }

    proptest! {
        #[test]
        fn prop_length_is_sum_of_parts(
            text in ".{0,40}",
            a in 0usize..50,
            b in 0usize..50,
            before in ".{0,6}",
            after in ".{0,6}",
        ) {
            let len = text.chars().count();
            let sel = Selection::new(a, b).clamp(len);
            let out = insert(&text, sel.start, sel.end, &before, &after);
            prop_assert_eq!(
                out.chars().count(),
                len + before.chars().count() + after.chars().count()
            );
        }

        #[test]
        fn prop_empty_selection_inserts_at_cursor(
            text in ".{0,40}",
            at in 0usize..50,
            before in ".{0,6}",
            after in ".{0,6}",
        ) {
            let len = text.chars().count();
            let s = at.min(len);
            let out = insert(&text, s, s, &before, &after);
            let expected = format!(
                "{}{}{}{}",
                char_slice(&text, 0, s),
                before,
                after,
                char_slice(&text, s, len)
            );
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn prop_selected_text_survives_between_tokens(
            text in "[a-z ]{0,30}",
            a in 0usize..35,
            b in 0usize..35,
        ) {
            let len = text.chars().count();
            let sel = Selection::new(a, b).clamp(len);
            let out = insert(&text, sel.start, sel.end, "<<", ">>");
            let inner = format!("<<{}>>", char_slice(&text, sel.start, sel.end));
            prop_assert!(out.contains(&inner));
        }
    }
}
