//! Greedy word wrapping.

/// Break `text` into lines no wider than `max_width`.
///
/// Words are split on single spaces and every emitted line keeps the
/// trailing space after its last word. A line breaks before the word that
/// would push the measured width past `max_width`; a word that is too wide
/// on its own still gets its own line.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = format!("{current}{word} ");
        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = s.chars().count() as f64;
        n
    }

    #[test]
    fn short_text_is_one_line_with_trailing_space() {
        assert_eq!(wrap_text("H2 O2", 100.0, chars), vec!["H2 O2 ".to_string()]);
    }

    #[test]
    fn breaks_before_overflowing_word() {
        let lines = wrap_text("aaa bbb ccc", 8.0, chars);
        assert_eq!(lines, vec!["aaa bbb ", "ccc "]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_text("a verylongword b", 5.0, chars);
        assert_eq!(lines, vec!["a ", "verylongword ", "b "]);
    }

    #[test]
    fn unspaced_cjk_stays_on_one_line() {
        let lines = wrap_text("制作电池的正负极材料", 3.0, chars);
        assert_eq!(lines.len(), 1);
    }
}
