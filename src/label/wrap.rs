use super::fields::LabelField;

/// Lines a wrapped field may occupy on the label.
pub const MAX_WRAPPED_LINES: usize = 2;

fn split_at_char(word: &str, count: usize) -> (&str, &str) {
    let index = word.char_indices().nth(count).map_or(word.len(), |(i, _)| i);
    word.split_at(index)
}

/// Splits a word after each hyphen that joins two letter runs, so "Toluca-Lerma" may end a line
/// at "Toluca-". Hyphens next to digits or single letters ("A-4") stay put.
fn hyphen_pieces(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let letter = |k: usize| chars.get(k).is_some_and(|&(_, c)| c.is_alphabetic());
    let hyphen = |k: usize| chars.get(k).is_some_and(|&(_, c)| c == '-');

    let mut pieces = Vec::new();
    let mut start = 0;
    for k in 2..chars.len() {
        if !hyphen(k) {
            continue;
        }
        let before = letter(k - 1) && (letter(k - 2) || (k >= 3 && hyphen(k - 2) && letter(k - 3)));
        let after = letter(k + 1) && (letter(k + 2) || (hyphen(k + 2) && letter(k + 3)));
        if before && after {
            let end = chars[k].0 + 1;
            pieces.push(&word[start..end]);
            start = end;
        }
    }
    pieces.push(&word[start..]);
    pieces
}

/// Cuts at most `space` characters off a word that does not fit, backing up to just after a
/// hyphen when one falls inside the cut.
fn break_long_word(word: &str, space: usize) -> (&str, &str) {
    let (head, tail) = split_at_char(word, space);
    if tail.is_empty() {
        return (head, tail);
    }
    match head.rfind('-') {
        Some(i) if i > 0 && head[..i].contains(|c: char| c != '-') => word.split_at(i + 1),
        _ => (head, tail),
    }
}

/// Greedy word wrap over whitespace-separated words, counting characters rather than bytes.
///
/// Runs of whitespace are normalized to a single space. Hyphenated words may break after their
/// hyphens. Words longer than `max_chars` are broken, with the first piece filling whatever room
/// is left on the current line. A budget of zero or less puts every word on its own line.
pub fn wrap_words(text: &str, max_chars: i32) -> Vec<String> {
    let words = text.split_whitespace();

    let width = match usize::try_from(max_chars) {
        Ok(width) if width > 0 => width,
        _ => return words.map(str::to_owned).collect(),
    };

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in words {
        for (i, piece) in hyphen_pieces(word).into_iter().enumerate() {
            // only the first piece of a word is preceded by a space
            let separator = usize::from(i == 0 && line_len > 0);
            let piece_len = piece.chars().count();

            if line_len + separator + piece_len <= width {
                if separator > 0 {
                    line.push(' ');
                }
                line.push_str(piece);
                line_len += separator + piece_len;
                continue;
            }

            if piece_len <= width {
                lines.push(std::mem::take(&mut line));
                line.push_str(piece);
                line_len = piece_len;
                continue;
            }

            let mut rest = piece;
            if line_len > 0 {
                let space_left = width.saturating_sub(line_len + separator);
                if space_left > 0 {
                    let (head, tail) = break_long_word(rest, space_left);
                    if separator > 0 {
                        line.push(' ');
                    }
                    line.push_str(head);
                    rest = tail;
                }
                lines.push(std::mem::take(&mut line));
            }

            loop {
                let (head, tail) = break_long_word(rest, width);
                if tail.is_empty() {
                    line.push_str(head);
                    line_len = head.chars().count();
                    break;
                }
                lines.push(head.to_owned());
                rest = tail;
            }
        }
    }

    if line_len > 0 {
        lines.push(line);
    }

    lines
}

/// Display lines for one field: the labelled first line plus, for wrapping fields, at most one
/// bare continuation line.
pub fn field_lines(field: &LabelField, max_chars: i32) -> Vec<String> {
    if !field.wrap {
        return vec![format!("{}{}", field.prefix(), field.value)];
    }

    let mut wrapped = wrap_words(&field.value, max_chars).into_iter();
    let first = match wrapped.next() {
        Some(first) => format!("{}{}", field.prefix(), first),
        None => return vec![field.prefix()],
    };

    std::iter::once(first).chain(wrapped).take(MAX_WRAPPED_LINES).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::fields::{DESCRIPTION, ORIGIN};

    fn origin(value: &str) -> LabelField {
        LabelField { label: ORIGIN, value: value.to_owned(), wrap: true }
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_words("Planta norte", 20), ["Planta norte"]);
    }

    #[test]
    fn breaks_between_words() {
        assert_eq!(
            wrap_words("Almacen central zona industrial", 16),
            ["Almacen central", "zona industrial"]
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(wrap_words("  a \t b\n c  ", 10), ["a b c"]);
        assert!(wrap_words("   ", 10).is_empty());
        assert_eq!(wrap_words("Nave  3   anden", 20), ["Nave 3 anden"]);
    }

    #[test]
    fn never_splits_words_that_fit() {
        let text = "uno dos tres cuatro cinco seis siete ocho nueve diez once doce";
        for width in 6..40 {
            let words: Vec<&str> = text.split_whitespace().collect();
            let lines = wrap_words(text, width);
            let rejoined: Vec<String> = lines.iter().flat_map(|l| l.split(' ')).map(str::to_owned).collect();
            assert_eq!(rejoined, words, "width {width}");
            for line in &lines {
                assert!(line.chars().count() <= width as usize, "width {width}: {line:?}");
            }
        }
    }

    #[test]
    fn long_word_fills_current_line_first() {
        assert_eq!(wrap_words("ab cdefghijkl", 6), ["ab cde", "fghijk", "l"]);
    }

    #[test]
    fn hyphenated_words_break_after_the_hyphen() {
        assert_eq!(wrap_words("Almacen-Norte-Sur", 10), ["Almacen-", "Norte-Sur"]);
        assert_eq!(wrap_words("Parque Toluca-Lerma", 14), ["Parque Toluca-", "Lerma"]);
        assert_eq!(wrap_words("Toluca-Lerma", 8), ["Toluca-", "Lerma"]);
    }

    #[test]
    fn short_hyphenated_codes_stay_whole() {
        assert_eq!(wrap_words("Nave A-4 bodega", 6), ["Nave", "A-4", "bodega"]);
        assert_eq!(wrap_words("Toluca-Lerma", 20), ["Toluca-Lerma"]);
    }

    #[test]
    fn forced_break_prefers_a_hyphen() {
        assert_eq!(wrap_words("x-ray", 3), ["x-", "ray"]);
    }

    #[test]
    fn long_word_is_force_broken() {
        let word = "x".repeat(200);
        let lines = wrap_words(&word, 20);
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap_words("ñññññ ááá", 5), ["ñññññ", "ááá"]);
        assert_eq!(wrap_words("ñññññññ", 3), ["ñññ", "ñññ", "ñ"]);
    }

    #[test]
    fn no_budget_puts_each_word_on_its_own_line() {
        assert_eq!(wrap_words("Planta norte sur", 0), ["Planta", "norte", "sur"]);
        assert_eq!(wrap_words("Planta norte", -3), ["Planta", "norte"]);
    }

    #[test]
    fn unspaced_origin_is_cut_to_two_lines() {
        let value = "A".repeat(200);
        let lines = field_lines(&origin(&value), 20);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Origen: {}", "A".repeat(20)));
        assert_eq!(lines[1], "A".repeat(20));
    }

    #[test]
    fn empty_origin_is_a_single_bare_prefix() {
        assert_eq!(field_lines(&origin(""), 20), ["Origen: "]);
        assert_eq!(field_lines(&origin("   "), 20), ["Origen: "]);
    }

    #[test]
    fn continuation_line_has_no_label() {
        let lines = field_lines(&origin("Parque industrial Lerma"), 12);
        assert_eq!(lines, ["Origen: Parque", "industrial"]);
    }

    #[test]
    fn wrapping_fields_never_exceed_two_lines() {
        let text = "palabra ".repeat(50);
        for width in -2..60 {
            assert!(field_lines(&origin(&text), width).len() <= MAX_WRAPPED_LINES);
        }
    }

    #[test]
    fn plain_fields_are_never_wrapped() {
        let field = LabelField { label: DESCRIPTION, value: "word ".repeat(40), wrap: false };
        let lines = field_lines(&field, 5);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Descripción: word"));
    }
}
