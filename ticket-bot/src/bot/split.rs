//! Splitting long replies to fit Telegram's message cap.

/// Maximum length Telegram accepts in one text message, in UTF-16 code
/// units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Length of `text` as Telegram measures it.
///
/// Emoji outside the Basic Multilingual Plane count as two units.
pub fn telegram_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Split `text` into parts of at most `limit` UTF-16 code units, breaking
/// only at newlines.
///
/// Joining the parts with `"\n"` gives back the original text. A single
/// line longer than `limit` is the exception: it is cut into `limit`-sized
/// chunks, since Telegram would reject it whole. Chunks never split a
/// character.
///
/// ```
/// use ticket_bot::bot::split_message;
///
/// assert_eq!(split_message("short", 4096), vec!["short"]);
/// assert_eq!(split_message("aaa\nbbb\nccc", 7), vec!["aaa\nbbb", "ccc"]);
/// ```
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    // Room for one surrogate pair.
    let limit = limit.max(2);
    if telegram_len(text) <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut started = false;

    for line in text.split('\n') {
        let line_len = telegram_len(line);

        if started && current_len + 1 + line_len > limit {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
            started = false;
        }

        if line_len > limit {
            let mut chunks = hard_cut(line, limit);
            if let Some((last, last_len)) = chunks.pop() {
                parts.extend(chunks.into_iter().map(|(chunk, _)| chunk));
                current = last;
                current_len = last_len;
            }
            started = true;
            continue;
        }

        if started {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        started = true;
    }

    if started {
        parts.push(current);
    }
    parts
}

/// Cut `line` into pieces of at most `limit` units, with their lengths.
fn hard_cut(line: &str, limit: usize) -> Vec<(String, usize)> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0;

    for c in line.chars() {
        let c_len = c.len_utf16();
        if chunk_len + c_len > limit {
            chunks.push((std::mem::take(&mut chunk), chunk_len));
            chunk_len = 0;
        }
        chunk.push(c);
        chunk_len += c_len;
    }
    if !chunk.is_empty() {
        chunks.push((chunk, chunk_len));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(split_message("", 10), vec![""]);
        assert_eq!(split_message("a\nb", 3), vec!["a\nb"]);
    }

    #[test]
    fn breaks_at_newlines() {
        let text = "one\ntwo\nthree\nfour";
        let parts = split_message(text, 9);
        assert_eq!(parts, vec!["one\ntwo", "three", "four"]);
        assert_eq!(parts.join("\n"), text);
    }

    #[test]
    fn keeps_blank_lines() {
        let text = "aaaa\n\n\nbbbb\n";
        let parts = split_message(text, 5);
        assert_eq!(parts.join("\n"), text);
        assert!(parts.iter().all(|p| telegram_len(p) <= 5));
    }

    #[test]
    fn cyrillic_counts_once_per_letter() {
        // Seven Cyrillic letters are fourteen bytes but seven units.
        let text = "Тошкент\nСамарқанд";
        assert_eq!(split_message(text, 17), vec![text]);
        assert_eq!(split_message(text, 10), vec!["Тошкент", "Самарқанд"]);
    }

    #[test]
    fn emoji_count_twice() {
        assert_eq!(telegram_len("🚂"), 2);
        assert_eq!(telegram_len("🚂 ab"), 5);

        // Four characters, but six units.
        let text = "🚂a\n🚄b";
        assert_eq!(split_message(text, 6), vec!["🚂a", "🚄b"]);
        assert_eq!(split_message(text, 7), vec![text]);
    }

    #[test]
    fn cuts_overlong_line() {
        let parts = split_message("ab\ncdefghij\nk", 4);
        assert_eq!(parts, vec!["ab", "cdef", "ghij", "k"]);
    }

    #[test]
    fn cut_keeps_emoji_whole() {
        let parts = split_message("a🚂🚂b", 3);
        assert_eq!(parts, vec!["a🚂", "🚂b"]);
    }

    #[test]
    fn results_listing_fits_telegram() {
        let block = format!(
            "🚂 *Afrosiyob* (778Ф)\n📍 TOSHKENT → SAMARQAND\n🕐 07:28 → 09:49\n💺 Available seats: 42\n\n{}\n",
            "─".repeat(30)
        );
        let text = block.repeat(100);
        let parts = split_message(&text, TELEGRAM_MESSAGE_LIMIT);
        assert!(parts.len() > 1);
        assert!(parts.iter().all(|p| telegram_len(p) <= TELEGRAM_MESSAGE_LIMIT));
        assert_eq!(parts.join("\n"), text);
    }

    proptest! {
        #[test]
        fn parts_fit_and_rejoin(
            lines in prop::collection::vec("[a-zа-я 🚂📍]{0,40}", 0..120),
            limit in 80usize..300,
        ) {
            let text = lines.join("\n");
            let parts = split_message(&text, limit);

            prop_assert!(!parts.is_empty());
            for part in &parts {
                prop_assert!(telegram_len(part) <= limit);
            }
            prop_assert_eq!(parts.join("\n"), text);
        }
    }
}
