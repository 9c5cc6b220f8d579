// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Cuts `text` to at most `max_len` chars, marking the cut with `…`.
pub fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    let Some(keep) = max_len.checked_sub(1) else {
        return String::new();
    };
    // Only scan far enough to know whether the text overflows.
    if text.char_indices().nth(max_len).is_none() {
        return text.to_owned();
    }
    format!("{}…", &text[..byte_offset(text, keep)])
}

/// Byte offset of the char at `index`, or the full length when `text` is shorter.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Terminal columns taken by `text`, one per char.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap. Words wider than `width` are split across lines.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = text_len(word);

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        while word_len > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split = byte_offset(word, width);
            lines.push(word[..split].to_owned());
            word = &word[split..];
            word_len -= width;
        }
        if word.is_empty() {
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{text_len, truncate_with_ellipsis, wrap_words};

    #[test]
    fn truncation_keeps_short_titles_whole() {
        assert_eq!(truncate_with_ellipsis("Refunds", 7), "Refunds");
        assert_eq!(truncate_with_ellipsis("Refunds", 40), "Refunds");
        assert_eq!(truncate_with_ellipsis("", 3), "");
    }

    #[test]
    fn truncation_marks_the_cut() {
        assert_eq!(truncate_with_ellipsis("Webhooks", 0), "");
        assert_eq!(truncate_with_ellipsis("Webhooks", 1), "…");
        assert_eq!(truncate_with_ellipsis("Webhooks", 5), "Webh…");
    }

    #[test]
    fn widths_count_arrows_as_one_column() {
        assert_eq!(text_len("← prev"), 6);
        assert_eq!(truncate_with_ellipsis("→→→→", 3), "→→…");
    }

    #[test]
    fn wrap_words_breaks_on_whitespace() {
        assert_eq!(
            wrap_words("the quick brown fox jumps", 10),
            ["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_words_splits_long_words() {
        assert_eq!(wrap_words("ab abcdefgh", 4), ["ab", "abcd", "efgh"]);
    }

    #[test]
    fn wrap_words_keeps_one_line_for_empty_text() {
        assert_eq!(wrap_words("   ", 8), [""]);
    }
}
