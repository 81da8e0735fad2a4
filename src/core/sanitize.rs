// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Replace every character that is illegal in a file name with `_`.
/// Runs of illegal characters collapse to a single underscore.
pub fn sanitize_file_name(name: &str) -> String {
    const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ILLEGAL.contains(&ch) || ch.is_control() {
            if !last_us { out.push('_'); last_us = true; }
        } else {
            out.push(ch);
            last_us = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_illegal_chars_become_underscores() {
        assert_eq!(sanitize_file_name("bets_2024/01*05.csv"), "bets_2024_01_05.csv");
        assert_eq!(sanitize_file_name(r#"a<>:"|?b"#), "a_b");
        assert_eq!(sanitize_file_name("plain-name.csv"), "plain-name.csv");
    }

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }
}
