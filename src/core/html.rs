// src/core/html.rs
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<tag ...> ... </tag>` block at or after `from`, non-nesting.
/// Good enough for leaf tags (`<a>`, `<span>`) that the site never nests.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Next tag block whose `class` attribute contains `marker`, balanced over
/// nested tags of the same name. The bet markup nests `<div>` several levels
/// deep, so the plain open/close scan above would cut blocks short.
/// Returns (block_start, block_end) spanning `<tag ...> ... </tag>`.
pub fn next_class_block_ci(s: &str, marker: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let marker = to_lower(marker);
    let mut pos = from;

    while let Some(rel) = lc.get(pos..)?.find("class=") {
        let attr_at = pos + rel;
        // Owning open tag starts at the nearest '<' before the attribute
        let tag_start = s[..attr_at].rfind('<')?;
        let tag_name: String = lc[tag_start + 1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        let open_end = s[attr_at..].find('>')? + attr_at + 1;

        let class_val = attr_value(&s[tag_start..open_end], "class").unwrap_or_default();
        if !to_lower(&class_val).contains(&marker) {
            pos = open_end;
            continue;
        }

        let end = balanced_close(&lc, &tag_name, open_end)?;
        return Some((tag_start, end));
    }
    None
}

/// Scan forward from just past an open tag, counting same-name opens and
/// closes, and return the index one past the matching close tag.
fn balanced_close(lc: &str, tag_name: &str, open_end: usize) -> Option<usize> {
    let open_pat = format!("<{tag_name}");
    let close_pat = format!("</{tag_name}>");
    let mut depth = 1usize;
    let mut pos = open_end;

    while depth > 0 {
        let next_open = lc[pos..].find(&open_pat).map(|i| i + pos);
        let next_close = lc[pos..].find(&close_pat).map(|i| i + pos)?;
        match next_open {
            // `<div` must not match `<divx`; check the char after the name
            Some(o)
                if o < next_close
                    && lc[o + open_pat.len()..]
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/') =>
            {
                depth += 1;
                pos = o + open_pat.len();
            }
            _ => {
                depth -= 1;
                pos = next_close + close_pat.len();
            }
        }
    }
    Some(pos)
}

/// Value of `attr="..."` (or `attr=...` unquoted) inside one open tag.
pub fn attr_value(open_tag: &str, attr: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let pat = format!("{}=", to_lower(attr));
    let mut search = 0usize;

    loop {
        let at = lc[search..].find(&pat)? + search;
        // Must be a whole attribute name, not a suffix like data-class=
        let before = lc[..at].chars().next_back();
        if !matches!(before, Some(c) if c.is_whitespace()) && at != 0 {
            search = at + pat.len();
            continue;
        }
        let val_at = at + pat.len();
        let rest = &open_tag[val_at..];
        return Some(match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let inner = &rest[1..];
                inner[..inner.find(q)?].to_string()
            }
            _ => rest
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != '>')
                .collect(),
        });
    }
}

/// Bare attribute present on the open tag (e.g. `disabled`), with or
/// without a value.
pub fn has_attr(open_tag: &str, attr: &str) -> bool {
    let lc = to_lower(open_tag);
    let attr = to_lower(attr);
    let mut search = 0usize;
    while let Some(rel) = lc[search..].find(&attr) {
        let at = search + rel;
        let before_ok = matches!(lc[..at].chars().next_back(), Some(c) if c.is_whitespace());
        let after = lc[at + attr.len()..].chars().next();
        let after_ok = matches!(after, None | Some('>') | Some('='))
            || after.is_some_and(|c| c.is_whitespace());
        if before_ok && after_ok {
            return true;
        }
        search = at + attr.len();
    }
    false
}

/// The `<...>` open tag at the start of a block.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_block_is_balanced_over_nested_divs() {
        let doc = r#"
            <div class="bet-list">
              <div class="sport-bet-preview">
                <div class="inner"><span>a</span></div>
              </div>
              <div class="sport-bet-preview"><span>b</span></div>
            </div>
        "#;
        let (s1, e1) = next_class_block_ci(doc, "sport-bet-preview", 0).unwrap();
        let first = &doc[s1..e1];
        assert!(first.contains("<span>a</span>"));
        assert!(!first.contains("<span>b</span>"));

        let (s2, e2) = next_class_block_ci(doc, "sport-bet-preview", e1).unwrap();
        assert!(doc[s2..e2].contains("<span>b</span>"));
        assert!(next_class_block_ci(doc, "sport-bet-preview", e2).is_none());
    }

    #[test]
    fn attr_value_quoted_and_unquoted() {
        assert_eq!(
            attr_value(r#"<a href="/esports/csgo/m1" class="link">"#, "href").as_deref(),
            Some("/esports/csgo/m1")
        );
        assert_eq!(attr_value("<td class=teamroster>", "class").as_deref(), Some("teamroster"));
        assert_eq!(attr_value(r#"<a data-href="x">"#, "href"), None);
    }

    #[test]
    fn has_attr_detects_bare_and_valued() {
        assert!(has_attr(r##"<a href="#" disabled>"##, "disabled"));
        assert!(has_attr(r#"<a aria-disabled="true">"#, "aria-disabled"));
        assert!(!has_attr(r#"<a class="disabled-look">"#, "disabled"));
    }

    #[test]
    fn strip_tags_flattens_markup() {
        assert_eq!(strip_tags("<span>1.85</span>"), "1.85");
        assert_eq!(strip_tags("<b>a</b>  <i>b</i>"), "a b");
    }
}
