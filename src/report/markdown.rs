//! Minimal markdown block/inline parser for model output.
//!
//! Only the subset the analysis prompts actually produce is understood:
//! ATX headings, paragraphs, bullet and numbered lists, block quotes, fenced
//! code, pipe tables, horizontal rules and inline code/bold/italic. The input
//! may be a stream that is still arriving, so an unclosed fence simply runs to
//! the end of the text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) | Span::Italic(s) | Span::Code(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    BulletList(Vec<Vec<Span>>),
    OrderedList { start: u64, items: Vec<Vec<Span>> },
    Quote(Vec<Span>),
    Code { lang: Option<String>, code: String },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Rule,
}

enum Pending {
    None,
    Paragraph(Vec<String>),
    Bullets(Vec<String>),
    Ordered(u64, Vec<String>),
    Quote(Vec<String>),
    Table(Vec<Vec<String>>),
}

pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending = Pending::None;
    let mut lines = text.lines();

    while let Some(raw) = lines.next() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if let Some(lang) = trimmed.strip_prefix("```") {
            flush(&mut pending, &mut blocks);
            let lang = lang.trim();
            let mut code = Vec::new();
            for code_line in lines.by_ref() {
                if code_line.trim_start().starts_with("```") {
                    break;
                }
                code.push(code_line);
            }
            blocks.push(Block::Code {
                lang: (!lang.is_empty()).then(|| lang.to_string()),
                code: code.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut pending, &mut blocks);
            continue;
        }

        if let Some((level, title)) = heading(trimmed) {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::Heading {
                level,
                spans: parse_inline(title),
            });
            continue;
        }

        if is_rule(trimmed) {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::Rule);
            continue;
        }

        if let Some(item) = bullet_item(trimmed) {
            match &mut pending {
                Pending::Bullets(items) => items.push(item.to_string()),
                _ => {
                    flush(&mut pending, &mut blocks);
                    pending = Pending::Bullets(vec![item.to_string()]);
                }
            }
            continue;
        }

        if let Some((number, item)) = ordered_item(trimmed) {
            match &mut pending {
                Pending::Ordered(_, items) => items.push(item.to_string()),
                _ => {
                    flush(&mut pending, &mut blocks);
                    pending = Pending::Ordered(number, vec![item.to_string()]);
                }
            }
            continue;
        }

        if let Some(quoted) = trimmed.strip_prefix('>') {
            let quoted = quoted.trim_start().to_string();
            match &mut pending {
                Pending::Quote(parts) => parts.push(quoted),
                _ => {
                    flush(&mut pending, &mut blocks);
                    pending = Pending::Quote(vec![quoted]);
                }
            }
            continue;
        }

        if trimmed.starts_with('|') {
            if is_table_separator(trimmed) {
                continue;
            }
            let cells = table_cells(trimmed);
            match &mut pending {
                Pending::Table(rows) => rows.push(cells),
                _ => {
                    flush(&mut pending, &mut blocks);
                    pending = Pending::Table(vec![cells]);
                }
            }
            continue;
        }

        // Lazy continuation of a list item
        match &mut pending {
            Pending::Paragraph(parts) => parts.push(trimmed.to_string()),
            Pending::Bullets(items) | Pending::Ordered(_, items) if raw.starts_with([' ', '\t']) => {
                if let Some(last) = items.last_mut() {
                    last.push(' ');
                    last.push_str(trimmed);
                }
            }
            _ => {
                flush(&mut pending, &mut blocks);
                pending = Pending::Paragraph(vec![trimmed.to_string()]);
            }
        }
    }

    flush(&mut pending, &mut blocks);
    blocks
}

fn flush(pending: &mut Pending, blocks: &mut Vec<Block>) {
    match std::mem::replace(pending, Pending::None) {
        Pending::None => {}
        Pending::Paragraph(parts) => blocks.push(Block::Paragraph(parse_inline(&parts.join(" ")))),
        Pending::Bullets(items) => blocks.push(Block::BulletList(
            items.iter().map(|i| parse_inline(i)).collect(),
        )),
        Pending::Ordered(start, items) => blocks.push(Block::OrderedList {
            start,
            items: items.iter().map(|i| parse_inline(i)).collect(),
        }),
        Pending::Quote(parts) => blocks.push(Block::Quote(parse_inline(&parts.join(" ")))),
        Pending::Table(mut rows) => {
            let header = rows.remove(0);
            blocks.push(Block::Table { header, rows });
        }
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level as u8, ""));
    }
    rest.strip_prefix(' ')
        .map(|title| (level as u8, title.trim().trim_end_matches('#').trim_end()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.chars().all(|c| c == *marker))
}

fn bullet_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

fn ordered_item(line: &str) -> Option<(u64, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(|item| (number, item))
}

fn is_table_separator(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ')) && line.contains('-')
}

fn table_cells(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Inline spans. Unmatched markers are kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        // `snake_case` words are not emphasis
        let word_start = plain.chars().last().is_none_or(|p| !p.is_alphanumeric());
        let delimited = match c {
            '`' => delimited(rest, "`").map(|(inner, after)| (Span::Code(inner.to_string()), after)),
            '*' if rest.starts_with("**") => {
                delimited(rest, "**").map(|(inner, after)| (Span::Bold(inner.to_string()), after))
            }
            '_' if !word_start => None,
            '_' if rest.starts_with("__") => {
                delimited(rest, "__").map(|(inner, after)| (Span::Bold(inner.to_string()), after))
            }
            '*' | '_' => delimited(rest, if c == '*' { "*" } else { "_" })
                .filter(|(inner, _)| !inner.starts_with(' ') && !inner.ends_with(' '))
                .map(|(inner, after)| (Span::Italic(inner.to_string()), after)),
            _ => None,
        };

        match delimited {
            Some((span, after)) => {
                if !plain.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut plain)));
                }
                spans.push(span);
                rest = after;
            }
            None => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// `marker inner marker after` -> `(inner, after)`, with a non-empty `inner`
fn delimited<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let body = text.strip_prefix(marker)?;
    let end = body.find(marker)?;
    (end > 0).then(|| (&body[..end], &body[end + marker.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn headings_paragraphs_and_lists() {
        let blocks = parse(
            "## Summary\nThe pool is\nhealthy.\n\n- first\n- second\n\n3. three\n4. four\n",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    spans: vec![text("Summary")]
                },
                Block::Paragraph(vec![text("The pool is healthy.")]),
                Block::BulletList(vec![vec![text("first")], vec![text("second")]]),
                Block::OrderedList {
                    start: 3,
                    items: vec![vec![text("three")], vec![text("four")]]
                },
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_contents_verbatim() {
        let blocks = parse("```json\n{\n  \"a\": **1**\n}\n```\nafter");
        assert_eq!(
            blocks[0],
            Block::Code {
                lang: Some("json".into()),
                code: "{\n  \"a\": **1**\n}".into()
            }
        );
        assert_eq!(blocks[1], Block::Paragraph(vec![text("after")]));
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let blocks = parse("intro\n```\nlet x = 1;\nlet y");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            Block::Code {
                lang: None,
                code: "let x = 1;\nlet y".into()
            }
        );
    }

    #[test]
    fn inline_spans() {
        assert_eq!(
            parse_inline("APR is **high** with `tick_lower` and *some* risk"),
            vec![
                text("APR is "),
                Span::Bold("high".into()),
                text(" with "),
                Span::Code("tick_lower".into()),
                text(" and "),
                Span::Italic("some".into()),
                text(" risk"),
            ]
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(parse_inline("2 * 3 = 6 and **open"), vec![text("2 * 3 = 6 and **open")]);
        assert_eq!(parse_inline("fee_tier_bps"), vec![text("fee_tier_bps")]);
        assert_eq!(parse_inline("a `` b"), vec![text("a `` b")]);
    }

    #[test]
    fn tables_quotes_and_rules() {
        let blocks = parse("| Pool | APR |\n|---|---:|\n| A | 5% |\n\n> careful\n> now\n\n---");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: vec!["Pool".into(), "APR".into()],
                    rows: vec![vec!["A".into(), "5%".into()]]
                },
                Block::Quote(vec![text("careful now")]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn streaming_prefix_parses() {
        let full = "# Title\n\nSome **bold** text";
        for cut in 0..full.len() {
            let _ = parse(&full[..cut]);
        }
        let flat: String = parse_inline("Some **bold** text").iter().map(Span::as_str).collect();
        assert_eq!(flat, "Some bold text");
    }
}
