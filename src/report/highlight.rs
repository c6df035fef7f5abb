//! Token classes for fenced code blocks.
//!
//! Lightweight lexer: comments, string literals, numbers and a keyword list
//! per language. Unknown languages still get strings and numbers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    Literal,
    Number,
    Comment,
}

struct Syntax {
    keywords: &'static [&'static str],
    line_comment: &'static [&'static str],
    quotes: &'static [char],
    case_insensitive: bool,
}

const JSON: Syntax = Syntax {
    keywords: &["true", "false", "null"],
    line_comment: &[],
    quotes: &['"'],
    case_insensitive: false,
};

const RUST: Syntax = Syntax {
    keywords: &[
        "as", "async", "await", "const", "else", "enum", "false", "fn", "for", "if", "impl", "in",
        "let", "loop", "match", "mod", "mut", "pub", "return", "self", "Self", "struct", "trait",
        "true", "type", "use", "where", "while",
    ],
    line_comment: &["//"],
    quotes: &['"'],
    case_insensitive: false,
};

const PYTHON: Syntax = Syntax {
    keywords: &[
        "and", "as", "async", "await", "class", "def", "elif", "else", "False", "for", "from",
        "if", "import", "in", "is", "lambda", "None", "not", "or", "return", "True", "while",
        "with", "yield",
    ],
    line_comment: &["#"],
    quotes: &['"', '\''],
    case_insensitive: false,
};

const SCRIPT: Syntax = Syntax {
    keywords: &[
        "async", "await", "class", "const", "contract", "else", "export", "false", "for",
        "function", "if", "import", "let", "new", "null", "return", "true", "undefined", "uint256",
        "address", "var", "while",
    ],
    line_comment: &["//"],
    quotes: &['"', '\'', '`'],
    case_insensitive: false,
};

const SQL: Syntax = Syntax {
    keywords: &[
        "and", "as", "by", "from", "group", "insert", "into", "join", "limit", "not", "null", "on",
        "or", "order", "select", "update", "values", "where",
    ],
    line_comment: &["--"],
    quotes: &['\'', '"'],
    case_insensitive: true,
};

const SHELL: Syntax = Syntax {
    keywords: &["do", "done", "echo", "else", "export", "fi", "for", "if", "in", "then"],
    line_comment: &["#"],
    quotes: &['"', '\''],
    case_insensitive: false,
};

const PLAIN: Syntax = Syntax {
    keywords: &[],
    line_comment: &[],
    quotes: &['"'],
    case_insensitive: false,
};

fn syntax_for(lang: Option<&str>) -> &'static Syntax {
    let lang = lang.map(str::to_ascii_lowercase).unwrap_or_default();
    match lang.as_str() {
        "json" | "jsonc" => &JSON,
        "rust" | "rs" => &RUST,
        "python" | "py" => &PYTHON,
        "javascript" | "js" | "typescript" | "ts" | "solidity" | "sol" => &SCRIPT,
        "sql" => &SQL,
        "bash" | "sh" | "shell" | "toml" | "yaml" | "yml" => &SHELL,
        _ => &PLAIN,
    }
}

/// Split `code` into classified slices. Concatenating them gives back `code`.
pub fn highlight<'a>(lang: Option<&str>, code: &'a str) -> Vec<(TokenKind, &'a str)> {
    let syntax = syntax_for(lang);
    let mut tokens: Vec<(TokenKind, &'a str)> = Vec::new();
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];
        let Some(first) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if syntax.line_comment.iter().any(|m| rest.starts_with(m)) {
            (TokenKind::Comment, rest.find('\n').unwrap_or(rest.len()))
        } else if syntax.quotes.contains(&first) {
            (TokenKind::Literal, quoted_len(rest, first))
        } else if first.is_ascii_digit() {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                .unwrap_or(rest.len());
            (TokenKind::Number, len)
        } else if first.is_alphabetic() || first == '_' {
            let len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let keyword = if syntax.case_insensitive {
                syntax.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
            } else {
                syntax.keywords.contains(&word)
            };
            (if keyword { TokenKind::Keyword } else { TokenKind::Plain }, len)
        } else {
            (TokenKind::Plain, first.len_utf8())
        };

        let piece = &rest[..len];
        match tokens.last_mut() {
            Some((last_kind, last)) if *last_kind == kind && kind == TokenKind::Plain => {
                let start = pos - last.len();
                *last = &code[start..pos + len];
            }
            _ => tokens.push((kind, piece)),
        }
        pos += len;
    }
    tokens
}

/// Byte length of a quoted literal starting at `text[0]`, closing quote
/// included. An unterminated literal runs to the end of the line.
fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        match c {
            '\n' => return i,
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return i + c.len_utf8(),
            _ => escaped = false,
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lang: &str, code: &str) -> Vec<TokenKind> {
        highlight(Some(lang), code).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn json_classes() {
        let code = r#"{"apr": 12.5, "active": true}"#;
        let tokens = highlight(Some("json"), code);

        assert!(tokens.contains(&(TokenKind::Literal, "\"apr\"")));
        assert!(tokens.contains(&(TokenKind::Number, "12.5")));
        assert!(tokens.contains(&(TokenKind::Keyword, "true")));
        assert_eq!(tokens.iter().map(|(_, s)| *s).collect::<String>(), code);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let tokens = highlight(Some("python"), "x = 1  # fee tier\ny = 2");
        assert!(tokens.contains(&(TokenKind::Comment, "# fee tier")));
        assert!(tokens.contains(&(TokenKind::Number, "2")));
    }

    #[test]
    fn escaped_and_unterminated_strings() {
        let tokens = highlight(Some("js"), "const s = \"a\\\"b\";\nlet t = 'open\nnext");
        assert!(tokens.contains(&(TokenKind::Literal, "\"a\\\"b\"")));
        assert!(tokens.contains(&(TokenKind::Literal, "'open")));
        assert!(tokens.contains(&(TokenKind::Keyword, "let")));
    }

    #[test]
    fn sql_keywords_ignore_case() {
        assert_eq!(kinds("sql", "SELECT")[0], TokenKind::Keyword);
        assert_eq!(kinds("SQL", "select")[0], TokenKind::Keyword);
    }

    #[test]
    fn unknown_language_keeps_words_plain() {
        let tokens = highlight(None, "pool true 3");
        assert_eq!(tokens[0], (TokenKind::Plain, "pool true "));
        assert_eq!(tokens[1], (TokenKind::Number, "3"));
    }
}
