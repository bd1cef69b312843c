//! # YAML Quoting
//!
//! `serde_yaml` quotes scalars that would otherwise read back as another
//! type (`'200'`, `'#/components/schemas/User'`, `'1'`) with single quotes.
//! Published documents quote them with double quotes, so the serialized text
//! is rewritten line by line. Block scalars (`|-` and friends) are copied
//! verbatim.

/// Rewrites every single-quoted key or value of `yaml` as double-quoted.
pub fn double_quote_scalars(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    let mut block_parent: Option<usize> = None;

    for line in yaml.split_inclusive('\n') {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if let Some(parent) = block_parent {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                continue;
            }
            block_parent = None;
        }

        let rewritten = rewrite_line(line);
        if opens_block_scalar(&rewritten) {
            block_parent = Some(indent);
        }
        out.push_str(&rewritten);
    }
    out
}

fn opens_block_scalar(line: &str) -> bool {
    matches!(
        line.split_whitespace().last(),
        Some("|" | "|-" | "|+" | ">" | ">-" | ">+")
    )
}

fn rewrite_line(line: &str) -> String {
    let (content, newline) = match line.strip_suffix('\n') {
        Some(content) => (content, "\n"),
        None => (line, ""),
    };
    let mut out = String::with_capacity(line.len() + 2);
    let mut rest = content;

    loop {
        let trimmed = rest.trim_start_matches(' ');
        out.push_str(&rest[..rest.len() - trimmed.len()]);
        rest = trimmed;
        match rest.strip_prefix("- ") {
            Some(item) => {
                out.push_str("- ");
                rest = item;
            }
            None => break,
        }
    }

    if rest.starts_with('"') {
        out.push_str(rest);
        out.push_str(newline);
        return out;
    }

    if rest.starts_with('\'') {
        match single_quoted(rest) {
            Some((value, tail)) => {
                out.push_str(&double_quoted(&value));
                rest = tail;
            }
            None => {
                out.push_str(rest);
                out.push_str(newline);
                return out;
            }
        }
    }

    if let Some(pos) = rest.find(": ") {
        let (key, value) = rest.split_at(pos + 2);
        out.push_str(key);
        rest = value;
        if let Some((value, "")) = single_quoted(rest) {
            out.push_str(&double_quoted(&value));
            rest = "";
        }
    }

    out.push_str(rest);
    out.push_str(newline);
    out
}

/// Splits a leading single-quoted scalar off `text`, unescaping `''`.
/// `None` when the scalar does not end on this line.
fn single_quoted(text: &str) -> Option<(String, &str)> {
    let body = text.strip_prefix('\'')?;
    let mut value = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            value.push(c);
            continue;
        }
        if let Some((_, '\'')) = chars.peek() {
            chars.next();
            value.push('\'');
        } else {
            return Some((value, &body[i + 1..]));
        }
    }
    None
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
