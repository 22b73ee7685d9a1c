//! Static reads of literal values
//!
//! Usage examples need a command's name and the first key of a config or
//! translation array. Both are read lexically from the source; nothing is
//! executed, so values built at runtime are simply not found.

use super::lexer::{Token, tokenize};

/// Read the string default of a declared property, e.g. `protected $signature = '...'`.
pub fn read_string_property(source: &str, property: &str) -> Option<String> {
    let tokens = tokenize(source);
    tokens.windows(4).find_map(|window| match window {
        [
            Token::Name(_),
            Token::Variable(name),
            Token::Punct('='),
            Token::Str(value),
        ] if name == property => Some(value.clone()),
        _ => None,
    })
}

/// The console command name a command class registers under.
///
/// Taken from the first word of `$signature`, falling back to `$name`.
///
/// # Examples
/// ```
/// use autoreg::php::command_name;
/// let source = "<?php class A { protected $signature = 'mail:send {user} {--queue}'; }";
/// assert_eq!(command_name(source), Some("mail:send".to_string()));
/// ```
pub fn command_name(source: &str) -> Option<String> {
    read_string_property(source, "signature")
        .and_then(|signature| signature.split_whitespace().next().map(str::to_string))
        .or_else(|| read_string_property(source, "name").filter(|name| !name.is_empty()))
}

/// The first key of the file's returned array, flattened with dots.
///
/// Nested arrays are followed to their first leaf, so
/// `return ['mail' => ['from' => 'x']];` gives `mail.from`. Entries without a
/// key use their list index. Returns `None` when the file does not return an
/// array literal or the array is empty.
pub fn first_returned_key(source: &str) -> Option<String> {
    let tokens = tokenize(source);
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Punct('{') => depth += 1,
            Token::Punct('}') => depth = depth.saturating_sub(1),
            t if depth == 0 && t.is_keyword("return") => {
                let (open, close) = array_open(&tokens, i + 1)?;
                return first_key_of_array(&tokens, open + 1, close).flatten();
            }
            _ => {}
        }
    }
    None
}

/// Locate an array literal starting at `pos`: `[` or `array(`.
fn array_open(tokens: &[Token], pos: usize) -> Option<(usize, char)> {
    match tokens.get(pos)? {
        Token::Punct('[') => Some((pos, ']')),
        t if t.is_keyword("array") && tokens.get(pos + 1) == Some(&Token::Punct('(')) => {
            Some((pos + 1, ')'))
        }
        _ => None,
    }
}

/// `None` when the array can't be read, `Some(None)` when it is empty.
fn first_key_of_array(tokens: &[Token], start: usize, close: char) -> Option<Option<String>> {
    let first = tokens.get(start)?;
    if *first == Token::Punct(close) {
        return Some(None);
    }
    if tokens.get(start + 1) == Some(&Token::DoubleArrow) {
        let key = match first {
            Token::Str(key) | Token::Number(key) => key.clone(),
            _ => return None,
        };
        return Some(Some(dotted(key, nested_first_key(tokens, start + 2))));
    }
    if *first == Token::Punct('.') {
        // spread operator
        return None;
    }
    Some(Some(dotted("0".to_string(), nested_first_key(tokens, start))))
}

/// The first key of a value that is itself a non-empty array literal.
fn nested_first_key(tokens: &[Token], pos: usize) -> Option<String> {
    let (open, close) = array_open(tokens, pos)?;
    let end = matching_close(tokens, open)?;
    if !matches!(tokens.get(end + 1), Some(Token::Punct(',' | ']' | ')'))) {
        return None;
    }
    first_key_of_array(tokens, open + 1, close).flatten()
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Punct('[' | '(' | '{') => depth += 1,
            Token::Punct(']' | ')' | '}') => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn dotted(key: String, nested: Option<String>) -> String {
    match nested {
        Some(nested) => format!("{key}.{nested}"),
        None => key,
    }
}
