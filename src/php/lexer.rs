//! A minimal PHP tokenizer
//!
//! Recognizes just enough of the language to find declarations and literal
//! values reliably: open/close tags, comments, strings (including heredoc and
//! nowdoc), variables, names and a handful of punctuation. Whitespace,
//! comments and inline HTML never reach the token stream.

/// A significant PHP token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An identifier or (fully) qualified name, e.g. `class`, `Foo\Bar`, `\Foo`
    Name(String),
    /// A variable, without the leading `$`
    Variable(String),
    /// The decoded contents of a string literal
    Str(String),
    Number(String),
    /// `::`
    DoubleColon,
    /// `=>`
    DoubleArrow,
    Punct(char),
}

impl Token {
    /// True when this is a name token matching `keyword` case-insensitively.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Name(name) if name.eq_ignore_ascii_case(keyword))
    }
}

/// Tokenize a complete PHP source file.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        src: source.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
    };
    while lexer.pos < lexer.src.len() {
        lexer.skip_inline_html();
        lexer.lex_php();
    }
    lexer.tokens
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn starts_with(&self, needle: &[u8]) -> bool {
        self.src[self.pos..].starts_with(needle)
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.src[start..end]).into_owned()
    }

    fn skip_inline_html(&mut self) {
        while self.pos < self.src.len() {
            if self.starts_with(b"<?") {
                self.pos += 2;
                if self.src[self.pos..]
                    .get(..3)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case(b"php"))
                {
                    self.pos += 3;
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                }
                return;
            }
            self.pos += 1;
        }
    }

    fn lex_php(&mut self) {
        while let Some(c) = self.peek() {
            let next = self.peek_at(1);
            match c {
                b'?' if next == Some(b'>') => {
                    // a close tag also ends the statement
                    self.pos += 2;
                    self.tokens.push(Token::Punct(';'));
                    return;
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                b'#' if next == Some(b'[') => {
                    self.pos += 2;
                    self.tokens.push(Token::Punct('['));
                }
                b'#' => self.skip_line_comment(),
                b'/' if next == Some(b'/') => self.skip_line_comment(),
                b'/' if next == Some(b'*') => self.skip_block_comment(),
                b'\'' => self.lex_single_quoted(),
                b'"' | b'`' => self.lex_double_quoted(c),
                b'<' if self.starts_with(b"<<<") => self.lex_heredoc(),
                b'$' if next.is_some_and(is_ident_start) => self.lex_variable(),
                b'\\' if next.is_some_and(is_ident_start) => self.lex_name(),
                c if is_ident_start(c) => self.lex_name(),
                c if c.is_ascii_digit() => self.lex_number(),
                b':' if next == Some(b':') => {
                    self.pos += 2;
                    self.tokens.push(Token::DoubleColon);
                }
                b'=' if next == Some(b'>') => {
                    self.pos += 2;
                    self.tokens.push(Token::DoubleArrow);
                }
                _ => {
                    self.pos += 1;
                    self.tokens.push(Token::Punct(char::from(c)));
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' || self.starts_with(b"?>") {
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.src.len() {
            if self.starts_with(b"*/") {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn lex_single_quoted(&mut self) {
        self.pos += 1;
        let mut value = Vec::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'\'' => break,
                b'\\' if matches!(self.peek(), Some(b'\'' | b'\\')) => {
                    value.push(self.src[self.pos]);
                    self.pos += 1;
                }
                _ => value.push(c),
            }
        }
        self.tokens
            .push(Token::Str(String::from_utf8_lossy(&value).into_owned()));
    }

    fn lex_double_quoted(&mut self, quote: u8) {
        self.pos += 1;
        let start = self.pos;
        let mut brace_depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.pos += 2,
                b'{' if self.peek_at(1) == Some(b'$') => {
                    brace_depth += 1;
                    self.pos += 2;
                }
                b'}' if brace_depth > 0 => {
                    brace_depth -= 1;
                    self.pos += 1;
                }
                c if c == quote && brace_depth == 0 => break,
                _ => self.pos += 1,
            }
        }
        let end = self.pos.min(self.src.len());
        self.pos = (self.pos + 1).min(self.src.len());
        let raw = self.text(start, end);
        self.tokens.push(Token::Str(unescape_double_quoted(&raw)));
    }

    fn lex_heredoc(&mut self) {
        self.pos += 3;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
        let quote = self.peek().filter(|c| *c == b'\'' || *c == b'"');
        if quote.is_some() {
            self.pos += 1;
        }
        let label_start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let label = self.src[label_start..self.pos].to_vec();
        if quote.is_some() {
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == b'\n' {
                break;
            }
        }
        if label.is_empty() {
            return;
        }

        let mut lines: Vec<String> = Vec::new();
        let mut indent = 0usize;
        while self.pos < self.src.len() {
            let line_end = self.src[self.pos..]
                .iter()
                .position(|c| *c == b'\n')
                .map_or(self.src.len(), |p| self.pos + p);
            let line = &self.src[self.pos..line_end];
            let leading = line
                .iter()
                .take_while(|c| **c == b' ' || **c == b'\t')
                .count();
            let rest = &line[leading..];
            if rest.starts_with(&label)
                && !rest
                    .get(label.len())
                    .is_some_and(|c| is_ident_continue(*c))
            {
                indent = leading;
                self.pos += leading + label.len();
                break;
            }
            lines.push(String::from_utf8_lossy(line).into_owned());
            self.pos = (line_end + 1).min(self.src.len());
        }

        let body = lines
            .iter()
            .map(|line| {
                let strip = line
                    .char_indices()
                    .take(indent)
                    .take_while(|(_, c)| *c == ' ' || *c == '\t')
                    .count();
                &line[strip..]
            })
            .collect::<Vec<_>>()
            .join("\n");
        let value = if quote == Some(b'\'') {
            body
        } else {
            unescape_double_quoted(&body)
        };
        self.tokens.push(Token::Str(value));
    }

    fn lex_variable(&mut self) {
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let name = self.text(start, self.pos);
        self.tokens.push(Token::Variable(name));
    }

    fn lex_name(&mut self) {
        let start = self.pos;
        loop {
            if self.peek() == Some(b'\\') && self.peek_at(1).is_some_and(is_ident_start) {
                self.pos += 1;
            }
            while self.peek().is_some_and(is_ident_continue) {
                self.pos += 1;
            }
            if !(self.peek() == Some(b'\\') && self.peek_at(1).is_some_and(is_ident_start)) {
                break;
            }
        }
        let name = self.text(start, self.pos);
        self.tokens.push(Token::Name(name));
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let continues = c.is_ascii_alphanumeric()
                || c == b'_'
                || (c == b'.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()));
            if !continues {
                break;
            }
            self.pos += 1;
        }
        let number = self.text(start, self.pos);
        self.tokens.push(Token::Number(number));
    }
}

fn unescape_double_quoted(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('v') => value.push('\u{0b}'),
            Some('f') => value.push('\u{0c}'),
            Some('e') => value.push('\u{1b}'),
            Some(escaped @ ('\\' | '$' | '"' | '`')) => value.push(escaped),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Name(n) => Some(n.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_inline_html_is_skipped() {
        let tokens = tokenize("<html>class Nope {}</html><?php echo 1; ?>after class X");
        assert_eq!(names(&tokens), vec!["echo"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = tokenize("<?php\n// class A {}\n# class B {}\n/* class C {} */\nfoo();");
        assert_eq!(names(&tokens), vec!["foo"]);
    }

    #[test]
    fn test_attribute_is_not_a_comment() {
        let tokens = tokenize("<?php #[Attr] class A {}");
        assert_eq!(names(&tokens), vec!["Attr", "class", "A"]);
    }

    #[test]
    fn test_qualified_names_are_single_tokens() {
        let tokens = tokenize("<?php use \\Illuminate\\Console\\Command;");
        assert_eq!(
            tokens[1],
            Token::Name("\\Illuminate\\Console\\Command".to_string())
        );
    }

    #[test]
    fn test_double_colon_and_arrow() {
        let tokens = tokenize("<?php Foo::class; ['a' => 1];");
        assert!(tokens.contains(&Token::DoubleColon));
        assert!(tokens.contains(&Token::DoubleArrow));
    }

    #[test]
    fn test_single_quoted_string_escapes() {
        let tokens = tokenize(r"<?php 'it\'s a \\ \n';");
        assert_eq!(tokens[0], Token::Str(r"it's a \ \n".to_string()));
    }

    #[test]
    fn test_double_quoted_string_hides_keywords() {
        let tokens = tokenize("<?php \"class {$a['x']} \\\"q\\\"\";");
        assert_eq!(names(&tokens), Vec::<&str>::new());
        assert_eq!(
            tokens[0],
            Token::Str("class {$a['x']} \"q\"".to_string())
        );
    }

    #[test]
    fn test_heredoc_body_is_one_string() {
        let source = "<?php\n$x = <<<EOT\n    class Hidden {}\n    EOT;\nclass Shown {}";
        let tokens = tokenize(source);
        assert!(tokens.contains(&Token::Str("class Hidden {}".to_string())));
        assert_eq!(names(&tokens), vec!["class", "Shown"]);
    }

    #[test]
    fn test_nowdoc_keeps_escapes() {
        let source = "<?php\n$x = <<<'EOT'\na\\nb\nEOT;\n";
        let tokens = tokenize(source);
        assert!(tokens.contains(&Token::Str("a\\nb".to_string())));
    }

    #[test]
    fn test_variables() {
        let tokens = tokenize("<?php protected $signature = 'x';");
        assert_eq!(tokens[1], Token::Variable("signature".to_string()));
    }

    #[test]
    fn test_unterminated_comment_does_not_panic() {
        let tokens = tokenize("<?php class A /* never closed");
        assert_eq!(names(&tokens), vec!["class", "A"]);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(Token::Name("CLASS".to_string()).is_keyword("class"));
        assert!(!Token::Str("class".to_string()).is_keyword("class"));
    }
}
