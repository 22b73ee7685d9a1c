//! Namespace and class declaration detection
//!
//! Only the first class declared in a file is reported. Its parent class and
//! interfaces are resolved to fully-qualified names through the file's
//! namespace and `use` imports, so a type hierarchy can be assembled from
//! scanned sources without loading any code.

use std::collections::HashMap;

use super::lexer::{Token, tokenize};

/// A class declaration found in a PHP source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Fully-qualified class name, e.g. `\App\Commands\Deploy` (no leading `\` when un-namespaced)
    pub name: String,
    /// Fully-qualified parent class
    pub extends: Option<String>,
    /// Fully-qualified implemented interfaces
    pub implements: Vec<String>,
}

/// Detect the fully-qualified name of the first class declared in `source`.
pub fn detect_declared_type(source: &str) -> Option<String> {
    parse_class_declaration(source).map(|declaration| declaration.name)
}

/// Parse the first class declaration in `source`, with its resolved parents.
pub fn parse_class_declaration(source: &str) -> Option<ClassDeclaration> {
    class_declaration_from_tokens(&tokenize(source))
}

pub(crate) fn class_declaration_from_tokens(tokens: &[Token]) -> Option<ClassDeclaration> {
    let mut namespace: Option<String> = None;
    let mut imports = Imports::default();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let previous = i.checked_sub(1).and_then(|p| tokens.get(p));

        if token.is_keyword("namespace") && previous != Some(&Token::DoubleColon) {
            let (name, end) = read_namespace(tokens, i + 1);
            namespace = name;
            imports = Imports::default();
            i = end;
        } else if token.is_keyword("use") && at_statement_start(previous) {
            i = read_use_statement(tokens, i + 1, &mut imports);
        } else if token.is_keyword("class")
            && previous != Some(&Token::DoubleColon)
            && !previous.is_some_and(|p| p.is_keyword("new"))
        {
            let declaration = read_class_header(tokens, i + 1, namespace.as_deref(), &imports);
            if declaration.is_some() {
                return declaration;
            }
        }
        i += 1;
    }
    None
}

fn at_statement_start(previous: Option<&Token>) -> bool {
    matches!(previous, None | Some(Token::Punct(';' | '{' | '}')))
}

/// Collect name tokens up to the block-open or statement terminator.
fn read_namespace(tokens: &[Token], start: usize) -> (Option<String>, usize) {
    let mut namespace = String::new();
    let mut i = start;
    while let Some(token) = tokens.get(i) {
        match token {
            Token::Name(part) => {
                namespace.push('\\');
                namespace.push_str(part.trim_start_matches('\\'));
            }
            Token::Punct('{' | ';') => break,
            _ => {}
        }
        i += 1;
    }
    let namespace = (!namespace.is_empty()).then_some(namespace);
    (namespace, i)
}

fn read_class_header(
    tokens: &[Token],
    start: usize,
    namespace: Option<&str>,
    imports: &Imports,
) -> Option<ClassDeclaration> {
    let Some(Token::Name(class_name)) = tokens.get(start) else {
        return None;
    };
    if class_name.contains('\\')
        || tokens[start].is_keyword("extends")
        || tokens[start].is_keyword("implements")
    {
        return None;
    }

    let mut clause = Clause::None;
    let mut extends = None;
    let mut implements = Vec::new();
    for token in &tokens[start + 1..] {
        match token {
            t if t.is_keyword("extends") => clause = Clause::Extends,
            t if t.is_keyword("implements") => clause = Clause::Implements,
            Token::Name(name) => match clause {
                Clause::Extends if extends.is_none() => {
                    extends = Some(resolve_name(name, namespace, imports));
                }
                Clause::Implements => implements.push(resolve_name(name, namespace, imports)),
                _ => {}
            },
            Token::Punct('{') => {
                let name = match namespace {
                    Some(namespace) => format!("{namespace}\\{class_name}"),
                    None => class_name.clone(),
                };
                return Some(ClassDeclaration {
                    name,
                    extends,
                    implements,
                });
            }
            Token::Punct(';' | '(' | ')') => return None,
            _ => {}
        }
    }
    None
}

enum Clause {
    None,
    Extends,
    Implements,
}

/// Aliases imported with `use`, keyed by lowercase alias
#[derive(Debug, Default)]
struct Imports {
    by_alias: HashMap<String, String>,
}

impl Imports {
    fn add(&mut self, name: &str, alias: Option<&str>) {
        let name = name.trim_start_matches('\\');
        let alias = alias.unwrap_or_else(|| name.rsplit('\\').next().unwrap_or(name));
        self.by_alias.insert(alias.to_lowercase(), format!("\\{name}"));
    }

    fn get(&self, alias: &str) -> Option<&String> {
        self.by_alias.get(&alias.to_lowercase())
    }
}

/// Read one `use` statement, returning the index of its terminator.
fn read_use_statement(tokens: &[Token], start: usize, imports: &mut Imports) -> usize {
    let mut i = start;
    if tokens
        .get(i)
        .is_some_and(|t| t.is_keyword("function") || t.is_keyword("const"))
    {
        while tokens.get(i).is_some_and(|t| *t != Token::Punct(';')) {
            i += 1;
        }
        return i;
    }

    while let Some(token) = tokens.get(i) {
        match token {
            Token::Name(prefix) => {
                let mut j = i + 1;
                if tokens.get(j) == Some(&Token::Punct('\\')) {
                    j += 1;
                }
                if tokens.get(j) == Some(&Token::Punct('{')) {
                    i = read_group_use(tokens, j + 1, prefix, imports);
                } else {
                    let (alias, next) = read_alias(tokens, i + 1);
                    imports.add(prefix, alias);
                    i = next;
                }
            }
            Token::Punct(';') => return i,
            _ => i += 1,
        }
    }
    i
}

fn read_group_use(tokens: &[Token], start: usize, prefix: &str, imports: &mut Imports) -> usize {
    let prefix = prefix.trim_end_matches('\\');
    let mut i = start;
    while let Some(token) = tokens.get(i) {
        match token {
            Token::Name(name) => {
                let (alias, next) = read_alias(tokens, i + 1);
                imports.add(&format!("{prefix}\\{name}"), alias);
                i = next;
            }
            Token::Punct('}') => return i + 1,
            _ => i += 1,
        }
    }
    i
}

fn read_alias(tokens: &[Token], start: usize) -> (Option<&str>, usize) {
    if tokens.get(start).is_some_and(|t| t.is_keyword("as")) {
        if let Some(Token::Name(alias)) = tokens.get(start + 1) {
            return (Some(alias.as_str()), start + 2);
        }
    }
    (None, start)
}

/// Resolve a class reference to a fully-qualified name.
fn resolve_name(name: &str, namespace: Option<&str>, imports: &Imports) -> String {
    if name.starts_with('\\') {
        return name.to_string();
    }
    let namespace = namespace.unwrap_or("");
    if let Some(rest) = name
        .get(..10)
        .filter(|head| head.eq_ignore_ascii_case("namespace\\"))
        .map(|_| &name[10..])
    {
        return format!("{namespace}\\{rest}");
    }

    let (first, rest) = match name.split_once('\\') {
        Some((first, rest)) => (first, Some(rest)),
        None => (name, None),
    };
    if let Some(imported) = imports.get(first) {
        return match rest {
            Some(rest) => format!("{imported}\\{rest}"),
            None => imported.clone(),
        };
    }
    format!("{namespace}\\{name}")
}
