//! Compound simple selectors: `tag#id.class[attr][attr="v"][attr^="v"]:checked`.
//!
//! Combinators are not supported; callers scope queries to a subtree instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected '{found}' at offset {offset} in selector '{selector}'")]
    Unexpected {
        selector: String,
        found: char,
        offset: usize,
    },
    #[error("unterminated attribute selector in '{0}'")]
    UnterminatedAttribute(String),
    #[error("unsupported pseudo-class ':{0}'")]
    UnsupportedPseudo(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
    pub checked: bool,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let chars: Vec<char> = input.chars().collect();
        let unexpected = |offset: usize| SelectorError::Unexpected {
            selector: input.to_string(),
            found: chars[offset],
            offset,
        };

        let mut selector = Selector::default();
        let mut pos = 0;
        if is_ident_char(chars[0]) {
            selector.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
        } else if chars[0] == '*' {
            pos = 1;
        }

        while pos < chars.len() {
            let marker = chars[pos];
            pos += 1;
            match marker {
                '#' | '.' | ':' => {
                    let ident = take_ident(&chars, &mut pos);
                    if ident.is_empty() {
                        return Err(unexpected(pos - 1));
                    }
                    match marker {
                        '#' => selector.id = Some(ident),
                        '.' => selector.classes.push(ident),
                        _ if ident == "checked" => selector.checked = true,
                        _ => return Err(SelectorError::UnsupportedPseudo(ident)),
                    }
                }
                '[' => {
                    let Some(close) = chars[pos..].iter().position(|c| *c == ']') else {
                        return Err(SelectorError::UnterminatedAttribute(input.to_string()));
                    };
                    let body: String = chars[pos..pos + close].iter().collect();
                    selector.attrs.push(parse_attr(&body));
                    pos += close + 1;
                }
                _ => return Err(unexpected(pos - 1)),
            }
        }

        Ok(selector)
    }
}

fn parse_attr(body: &str) -> AttrMatch {
    let unquote = |value: &str| {
        value
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string()
    };
    if let Some((name, value)) = body.split_once("^=") {
        AttrMatch::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = body.split_once('=') {
        AttrMatch::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrMatch::Exists(body.trim().to_string())
    }
}
