//! Reader for the `search-index.js` artifact.
//!
//! The accepted shape is exactly what rustdoc writes:
//!
//! ```text
//! var searchIndex = {};
//! searchIndex['my_crate'] = {"items":[...],"paths":[...]};
//! initSearch(searchIndex);
//! ```
//!
//! Whitespace and comments between statements are ignored, keys may use
//! single or double quotes and trailing semicolons are optional.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::builder::SearchIndexBuilder;
use crate::error::{Error, Result};
use crate::model::{CrateIndex, SearchIndex};
use crate::validate::validate;

const GLOBAL: &str = "searchIndex";
const INIT: &str = "initSearch";

/// Parse the artifact without checking referential integrity.
///
/// Syntax errors, duplicate crates and a missing or repeated `initSearch`
/// call are still errors; use [`crate::validate`] for the rest.
pub fn parse(src: &str) -> Result<SearchIndex> {
    let mut cursor = Cursor::new(src);
    let mut builder = SearchIndexBuilder::new();

    cursor.declaration()?;

    let mut init_seen = false;
    loop {
        cursor.skip_trivia();
        if cursor.at_end() {
            break;
        }

        let start = cursor.pos;
        match cursor.ident() {
            Some(GLOBAL) => {
                if init_seen {
                    return Err(Error::InitSearch("table assigned after initSearch"));
                }
                let (name, index) = cursor.assignment()?;
                trace!(krate = %name, offset = start, "table assignment");
                builder.register(name, index)?;
            }
            Some(INIT) => {
                cursor.init_call()?;
                if init_seen {
                    return Err(Error::InitSearch("called more than once"));
                }
                init_seen = true;
            }
            Some(other) => {
                return Err(cursor.error_at(start, format!("unexpected identifier `{}`", other)));
            }
            None => return Err(cursor.error("expected a statement")),
        }
    }

    if !init_seen {
        return Err(Error::InitSearch("never called"));
    }

    let index = builder.build_unchecked();
    debug!(
        crates = index.len(),
        items = index.item_count(),
        "parsed search index"
    );
    Ok(index)
}

/// Parse the artifact and reject it if validation finds any error.
pub fn load_str(src: &str) -> Result<SearchIndex> {
    let index = parse(src)?;
    let report = validate(&index);
    if !report.is_ok() {
        return Err(Error::Invalid(report));
    }
    Ok(index)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<SearchIndex> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&src)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Skip whitespace, line comments and block comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                let len = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += len;
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                match body.find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn eat(&mut self, lit: &str) -> bool {
        self.skip_trivia();
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, lit: &str) -> Result<()> {
        if self.eat(lit) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", lit)))
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_trivia();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn expect_ident(&mut self, expected: &str) -> Result<()> {
        let start = self.pos;
        match self.ident() {
            Some(found) if found == expected => Ok(()),
            _ => Err(self.error_at(start, format!("expected `{}`", expected))),
        }
    }

    /// `var searchIndex = {};` (also `let`/`const`).
    fn declaration(&mut self) -> Result<()> {
        let start = self.pos;
        match self.ident() {
            Some("var" | "let" | "const") => {}
            _ => {
                return Err(self.error_at(start, format!("expected `var {} = {{}};`", GLOBAL)));
            }
        }
        self.expect_ident(GLOBAL)?;
        self.expect("=")?;
        self.expect("{")?;
        self.expect("}")?;
        self.eat(";");
        Ok(())
    }

    /// `['name'] = {...};`, the leading `searchIndex` already consumed.
    fn assignment(&mut self) -> Result<(String, CrateIndex)> {
        self.expect("[")?;
        let name = self.string_literal()?;
        self.expect("]")?;
        self.expect("=")?;
        self.skip_trivia();
        let offset = self.pos;
        let index = self
            .json_value::<CrateIndex>()
            .map_err(|source| match source {
                Some(source) => Error::Json {
                    krate: name.clone(),
                    offset,
                    source,
                },
                None => self.error_at(offset, "expected a table object"),
            })?;
        self.eat(";");
        Ok((name, index))
    }

    /// `(searchIndex);`, the leading `initSearch` already consumed.
    fn init_call(&mut self) -> Result<()> {
        self.expect("(")?;
        self.expect_ident(GLOBAL)?;
        self.expect(")")?;
        self.eat(";");
        Ok(())
    }

    fn string_literal(&mut self) -> Result<String> {
        self.skip_trivia();
        let start = self.pos;
        let mut chars = self.rest().char_indices().peekable();
        let quote = match chars.next() {
            Some((_, q @ ('\'' | '"'))) => q,
            _ => return Err(self.error("expected a quoted crate name")),
        };

        let mut value = String::new();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    let Some((_, escaped)) = chars.next() else {
                        break;
                    };
                    let decoded = match escaped {
                        'n' => Some('\n'),
                        'r' => Some('\r'),
                        't' => Some('\t'),
                        'b' => Some('\u{8}'),
                        'f' => Some('\u{c}'),
                        'v' => Some('\u{b}'),
                        '0' => Some('\0'),
                        'x' => hex_escape(&mut chars, 2).and_then(char::from_u32),
                        'u' => unicode_escape(&mut chars),
                        // line continuation
                        '\n' | '\u{2028}' | '\u{2029}' => continue,
                        '\r' => {
                            chars.next_if(|&(_, c)| c == '\n');
                            continue;
                        }
                        other => Some(other),
                    };
                    match decoded {
                        Some(c) => value.push(c),
                        None => {
                            return Err(self.error_at(start + i, "invalid escape sequence"));
                        }
                    }
                }
                c if c == quote => {
                    self.pos = start + i + c.len_utf8();
                    return Ok(value);
                }
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => break,
                c => value.push(c),
            }
        }
        Err(self.error_at(start, "unterminated string literal"))
    }

    /// Deserialize one JSON value in place and advance past it.
    ///
    /// `Ok(None)`-like absence is reported as `Err(None)`.
    fn json_value<T: DeserializeOwned>(&mut self) -> Result<T, Option<serde_json::Error>> {
        let mut stream = serde_json::Deserializer::from_str(self.rest()).into_iter::<T>();
        match stream.next() {
            Some(Ok(value)) => {
                self.pos += stream.byte_offset();
                Ok(value)
            }
            Some(Err(err)) => Err(Some(err)),
            None => Err(None),
        }
    }
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

/// Exactly `len` hex digits.
fn hex_escape(chars: &mut Chars<'_>, len: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..len {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}

/// The part after `\u`: `XXXX`, a `\uXXXX\uXXXX` surrogate pair, or `{X...}`.
fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    if chars.next_if(|&(_, c)| c == '{').is_some() {
        let mut code: u32 = 0;
        let mut digits = 0;
        loop {
            let (_, c) = chars.next()?;
            if c == '}' {
                break;
            }
            code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
            digits += 1;
        }
        return if digits == 0 { None } else { char::from_u32(code) };
    }

    let high = hex_escape(chars, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }
    chars.next_if(|&(_, c)| c == '\\')?;
    chars.next_if(|&(_, c)| c == 'u')?;
    let low = hex_escape(chars, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}
