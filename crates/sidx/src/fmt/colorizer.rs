//! Centralized colorization for terminal output.
//!
//! Picks a palette for the terminal's background (dark or light) once and
//! applies it to tokens and summary text.

use std::sync::LazyLock;

use colored::Colorize;
use terminal_colorsaurus::{QueryOptions, ThemeMode, theme_mode};

use super::tokens::{Token, tokens_to_string};

/// Global colorizer instance
static COLORIZER: LazyLock<Colorizer> = LazyLock::new(Colorizer::new);

type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy)]
struct Palette {
    /// Keywords and item kinds
    keyword: Rgb,
    /// Function and method names
    function: Rgb,
    /// Types, generics, primitives
    type_: Rgb,
    /// Path segments
    identifier: Rgb,
    /// Inline code in summaries
    code: Rgb,
}

const DARK: Palette = Palette {
    keyword: (204, 153, 204),
    function: (102, 153, 204),
    type_: (255, 204, 102),
    identifier: (211, 208, 200),
    code: (153, 204, 153),
};

const LIGHT: Palette = Palette {
    keyword: (167, 29, 93),
    function: (121, 93, 163),
    type_: (0, 134, 179),
    identifier: (51, 51, 51),
    code: (24, 54, 145),
};

/// Centralized colorizer for all terminal output.
pub struct Colorizer {
    palette: Palette,
}

impl Colorizer {
    /// Create a new colorizer, detecting theme from terminal.
    fn new() -> Self {
        // Terminal queries can hang under test harnesses.
        // See: https://github.com/bash/terminal-colorsaurus/issues/38
        let palette = if Self::is_test_environment() || !Self::is_enabled() {
            DARK
        } else {
            match theme_mode(QueryOptions::default()) {
                Ok(ThemeMode::Light) => LIGHT,
                Ok(ThemeMode::Dark) | Err(_) => DARK,
            }
        };
        Self { palette }
    }

    fn is_test_environment() -> bool {
        std::env::var("NEXTEST").is_ok() || std::env::var("RUST_TEST_THREADS").is_ok()
    }

    /// Get the global colorizer instance.
    #[inline]
    pub fn get() -> &'static Self {
        &COLORIZER
    }

    /// Check if colors are enabled (respects global override).
    #[inline]
    pub fn is_enabled() -> bool {
        colored::control::SHOULD_COLORIZE.should_colorize()
    }

    fn apply(&self, text: &str, (r, g, b): Rgb) -> String {
        text.truecolor(r, g, b).to_string()
    }

    fn colorize_token(&self, token: &Token) -> String {
        if !Self::is_enabled() {
            return token.text().to_string();
        }

        match token {
            Token::Symbol(text) => text.to_string(),
            Token::Kind(text) | Token::Keyword(text) => self.apply(text, self.palette.keyword),
            Token::Function(text) => self.apply(text, self.palette.function),
            Token::Generic(text) | Token::Primitive(text) | Token::Type(text) => {
                self.apply(text, self.palette.type_)
            }
            Token::Identifier(text) => self.apply(text, self.palette.identifier),
            Token::Whitespace => " ".to_string(),
        }
    }

    /// Colorize a slice of tokens to a string.
    pub fn tokens(&self, tokens: &[Token]) -> String {
        if !Self::is_enabled() {
            return tokens_to_string(tokens);
        }
        tokens.iter().map(|t| self.colorize_token(t)).collect()
    }

    /// Style text as emphasis (italic).
    pub fn emphasis(&self, text: &str) -> String {
        if Self::is_enabled() {
            text.italic().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style text as strong (bold).
    pub fn strong(&self, text: &str) -> String {
        if Self::is_enabled() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style text as inline code.
    pub fn inline_code(&self, code: &str) -> String {
        if Self::is_enabled() {
            self.apply(code, self.palette.code)
        } else {
            format!("`{}`", code)
        }
    }

    /// Style secondary text such as separators and notes.
    pub fn dimmed(&self, text: &str) -> String {
        if Self::is_enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if Self::is_enabled() {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if Self::is_enabled() {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
