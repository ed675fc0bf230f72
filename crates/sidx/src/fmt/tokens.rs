//! Contains all token handling logic.

/// A token in a rendered item, used to apply syntax coloring.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    /// A symbol, like `::` or `->`
    Symbol(String),
    /// The kind of an item, like `fn` or `trait`
    Kind(String),
    /// Whitespace, a single space
    Whitespace,
    /// An identifier, like a module in the path of an item
    Identifier(String),
    /// The identifier for a function or method
    Function(String),
    /// A keyword, like `fn`
    Keyword(String),
    /// A generic parameter, like `t`
    Generic(String),
    /// A primitive type, like `usize`
    Primitive(String),
    /// A non-primitive type, like the name of a struct or a trait
    Type(String),
}

impl Token {
    /// Get the inner text of this token
    pub fn text(&self) -> &str {
        match self {
            Self::Symbol(l)
            | Self::Kind(l)
            | Self::Identifier(l)
            | Self::Function(l)
            | Self::Keyword(l)
            | Self::Generic(l)
            | Self::Primitive(l)
            | Self::Type(l) => l,
            Self::Whitespace => " ",
        }
    }
}

/// Convert a slice of tokens to a single string.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
