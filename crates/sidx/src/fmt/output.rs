use super::tokens::Token;

/// A builder-style wrapper around `Vec<Token>` for ergonomic token construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Output {
    tokens: Vec<Token>,
}

impl Output {
    /// Create a new empty output.
    pub(crate) fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Add a symbol token, like `::` or `->`.
    pub(crate) fn symbol(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Symbol(text.into()));
        self
    }

    /// Add a kind token, like `fn` or `trait`.
    pub(crate) fn kind(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Kind(text.into()));
        self
    }

    /// Add whitespace (a single space).
    pub(crate) fn whitespace(&mut self) -> &mut Self {
        self.tokens.push(Token::Whitespace);
        self
    }

    /// Add an identifier token, like parts of the path of an item.
    pub(crate) fn identifier(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Identifier(text.into()));
        self
    }

    /// Add a function identifier token.
    pub(crate) fn function(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Function(text.into()));
        self
    }

    /// Add a keyword token, like `fn`.
    pub(crate) fn keyword(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Keyword(text.into()));
        self
    }

    /// Add a generic parameter token, like `t`.
    pub(crate) fn generic(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Generic(text.into()));
        self
    }

    /// Add a primitive type token, like `usize`.
    pub(crate) fn primitive(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Primitive(text.into()));
        self
    }

    /// Add a type token, like the name of a struct or a trait.
    pub(crate) fn type_(&mut self, text: impl Into<String>) -> &mut Self {
        self.tokens.push(Token::Type(text.into()));
        self
    }

    /// Get a reference to the underlying tokens.
    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Add ", " (symbol + whitespace).
    pub(crate) fn symbol_comma(&mut self) -> &mut Self {
        self.symbol(",").whitespace()
    }

    /// Add " -> " (whitespace + symbol + whitespace).
    pub(crate) fn symbol_arrow(&mut self) -> &mut Self {
        self.whitespace().symbol("->").whitespace()
    }
}
