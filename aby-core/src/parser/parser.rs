use crate::{
    lexer::prelude::{tokenize, LexicalWarning, Token, TokenKind},
    utils::prelude::SrcSpan
};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{Block, Node, Parsed};

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Node,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub next_token: Token,

    eof: Token,
    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(input: T) -> Self {
        let eof = Token::new(TokenKind::Eof, "", 1, SrcSpan::default());

        let mut parser = Self {
            current_token: eof.clone(),
            next_token: eof.clone(),

            eof,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Advances by one token and returns the one that was current.
    pub fn next_token(&mut self) -> Token {
        let next = match self.tokens.next() {
            Some(token) => {
                if token.is_eof() {
                    self.eof = token.clone();
                }

                token
            },
            None => self.eof.clone()
        };

        let next = std::mem::replace(&mut self.next_token, next);

        std::mem::replace(&mut self.current_token, next)
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token)
    }

    /// Parses statements until end of file into the root block.
    pub fn parse(&mut self) -> Result<Block, ParseError> {
        let start = self.current_token.span;
        let mut statements = vec![];

        while !self.current_token.is_eof() {
            statements.push(self.parse_statement()?);
            self.skip_semicolon();
        }

        Ok(Block {
            statements,
            location: start.to(self.current_token.span)
        })
    }

    pub fn parse_statement(&mut self) -> Result<Node, ParseError> {
        tracing::trace!(
            token = %self.current_token.text,
            line = self.current_token.line,
            "parsing statement"
        );

        let token = self.current_token.clone();

        let statement = match token.kind {
            TokenKind::Keyword => match token.text.as_str() {
                "print" => Node::Print(Parse::parse(self, None)?),
                "fun" => Node::FunctionDecl(Parse::parse(self, None)?),
                "return" => Node::Return(Parse::parse(self, None)?),
                "foreach" => Node::ForeachLoop(Parse::parse(self, None)?),
                "event" => Node::EventListener(Parse::parse(self, None)?),
                "npc" => Node::NpcAction(Parse::parse(self, None)?),
                "for" => Node::ForLoop(Parse::parse(self, None)?),
                "while" => Node::WhileLoop(Parse::parse(self, None)?),
                "input" => Node::Input(Parse::parse(self, None)?),
                _ => return parse_error(
                    ParseErrorType::UnknownStatement { found: token.describe() },
                    &token
                )
            },
            TokenKind::Identifier => self.parse_assignment_or_call()?,
            TokenKind::Symbol if token.text == "(" => Node::parse(self, None)?,
            TokenKind::Eof => return parse_error(
                ParseErrorType::UnexpectedEof { expected: vec!["a statement".to_string()] },
                &token
            ),
            _ => return parse_error(
                ParseErrorType::UnknownStatement { found: token.describe() },
                &token
            )
        };

        self.skip_semicolon();

        Ok(statement)
    }

    pub fn skip_semicolon(&mut self) {
        if self.current_token.kind == TokenKind::Semicolon {
            self.step();
        }
    }

    pub fn expect_symbol(&mut self, symbol: &str) -> Result<SrcSpan, ParseError> {
        if self.current_token.is_symbol(symbol) {
            return Ok(self.next_token().span);
        }

        self.unexpected(vec![format!("`{symbol}`")])
    }

    pub fn expect_operator(&mut self, operator: &str) -> Result<SrcSpan, ParseError> {
        if self.current_token.is_operator(operator) {
            return Ok(self.next_token().span);
        }

        self.unexpected(vec![format!("`{operator}`")])
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<SrcSpan, ParseError> {
        if self.current_token.is_keyword(keyword) {
            return Ok(self.next_token().span);
        }

        self.unexpected(vec![format!("the keyword `{keyword}`")])
    }

    pub fn expect_ident(&mut self) -> Result<(SrcSpan, String), ParseError> {
        if self.current_token.kind == TokenKind::Identifier {
            let token = self.next_token();
            return Ok((token.span, token.text));
        }

        if self.current_token.is_eof() {
            return self.unexpected(vec!["an identifier".to_string()]);
        }

        parse_error(
            ParseErrorType::ExpectedIdent { found: self.current_token.describe() },
            &self.current_token
        )
    }

    /// Error for the current token, which is none of `expected`.
    pub fn unexpected<R>(&self, expected: Vec<String>) -> Result<R, ParseError> {
        let token = &self.current_token;

        if token.is_eof() {
            return parse_error(ParseErrorType::UnexpectedEof { expected }, token);
        }

        parse_error(
            ParseErrorType::UnexpectedToken { found: token.describe(), expected },
            token
        )
    }

    fn parse_assignment_or_call(&mut self) -> Result<Node, ParseError> {
        if self.next_token.is_operator("=") {
            return Ok(Node::Assignment(Parse::parse(self, None)?));
        }

        if self.next_token.is_symbol("(") {
            return Ok(Node::FunctionCall(Parse::parse(self, None)?));
        }

        parse_error(
            ParseErrorType::ExpectedAssignmentOrCall { found: self.next_token.describe() },
            &self.next_token
        )
    }
}

/// Binding power of binary operators. Relational and equality operators
/// share the additive level.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        if value.kind != TokenKind::Operator {
            return Self::Lowest;
        }

        match value.text.as_str() {
            "+" | "-" | "<" | ">" | "<=" | ">=" | "==" | "!=" => Self::Sum,
            "*" | "/" => Self::Product,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexed = tokenize(src);

    parse_tokens(lexed.tokens, lexed.warnings)
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let mut lexer = crate::lexer::prelude::Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let tokens = lexer.by_ref().collect();
    let warnings = lexer.take_warnings();

    parse_tokens(tokens, warnings)
}

fn parse_tokens(tokens: Vec<Token>, warnings: Vec<LexicalWarning>) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.parse()?;

    Ok(Parsed {
        program,
        warnings
    })
}
