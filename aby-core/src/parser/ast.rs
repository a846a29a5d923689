use std::fmt::Display;

use crate::{
    lexer::prelude::{LexicalWarning, Token, TokenKind},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Block,
    pub warnings: Vec<LexicalWarning>,
}

/// Every statement and expression form of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    Assignment(Assignment),
    Print(Print),
    Input(Input),
    FunctionDecl(FunctionDecl),
    Return(Return),
    Binary(BinaryExpr),
    Identifier(Identifier),
    Number(Number),
    String(StringLiteral),
    FunctionCall(FunctionCall),
    ForeachLoop(ForeachLoop),
    EventListener(EventListener),
    NpcAction(NpcAction),
    ForLoop(ForLoop),
    WhileLoop(WhileLoop),
    ArrayLiteral(ArrayLiteral),
    ArrayIndex(ArrayIndex),
}

impl Node {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Block(node) => node.location,
            Self::Assignment(node) => node.location,
            Self::Print(node) => node.location,
            Self::Input(node) => node.location,
            Self::FunctionDecl(node) => node.location,
            Self::Return(node) => node.location,
            Self::Binary(node) => node.location,
            Self::Identifier(node) => node.location,
            Self::Number(node) => node.location,
            Self::String(node) => node.location,
            Self::FunctionCall(node) => node.location,
            Self::ForeachLoop(node) => node.location,
            Self::EventListener(node) => node.location,
            Self::NpcAction(node) => node.location,
            Self::ForLoop(node) => node.location,
            Self::WhileLoop(node) => node.location,
            Self::ArrayLiteral(node) => node.location,
            Self::ArrayIndex(node) => node.location,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block(node) => write!(f, "{node}"),
            Self::Assignment(node) => write!(f, "{node}"),
            Self::Print(node) => write!(f, "{node}"),
            Self::Input(node) => write!(f, "{node}"),
            Self::FunctionDecl(node) => write!(f, "{node}"),
            Self::Return(node) => write!(f, "{node}"),
            Self::Binary(node) => write!(f, "{node}"),
            Self::Identifier(node) => write!(f, "{node}"),
            Self::Number(node) => write!(f, "{node}"),
            Self::String(node) => write!(f, "{node}"),
            Self::FunctionCall(node) => write!(f, "{node}"),
            Self::ForeachLoop(node) => write!(f, "{node}"),
            Self::EventListener(node) => write!(f, "{node}"),
            Self::NpcAction(node) => write!(f, "{node}"),
            Self::ForLoop(node) => write!(f, "{node}"),
            Self::WhileLoop(node) => write!(f, "{node}"),
            Self::ArrayLiteral(node) => write!(f, "{node}"),
            Self::ArrayIndex(node) => write!(f, "{node}"),
        }
    }
}

// expression -> <term> { (+ | - | < | > | <= | >= | == | !=) <term> }
// term -> <factor> { (* | /) <factor> }
impl<T: Iterator<Item = Token>> Parse<T> for Node {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut expr = parse_factor(parser)?;

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = Self::Binary(BinaryExpr::parse(parser, expr, precedence)?);
        }

        Ok(expr)
    }
}

// factor -> <number> | <string> | true | false | <identifier> [ "(" <args> ")" | "[" <expression> "]" ]
//         | "(" <expression> ")" | "[" [ <expression> { , <expression> } ] "]"
fn parse_factor<T: Iterator<Item = Token>>(parser: &mut Parser<T>) -> Result<Node, ParseError> {
    let token = parser.current_token.clone();

    match token.kind {
        TokenKind::Number => {
            parser.step();

            let value = match token.text.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => return parse_error(
                    ParseErrorType::InvalidNumber { literal: token.text.clone() },
                    &token
                ),
            };

            Ok(Node::Number(Number { value, location: token.span }))
        },
        TokenKind::Identifier if parser.next_token.is_symbol("(") => {
            Ok(Node::FunctionCall(FunctionCall::parse(parser, None)?))
        },
        TokenKind::Identifier if parser.next_token.is_symbol("[") => {
            Ok(Node::ArrayIndex(ArrayIndex::parse(parser, None)?))
        },
        TokenKind::Identifier => {
            parser.step();

            Ok(Node::Identifier(Identifier::from((token.span, token.text))))
        },
        TokenKind::String => {
            parser.step();

            Ok(Node::String(StringLiteral { value: token.text, location: token.span }))
        },
        TokenKind::Keyword if matches!(token.text.as_str(), "true" | "false") => {
            parser.step();

            Ok(Node::String(StringLiteral { value: token.text, location: token.span }))
        },
        TokenKind::Symbol if token.text == "(" => {
            parser.step();

            let inner = Node::parse(parser, None)?;
            parser.expect_symbol(")")?;

            Ok(inner)
        },
        TokenKind::Symbol if token.text == "[" => {
            Ok(Node::ArrayLiteral(ArrayLiteral::parse(parser, None)?))
        },
        _ => parser.unexpected(vec![
            "a number".to_string(),
            "an identifier".to_string(),
            "a string".to_string(),
            "`(`".to_string(),
            "`[`".to_string(),
        ])
    }
}

// block -> "{" { <statement> [;] } "}"
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_symbol("{")?;
        let mut statements = vec![];

        while !parser.current_token.is_symbol("}") {
            if parser.current_token.is_eof() {
                return parser.unexpected(vec!["`}`".to_string()]);
            }

            statements.push(parser.parse_statement()?);
            parser.skip_semicolon();
        }

        let end = parser.expect_symbol("}")?;

        Ok(Self {
            statements,
            location: start.to(end)
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        let statements = self.statements.iter()
            .map(|statement| format!("{statement};"))
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Assignment {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_operator("=")?;

        let value = Node::parse(parser, None)?;
        let location = identifier.location.to(value.location());

        Ok(Self {
            identifier,
            value: Box::new(value),
            location
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// print -> print <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expression: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Print {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("print")?;
        let expression = Node::parse(parser, None)?;
        let location = start.to(expression.location());

        Ok(Self {
            expression: Box::new(expression),
            location
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print {}", self.expression)
    }
}

// input -> input <identifier>
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub identifier: Identifier,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Input {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("input")?;
        let identifier = Identifier::from(parser.expect_ident()?);
        let location = start.to(identifier.location);

        Ok(Self {
            identifier,
            location
        })
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "input {}", self.identifier)
    }
}

// function_decl -> fun <identifier> "(" [ <identifier> { , <identifier> } ] ")" <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub identifier: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for FunctionDecl {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("fun")?;
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_symbol("(")?;

        let mut parameters = vec![];

        while parser.current_token.kind == TokenKind::Identifier {
            parameters.push(Identifier::from(parser.expect_ident()?));

            if !parser.current_token.is_symbol(",") {
                break;
            }

            parser.step();
        }

        parser.expect_symbol(")")?;

        let body = Block::parse(parser, None)?;
        let location = start.to(body.location);

        Ok(Self {
            identifier,
            parameters,
            body,
            location
        })
    }
}

impl Display for FunctionDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.value.clone())
            .collect::<Vec<String>>();

        write!(f, "fun {}({}) {}", self.identifier, parameters.join(", "), self.body)
    }
}

// return -> return <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub expression: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Return {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("return")?;
        let expression = Node::parse(parser, None)?;
        let location = start.to(expression.location());

        Ok(Self {
            expression: Box::new(expression),
            location
        })
    }
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {}", self.expression)
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Node>,
    pub operator: String,
    pub right: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> InfixParse<T> for BinaryExpr {
    fn parse(
        parser: &mut Parser<T>,
        left: Node,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let operator = parser.next_token().text;

        let right = Node::parse(parser, Some(precedence))?;
        let location = left.location().to(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(SrcSpan, String)> for Identifier {
    fn from(value: (SrcSpan, String)) -> Self {
        Identifier {
            value: value.1,
            location: value.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub location: SrcSpan
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub location: SrcSpan
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

// call -> <identifier> "(" [ <expression> { , <expression> } ] ")"
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub identifier: Identifier,
    pub arguments: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for FunctionCall {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_symbol("(")?;

        let mut arguments = vec![];

        while !parser.current_token.is_symbol(")") {
            if parser.current_token.is_eof() {
                return parser.unexpected(vec!["`)`".to_string()]);
            }

            arguments.push(Node::parse(parser, None)?);

            if parser.current_token.is_symbol(",") {
                parser.step();
            }
        }

        let end = parser.expect_symbol(")")?;
        let location = identifier.location.to(end);

        Ok(Self {
            identifier,
            arguments,
            location
        })
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.identifier, arguments.join(", "))
    }
}

// foreach_loop -> foreach <identifier> in <expression> <block>
#[derive(Debug, Clone, PartialEq)]
pub struct ForeachLoop {
    pub identifier: Identifier,
    pub collection: Box<Node>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ForeachLoop {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("foreach")?;
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_keyword("in")?;

        let collection = Node::parse(parser, None)?;
        let body = Block::parse(parser, None)?;
        let location = start.to(body.location);

        Ok(Self {
            identifier,
            collection: Box::new(collection),
            body,
            location
        })
    }
}

impl Display for ForeachLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "foreach {} in {} {}", self.identifier, self.collection, self.body)
    }
}

// event_listener -> event <identifier> <block>
#[derive(Debug, Clone, PartialEq)]
pub struct EventListener {
    pub event: Identifier,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for EventListener {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("event")?;
        let event = Identifier::from(parser.expect_ident()?);
        let body = Block::parse(parser, None)?;
        let location = start.to(body.location);

        Ok(Self {
            event,
            body,
            location
        })
    }
}

impl Display for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event {} {}", self.event, self.body)
    }
}

// npc_action -> npc <identifier> <identifier>
#[derive(Debug, Clone, PartialEq)]
pub struct NpcAction {
    pub npc: Identifier,
    pub action: Identifier,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for NpcAction {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("npc")?;
        let npc = Identifier::from(parser.expect_ident()?);
        let action = Identifier::from(parser.expect_ident()?);
        let location = start.to(action.location);

        Ok(Self {
            npc,
            action,
            location
        })
    }
}

impl Display for NpcAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "npc {} {}", self.npc, self.action)
    }
}

// for_loop -> for <identifier> = <expression> to <expression> <block>
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub identifier: Identifier,
    pub lower: Box<Node>,
    pub upper: Box<Node>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ForLoop {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("for")?;
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_operator("=")?;
        let lower = Node::parse(parser, None)?;

        parser.expect_keyword("to")?;
        let upper = Node::parse(parser, None)?;

        let body = Block::parse(parser, None)?;
        let location = start.to(body.location);

        Ok(Self {
            identifier,
            lower: Box::new(lower),
            upper: Box::new(upper),
            body,
            location
        })
    }
}

impl Display for ForLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for {} = {} to {} {}", self.identifier, self.lower, self.upper, self.body)
    }
}

// while_loop -> while <expression> <block>
#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Box<Node>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for WhileLoop {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_keyword("while")?;
        let condition = Node::parse(parser, None)?;
        let body = Block::parse(parser, None)?;
        let location = start.to(body.location);

        Ok(Self {
            condition: Box::new(condition),
            body,
            location
        })
    }
}

impl Display for WhileLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} {}", self.condition, self.body)
    }
}

// array_literal -> "[" [ <expression> { , <expression> } ] "]"
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ArrayLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.expect_symbol("[")?;
        let mut elements = vec![];

        if !parser.current_token.is_symbol("]") {
            elements.push(Node::parse(parser, None)?);

            while parser.current_token.is_symbol(",") {
                parser.step();
                elements.push(Node::parse(parser, None)?);
            }
        }

        let end = parser.expect_symbol("]")?;

        Ok(Self {
            elements,
            location: start.to(end)
        })
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        write!(f, "[{}]", elements.join(", "))
    }
}

// array_index -> <identifier> "[" <expression> "]"
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayIndex {
    pub identifier: Identifier,
    pub index: Box<Node>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ArrayIndex {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_symbol("[")?;
        let index = Node::parse(parser, None)?;
        let end = parser.expect_symbol("]")?;

        let location = identifier.location.to(end);

        Ok(Self {
            identifier,
            index: Box::new(index),
            location
        })
    }
}

impl Display for ArrayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.identifier, self.index)
    }
}
