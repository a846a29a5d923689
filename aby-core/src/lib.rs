pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod runner;
pub mod utils;
