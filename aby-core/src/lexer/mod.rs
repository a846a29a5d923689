pub mod warning;
pub mod token;
pub mod lexer;

pub mod prelude {
	pub use super::{
		warning::*,
		token::*,
		lexer::*
	};
}
