pub mod error;
pub mod interpreter;
pub mod io;

pub mod prelude {
    pub use super::{
        error::*,
        interpreter::*,
        io::*
    };
}

#[cfg(test)]
mod tests;
