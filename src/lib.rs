//! compgen — compiles `.comp` component schemas into generated C++ headers.

pub mod codegen;
pub mod config;
pub mod driver;
pub mod dsl;
pub mod error;

pub use error::Error;
