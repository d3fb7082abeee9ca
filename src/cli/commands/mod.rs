//! One module per subcommand, each exposing an `execute` function.

pub mod decrypt;
pub mod encrypt;
pub mod keygen;
