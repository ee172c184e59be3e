//! Definições de sistema compartilhadas com o host (ABI de erros).

pub mod error;

pub use error::Errno;
