//! Core Module
//!
//! Infraestrutura comum do driver, independente do host: logging
//! e o sink de diagnóstico.

pub mod logging;
