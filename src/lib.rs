//! Simpledev - Driver de dispositivo de caractere simples.
//!
//! Expõe dois endpoints (/dev/device0 e /dev/device1). Cada `open` recebe um
//! buffer privado de 256 bytes; `read`/`write` operam sempre no offset 0.
//!
//! O crate é `no_std` + `alloc`: o kernel fornece o alocador global e o
//! sink de log. Nos testes do host a std é ligada normalmente.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging e sink de diagnóstico
pub mod klib; // Utilitários internos e framework de self-test
pub mod sys; // ABI de erros (errno)

// --- Host ---
pub mod fs; // DevFS: device numbers, classes, nós, cópias de usuário

// --- Driver ---
pub mod drivers; // SimpleDriver
pub mod module; // Metadados do módulo

pub use crate::drivers::simple::{DriverConfig, DriverError, FileHandle, SimpleDriver};
pub use crate::module::MODULE_INFO;
