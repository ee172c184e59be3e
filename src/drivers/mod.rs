//! # Driver Layer
//!
//! Drivers de dispositivo carregáveis.
//!
//! ## Drivers Implementados
//!
//! | Driver | Arquivo   | Status |
//! |--------|-----------|--------|
//! | Simple | `simple/` | Char device com buffer privado por handle |
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Chamador (open/read/write/close)     │
//! └─────────────────────────────────────────────┘
//!                      ↓
//! ┌─────────────────────────────────────────────┐
//! │   Host: DevFS (device numbers, /dev, class) │
//! └─────────────────────────────────────────────┘
//!                      ↓ dispatch
//! ┌─────────────────────────────────────────────┐
//! │   SimpleDriver: handles → Buffer Stores     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod simple;
