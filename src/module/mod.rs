//! # Module Metadata
//!
//! Header do módulo carregável do driver.

pub mod abi;

pub use abi::ModuleInfo;

use crate::drivers::simple::config::DRIVER_NAME;

/// Metadados do módulo simpledev
pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    magic: abi::MODULE_MAGIC,
    abi_version: abi::ABI_VERSION,
    name: DRIVER_NAME,
    license: "Dual BSD/GPL",
    version: abi::version(0, 1, 0),
};
