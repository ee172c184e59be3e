//! DevFS - Device Filesystem
//!
//! Lado do host dos dispositivos de caractere (/dev).
//!
//! # Módulos
//!
//! - `device` - DeviceNumber, DeviceNode e tipos base
//! - `host` - Traits dos serviços que o host oferece aos drivers
//! - `registry` - Registro em memória que implementa esses serviços
//! - `operations` - Cópias validadas de/para a memória do chamador

pub mod device;
pub mod host;
pub mod operations;
pub mod registry;

// Re-exports públicos
pub use device::{DeviceNode, DeviceNumber, DeviceType};
pub use host::{DeviceHost, DispatchTable, HostError, HostResult, NodeService, RegionAllocator};
pub use operations::{FileOperations, UserFault, UserReader, UserSlice, UserWriter};
pub use registry::DeviceRegistry;
