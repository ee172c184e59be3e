//! Testes para o driver Simple
//!
//! # Como Executar
//!
//! ```bash
//! cargo test --lib drivers::simple::tests
//! cargo test --lib drivers::simple::tests::transfer
//! ```
//!
//! # Estrutura
//!
//! - `buffer.rs` - Buffer Store e pool
//! - `transfer.rs` - read/write limitados
//! - `handle.rs` - Tabela de handles
//! - `registration.rs` - register_all / unregister_all e unwind
//! - `integration.rs` - Cenários ponta a ponta
//!
//! # Convenções
//!
//! - Prefixo `test_` para testes unitários
//! - Prefixo `integration_` para testes de integração

#![cfg(test)]


use crate::core::logging::{self, LogLevel, LogSink};
use crate::drivers::simple::{DriverConfig, SimpleDriver};
use crate::fs::devfs::{
    DeviceNumber, DeviceRegistry, DispatchTable, HostError, HostResult, NodeService,
    RegionAllocator,
};
use alloc::string::String;
use alloc::vec::Vec;
use spin::Mutex;

/// Host com falhas programáveis. Delega ao `DeviceRegistry` e anota cada
/// chamada em `calls`.
pub struct ScriptedHost {
    pub registry: DeviceRegistry,
    pub fail_reserve: bool,
    pub fail_install: bool,
    pub fail_class: bool,
    pub fail_publish_minor: Option<u32>,
    pub calls: Vec<&'static str>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            registry: DeviceRegistry::new(),
            fail_reserve: false,
            fail_install: false,
            fail_class: false,
            fail_publish_minor: None,
            calls: Vec::new(),
        }
    }
}

impl RegionAllocator for ScriptedHost {
    fn reserve(&mut self, minor_base: u32, count: u32, name: &str) -> HostResult<DeviceNumber> {
        self.calls.push("reserve");
        if self.fail_reserve {
            return Err(HostError::NoSpace);
        }
        self.registry.reserve(minor_base, count, name)
    }

    fn release(&mut self, base: DeviceNumber, count: u32) {
        self.calls.push("release");
        self.registry.release(base, count);
    }
}

impl DispatchTable for ScriptedHost {
    fn install(&mut self, base: DeviceNumber, count: u32, name: &str) -> HostResult<()> {
        self.calls.push("install");
        if self.fail_install {
            return Err(HostError::Busy);
        }
        self.registry.install(base, count, name)
    }

    fn remove(&mut self, base: DeviceNumber) {
        self.calls.push("remove");
        self.registry.remove(base);
    }
}

impl NodeService for ScriptedHost {
    fn create_class(&mut self, name: &str) -> HostResult<()> {
        self.calls.push("create_class");
        if self.fail_class {
            return Err(HostError::AlreadyExists);
        }
        self.registry.create_class(name)
    }

    fn destroy_class(&mut self, name: &str) {
        self.calls.push("destroy_class");
        self.registry.destroy_class(name);
    }

    fn publish(&mut self, class: &str, dev: DeviceNumber, label: &str) -> HostResult<()> {
        self.calls.push("publish");
        if self.fail_publish_minor == Some(dev.minor) {
            return Err(HostError::NotFound);
        }
        self.registry.publish(class, dev, label)
    }

    fn unpublish(&mut self, class: &str, dev: DeviceNumber) {
        self.calls.push("unpublish");
        self.registry.unpublish(class, dev);
    }
}

/// Sink que guarda as mensagens emitidas (compartilhado entre testes)
pub struct CaptureSink {
    events: Mutex<Vec<(LogLevel, String)>>,
}

impl CaptureSink {
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|(lvl, msg)| *lvl == level && msg.contains(needle))
    }
}

impl LogSink for CaptureSink {
    fn emit(&self, level: LogLevel, message: &str, _value: Option<u64>) {
        self.events.lock().push((level, String::from(message)));
    }
}

pub static CAPTURE: CaptureSink = CaptureSink {
    events: Mutex::new(Vec::new()),
};

/// Instala o sink de captura (só a primeira chamada do processo instala)
pub fn install_capture() -> &'static CaptureSink {
    logging::set_sink(&CAPTURE);
    &CAPTURE
}

/// Helper: driver padrão já registrado num DeviceRegistry
pub fn registered_driver() -> (DeviceRegistry, SimpleDriver) {
    install_capture();
    let mut registry = DeviceRegistry::new();
    let driver = SimpleDriver::init(DriverConfig::default(), &mut registry)
        .expect("registro padrão deve funcionar");
    (registry, driver)
}

/// Helper: driver registrado com pool de `slots` buffers
pub fn driver_with_pool(slots: usize) -> (DeviceRegistry, SimpleDriver) {
    let mut registry = DeviceRegistry::new();
    let config = DriverConfig::default().with_pool_slots(slots);
    let driver = SimpleDriver::init(config, &mut registry).expect("registro deve funcionar");
    (registry, driver)
}
