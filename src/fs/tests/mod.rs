//! Testes para o lado de dispositivos do Filesystem
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Executar todos os testes de filesystem
//! cargo test --lib fs::tests
//!
//! # Executar testes de um módulo específico
//! cargo test --lib fs::tests::devfs
//! cargo test --lib fs::tests::registry
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `devfs.rs` - DeviceNumber, DeviceNode, labels
//! - `registry.rs` - DeviceRegistry (faixas, dispatch, classes, nós)
//! - `operations.rs` - Cópias validadas de/para o chamador
//!
//! # Convenções
//!
//! - Prefixo `test_` para testes unitários

#![cfg(test)]

pub mod operations;
pub mod registry;

use crate::fs::devfs::DeviceRegistry;

/// Helper: Cria um registro vazio para testes
pub fn create_test_registry() -> DeviceRegistry {
    DeviceRegistry::new()
}
