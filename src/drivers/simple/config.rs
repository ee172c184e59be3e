//! # Configuração do Driver Simple
//!
//! Constantes e parâmetros de runtime do driver.

use super::error::{DevResult, DriverError};

// =============================================================================
// IDENTIFICAÇÃO
// =============================================================================

/// Nome do driver (aparece nas faixas reservadas do host)
pub const DRIVER_NAME: &str = "SIMPLE_DEVICE_NAME";

/// Nome da classe (/sys/class/device)
pub const CLASS_NAME: &str = "device";

/// Prefixo dos nós publicados (/dev/device0, /dev/device1)
pub const NODE_PREFIX: &str = "device";

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Primeiro minor
pub const MINOR_BASE: u32 = 0;

/// Quantidade de minors (endpoints)
pub const MINOR_NUM: u32 = 2;

// =============================================================================
// BUFFER
// =============================================================================

/// Capacidade de cada Buffer Store (bytes)
pub const BUFFER_CAPACITY: usize = 256;

/// Conteúdo inicial de um Buffer Store recém aberto.
///
/// Os bytes após a semente são zero. Um `strlcat(buffer, "dummy", 5)` em C
/// guardaria só `dumm\0`; aqui os cinco bytes são gravados.
pub const SEED: &[u8] = b"dummy";

/// Quantos Buffer Stores o pool padrão comporta
pub const DEFAULT_POOL_SLOTS: usize = 64;

/// Máximo de handles abertos ao mesmo tempo.
///
/// Maior que `DEFAULT_POOL_SLOTS`: com a configuração padrão o pool esgota
/// (`OutOfMemory`) antes da tabela encher (`HandleTableFull`).
pub const DEFAULT_MAX_HANDLES: usize = 128;

/// Limite de `pool_slots` (a região do pool é alocada inteira no `new`)
pub const MAX_POOL_SLOTS: usize = HANDLE_INDEX_LIMIT;

/// Limite do índice de slot (16 bits do FileHandle)
pub const HANDLE_INDEX_LIMIT: usize = 0xFFFF;

// =============================================================================
// CONFIGURAÇÃO DE RUNTIME
// =============================================================================

/// Parâmetros do driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Primeiro minor pedido ao host
    pub minor_base: u32,
    /// Número de endpoints
    pub minor_count: u32,
    /// Capacidade do pool de buffers (em Buffer Stores)
    pub pool_slots: usize,
    /// Máximo de handles abertos
    pub max_handles: usize,
}

impl DriverConfig {
    /// Configuração padrão (2 endpoints, minor 0)
    pub const fn new() -> Self {
        Self {
            minor_base: MINOR_BASE,
            minor_count: MINOR_NUM,
            pool_slots: DEFAULT_POOL_SLOTS,
            max_handles: DEFAULT_MAX_HANDLES,
        }
    }

    pub const fn with_minors(mut self, base: u32, count: u32) -> Self {
        self.minor_base = base;
        self.minor_count = count;
        self
    }

    pub const fn with_pool_slots(mut self, slots: usize) -> Self {
        self.pool_slots = slots;
        self
    }

    pub const fn with_max_handles(mut self, max: usize) -> Self {
        self.max_handles = max;
        self
    }

    /// Rejeita contagens zero, pools grandes demais e limites fora do
    /// formato de handle
    pub fn validate(&self) -> DevResult<()> {
        if self.minor_count == 0 || self.pool_slots == 0 || self.max_handles == 0 {
            return Err(DriverError::InvalidConfig);
        }
        if self.max_handles > HANDLE_INDEX_LIMIT || self.pool_slots > MAX_POOL_SLOTS {
            return Err(DriverError::InvalidConfig);
        }
        if self.minor_base.checked_add(self.minor_count).is_none() {
            return Err(DriverError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
