//! ABI estável para módulos

/// Versão da ABI
pub const ABI_VERSION: u32 = 1;

/// Magic number para validação
pub const MODULE_MAGIC: u32 = 0x4D4F4452; // "MODR"

/// Informações do módulo (header no binário)
#[derive(Debug, Clone, Copy)]
pub struct ModuleInfo {
    /// Magic number
    pub magic: u32,
    /// Versão da ABI
    pub abi_version: u32,
    /// Nome do módulo
    pub name: &'static str,
    /// Licença declarada
    pub license: &'static str,
    /// Versão do módulo (major << 16 | minor << 8 | patch)
    pub version: u32,
}

impl ModuleInfo {
    /// Verifica se é válido
    pub fn is_valid(&self) -> bool {
        self.magic == MODULE_MAGIC && self.abi_version == ABI_VERSION && !self.name.is_empty()
    }
}

/// Codifica uma versão semântica
pub const fn version(major: u8, minor: u8, patch: u8) -> u32 {
    (major as u32) << 16 | (minor as u32) << 8 | patch as u32
}
