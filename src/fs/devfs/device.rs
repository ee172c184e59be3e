//! Device - Tipos base para dispositivos

use core::fmt;

/// Tipo de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// Dispositivo de caractere (char device)
    Character,
    /// Dispositivo de bloco (block device)
    Block,
}

/// Número major/minor de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceNumber {
    /// Major number (identifica o driver)
    pub major: u32,
    /// Minor number (identifica o endpoint específico)
    pub minor: u32,
}

impl DeviceNumber {
    /// Maior minor representável no formato de 20 bits
    pub const MINOR_MASK: u32 = 0xFFFFF;

    /// Cria um novo device number
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Converte para u64 (formato Linux: major << 20 | minor)
    pub const fn as_u64(&self) -> u64 {
        ((self.major as u64) << 20) | (self.minor as u64)
    }

    /// Cria a partir de u64
    pub const fn from_u64(dev: u64) -> Self {
        Self {
            major: (dev >> 20) as u32,
            minor: (dev & Self::MINOR_MASK as u64) as u32,
        }
    }

    /// Device number `offset` minors adiante, no mesmo major
    pub const fn offset(&self, offset: u32) -> Self {
        Self::new(self.major, self.minor + offset)
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

/// Tamanho máximo do nome de um nó (/dev/<label>)
pub const NODE_NAME_MAX: usize = 32;

/// Nó de dispositivo publicado pelo serviço de nomes
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceNode {
    name: [u8; NODE_NAME_MAX],
    name_len: usize,
    /// Tipo de dispositivo
    pub device_type: DeviceType,
    /// Device number
    pub dev: DeviceNumber,
    /// Permissões (Unix mode)
    pub mode: u16,
}

impl DeviceNode {
    /// Cria um novo nó de caractere. Nomes longos são truncados.
    pub fn new(label: &str, dev: DeviceNumber) -> Self {
        let mut name = [0u8; NODE_NAME_MAX];
        let mut name_len = label.len().min(NODE_NAME_MAX);
        // Não cortar no meio de um caractere UTF-8
        while !label.is_char_boundary(name_len) {
            name_len -= 1;
        }
        name[..name_len].copy_from_slice(&label.as_bytes()[..name_len]);
        Self {
            name,
            name_len,
            device_type: DeviceType::Character,
            dev,
            mode: 0o666, // rw-rw-rw- por padrão
        }
    }

    /// Cria um nó com permissões customizadas
    pub const fn with_mode(mut self, mode: u16) -> Self {
        self.mode = mode;
        self
    }

    /// Nome do nó (sem o prefixo /dev/)
    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or("")
    }
}

impl fmt::Debug for DeviceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceNode")
            .field("name", &self.name())
            .field("type", &self.device_type)
            .field("major", &self.dev.major)
            .field("minor", &self.dev.minor)
            .field("mode", &format_args!("{:o}", self.mode))
            .finish()
    }
}

/// Formata o label de um endpoint ("device0", "device1", ...) num buffer fixo.
///
/// Retorna o número de bytes escritos.
pub fn format_label(prefix: &str, index: u32, out: &mut [u8; NODE_NAME_MAX]) -> usize {
    let mut len = prefix.len().min(NODE_NAME_MAX);
    out[..len].copy_from_slice(&prefix.as_bytes()[..len]);

    let mut digits = [0u8; 10];
    let mut n = index;
    let mut count = 0;
    loop {
        digits[count] = b'0' + (n % 10) as u8;
        count += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    while count > 0 && len < NODE_NAME_MAX {
        count -= 1;
        out[len] = digits[count];
        len += 1;
    }
    len
}
