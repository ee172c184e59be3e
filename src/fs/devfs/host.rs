//! Host - Serviços que o ambiente oferece a um driver de caractere
//!
//! O driver não aloca números de dispositivo, não instala tabelas de
//! dispatch e não cria nós em /dev por conta própria: ele pede ao host.
//!
//! | Trait             | Equivalente                                   |
//! |-------------------|-----------------------------------------------|
//! | `RegionAllocator` | alloc_chrdev_region / unregister_chrdev_region |
//! | `DispatchTable`   | cdev_add / cdev_del                            |
//! | `NodeService`     | class_create, device_create e os inversos      |

use super::device::DeviceNumber;
use core::fmt;

/// Erros reportados pelo host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// Sem majors ou minors livres
    NoSpace,
    /// Faixa de device numbers já ocupada
    Busy,
    /// Nome (classe ou nó) já existe
    AlreadyExists,
    /// Objeto não encontrado
    NotFound,
    /// Argumento inválido (contagem zero, faixa inválida)
    InvalidArgument,
}

impl HostError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSpace => "sem device numbers livres",
            Self::Busy => "faixa de device numbers ocupada",
            Self::AlreadyExists => "nome já registrado",
            Self::NotFound => "objeto não encontrado",
            Self::InvalidArgument => "argumento inválido",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// Alocação de device numbers
pub trait RegionAllocator {
    /// Reserva `count` minors contíguos a partir de `minor_base` num major
    /// escolhido pelo host. Retorna o device number base.
    fn reserve(&mut self, minor_base: u32, count: u32, name: &str) -> HostResult<DeviceNumber>;

    /// Libera uma faixa reservada
    fn release(&mut self, base: DeviceNumber, count: u32);
}

/// Roteamento de open/close/read/write de uma faixa para o driver
pub trait DispatchTable {
    /// Instala o roteamento de `count` minors a partir de `base`
    fn install(&mut self, base: DeviceNumber, count: u32, name: &str) -> HostResult<()>;

    /// Remove o roteamento instalado em `base`
    fn remove(&mut self, base: DeviceNumber);
}

/// Serviço de nomes / visibilidade (/sys/class e /dev)
pub trait NodeService {
    /// Cria a classe de dispositivos
    fn create_class(&mut self, name: &str) -> HostResult<()>;

    /// Destrói a classe
    fn destroy_class(&mut self, name: &str);

    /// Publica um nó endereçável (/dev/<label>)
    fn publish(&mut self, class: &str, dev: DeviceNumber, label: &str) -> HostResult<()>;

    /// Remove um nó publicado
    fn unpublish(&mut self, class: &str, dev: DeviceNumber);
}

/// Tudo o que um driver de caractere precisa do host
pub trait DeviceHost: RegionAllocator + DispatchTable + NodeService {}

impl<T: RegionAllocator + DispatchTable + NodeService> DeviceHost for T {}
