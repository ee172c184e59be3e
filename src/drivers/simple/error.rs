//! Tipos de Erro do Driver Simple
//!
//! Todo erro volta para quem chamou a operação. Nenhuma operação tenta de
//! novo: cada falha é terminal para aquela chamada.

use crate::fs::devfs::{HostError, UserFault};
use crate::sys::Errno;

/// Erros do driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Pool de buffers esgotado no open
    OutOfMemory,
    /// Buffer do chamador inválido numa cópia
    Fault,
    /// Handle fechado ou desconhecido
    InvalidHandle,
    /// write maior que a capacidade do Buffer Store
    InvalidLength,
    /// Host recusou a reserva de device numbers
    RegistrationFailed,
    /// Host recusou a instalação do dispatch
    DispatchFailed,
    /// Host recusou a criação da classe
    PublishFailed,
    /// Device number fora dos endpoints registrados (ou driver não registrado)
    NoDevice,
    /// register_all num driver já registrado
    AlreadyRegistered,
    /// Tabela de handles cheia
    HandleTableFull,
    /// DriverConfig inválida
    InvalidConfig,
}

impl DriverError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfMemory => "OOM: pool de buffers esgotado",
            Self::Fault => "Falha ao copiar de/para o buffer do chamador",
            Self::InvalidHandle => "Handle inválido ou já fechado",
            Self::InvalidLength => "Tamanho excede a capacidade do buffer",
            Self::RegistrationFailed => "Falha ao reservar device numbers",
            Self::DispatchFailed => "Falha ao instalar dispatch",
            Self::PublishFailed => "Falha ao criar classe de dispositivo",
            Self::NoDevice => "Dispositivo inexistente",
            Self::AlreadyRegistered => "Driver já registrado",
            Self::HandleTableFull => "Tabela de handles cheia",
            Self::InvalidConfig => "Configuração inválida",
        }
    }

    /// Código POSIX devolvido ao host
    pub fn errno(&self) -> Errno {
        match self {
            Self::OutOfMemory => Errno::ENOMEM,
            Self::Fault => Errno::EFAULT,
            Self::InvalidHandle => Errno::EBADF,
            Self::InvalidLength => Errno::EINVAL,
            Self::RegistrationFailed => Errno::EBUSY,
            Self::DispatchFailed => Errno::EIO,
            Self::PublishFailed => Errno::ENOENT,
            Self::NoDevice => Errno::ENODEV,
            Self::AlreadyRegistered => Errno::EEXIST,
            Self::HandleTableFull => Errno::ENFILE,
            Self::InvalidConfig => Errno::EINVAL,
        }
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<UserFault> for DriverError {
    fn from(_: UserFault) -> Self {
        Self::Fault
    }
}

/// Tipo Result específico do driver
pub type DevResult<T> = Result<T, DriverError>;

/// Converte um resultado de contagem em `ssize_t` (negativo = -errno)
pub fn result_to_isize(result: DevResult<usize>) -> isize {
    match result {
        Ok(count) => count as isize,
        Err(e) => e.errno().as_isize(),
    }
}

/// Mapeia falha de host durante o registro para o erro do estágio
pub(crate) fn stage_error(stage: DriverError, cause: HostError) -> DriverError {
    crate::kerror!(cause.as_str());
    stage
}
