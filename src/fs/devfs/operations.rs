//! Device Operations - Cópias entre o driver e a memória do chamador
//!
//! O host entrega a read/write um descritor do buffer do chamador. Toda
//! cópia passa por `copy_to_user` / `copy_from_user`, que validam o destino
//! antes de tocar na memória e devolvem `UserFault` em vez de derrubar o
//! kernel.

use super::device::DeviceNumber;
use core::fmt;

/// Endereço limite do espaço de usuário (canonical lower half)
pub const USER_SPACE_END: usize = 0x0000_8000_0000_0000;

/// Falha ao acessar a memória do chamador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFault {
    /// Ponteiro nulo
    NullPointer,
    /// Faixa ultrapassa o fim do espaço de usuário (ou dá overflow)
    OutOfRange,
    /// O buffer é menor que a cópia pedida
    TooSmall,
}

impl UserFault {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NullPointer => "ponteiro de usuário nulo",
            Self::OutOfRange => "faixa fora do espaço de usuário",
            Self::TooSmall => "buffer de usuário menor que a cópia",
        }
    }
}

impl fmt::Display for UserFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destino de uma leitura (buffer do chamador)
pub trait UserWriter {
    /// Capacidade do destino em bytes
    fn capacity(&self) -> usize;

    /// Copia `src` para o início do destino
    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), UserFault>;
}

/// Origem de uma escrita (buffer do chamador)
pub trait UserReader {
    /// Quantidade de bytes disponíveis na origem
    fn available(&self) -> usize;

    /// Copia `dst.len()` bytes do início da origem para `dst`
    fn copy_from_user(&self, dst: &mut [u8]) -> Result<(), UserFault>;
}

// Buffers do próprio kernel: nunca faltam páginas, só tamanho.

impl UserWriter for [u8] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), UserFault> {
        let dst = self.get_mut(..src.len()).ok_or(UserFault::TooSmall)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserReader for [u8] {
    fn available(&self) -> usize {
        self.len()
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<(), UserFault> {
        let src = self.get(..dst.len()).ok_or(UserFault::TooSmall)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

/// Faixa crua de memória de usuário (`ptr`, `len`) vinda de uma syscall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSlice {
    addr: usize,
    len: usize,
}

impl UserSlice {
    /// Cria um descritor. Nenhuma validação acontece aqui.
    pub const fn new(addr: usize, len: usize) -> Self {
        Self { addr, len }
    }

    pub const fn addr(&self) -> usize {
        self.addr
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Valida que `[addr, addr + count)` é acessível
    pub fn validate(&self, count: usize) -> Result<(), UserFault> {
        if count > self.len {
            return Err(UserFault::TooSmall);
        }
        if count == 0 {
            return Ok(());
        }
        if self.addr == 0 {
            return Err(UserFault::NullPointer);
        }
        match self.addr.checked_add(count) {
            Some(end) if end <= USER_SPACE_END => Ok(()),
            _ => Err(UserFault::OutOfRange),
        }
    }
}

impl UserWriter for UserSlice {
    fn capacity(&self) -> usize {
        self.len
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), UserFault> {
        self.validate(src.len())?;
        if src.is_empty() {
            return Ok(());
        }
        // SAFETY: faixa validada acima (não nula, sem overflow, abaixo de
        // USER_SPACE_END). O host garante que a faixa pertence ao chamador.
        unsafe {
            core::ptr::copy_nonoverlapping(src.as_ptr(), self.addr as *mut u8, src.len());
        }
        Ok(())
    }
}

impl UserReader for UserSlice {
    fn available(&self) -> usize {
        self.len
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> Result<(), UserFault> {
        self.validate(dst.len())?;
        if dst.is_empty() {
            return Ok(());
        }
        // SAFETY: mesma validação de copy_to_user.
        unsafe {
            core::ptr::copy_nonoverlapping(self.addr as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }
}

/// Tabela de operações de arquivo que um driver entrega ao host
/// (o `file_operations` do dispositivo).
pub trait FileOperations {
    /// Handle opaco devolvido pelo open
    type Handle: Copy;
    /// Erro do driver
    type Error;

    /// Abre uma sessão no endpoint `dev`
    fn open(&self, dev: DeviceNumber) -> Result<Self::Handle, Self::Error>;

    /// Encerra a sessão. Idempotente.
    fn release(&self, handle: Self::Handle);

    /// Lê para o buffer do chamador
    fn read<W: UserWriter + ?Sized>(
        &self,
        handle: Self::Handle,
        dst: &mut W,
        count: usize,
    ) -> Result<usize, Self::Error>;

    /// Escreve a partir do buffer do chamador
    fn write<R: UserReader + ?Sized>(
        &self,
        handle: Self::Handle,
        src: &R,
        count: usize,
    ) -> Result<usize, Self::Error>;
}
