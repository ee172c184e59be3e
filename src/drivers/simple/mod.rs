//! # Simple Character Device Driver
//!
//! Expõe `minor_count` endpoints sob um único major. Cada `open` recebe um
//! Buffer Store privado de 256 bytes; `read`/`write` operam sobre ele a
//! partir do offset 0.
//!
//! ## Componentes
//!
//! | Módulo     | Responsabilidade                                   |
//! |------------|----------------------------------------------------|
//! | `buffer`   | Buffer Store e pool privado de buffers             |
//! | `handle`   | Tabela de handles (open/close)                     |
//! | `transfer` | read/write limitados                               |
//! | `config`   | Constantes e `DriverConfig`                        |
//! | `error`    | `DriverError` e conversão para errno               |
//!
//! ## Ciclo de vida
//!
//! ```text
//! Unregistered → Registering → Registered → Unregistering → Unregistered
//! ```
//!
//! `register_all` e `unregister_all` recebem `&mut self`: o empréstimo
//! exclusivo garante que nenhum open/close/read/write está em andamento
//! durante o startup e o shutdown. As operações de I/O recebem `&self` e
//! podem rodar em paralelo.
//!
//! Qualquer falha em `register_all` desfaz, em ordem reversa, o que já foi
//! feito e deixa o driver em `Unregistered`.

pub mod buffer;
pub mod config;
pub mod error;
pub mod handle;
pub mod transfer;

#[cfg(feature = "self_test")]
pub mod test;

#[cfg(test)]
mod tests;

pub use buffer::{BufferPool, BufferStore};
pub use config::DriverConfig;
pub use error::{result_to_isize, DevResult, DriverError};
pub use handle::FileHandle;

use crate::fs::devfs::device::{format_label, NODE_NAME_MAX};
use crate::fs::devfs::{DeviceHost, DeviceNumber, FileOperations, UserReader, UserWriter};
use alloc::vec::Vec;
use bitflags::bitflags;
use buffer::SharedPool;
use config::{CLASS_NAME, DRIVER_NAME, NODE_PREFIX};
use error::stage_error;
use handle::HandleTable;
use spin::Mutex;

/// Estado do registro de endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Unregistered,
    Registering,
    Registered,
    Unregistering,
}

bitflags! {
    /// Passos do registro já concluídos (desfeitos em ordem reversa)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Stages: u8 {
        /// Faixa de device numbers reservada
        const REGION   = 1 << 0;
        /// Dispatch instalado
        const DISPATCH = 1 << 1;
        /// Classe criada
        const CLASS    = 1 << 2;
    }
}

/// O driver: registro de endpoints + tabela de handles + pool de buffers
pub struct SimpleDriver {
    config: DriverConfig,
    state: RegistryState,
    stages: Stages,
    base: Option<DeviceNumber>,
    /// Nós publicados, em ordem de publicação
    published: Vec<DeviceNumber>,
    handles: Mutex<HandleTable>,
    pool: SharedPool,
}

impl SimpleDriver {
    /// Cria o driver em `Unregistered`
    pub fn new(config: DriverConfig) -> DevResult<Self> {
        config.validate()?;
        let pool = buffer::shared_pool(config.pool_slots)?;
        Ok(Self {
            config,
            state: RegistryState::Unregistered,
            stages: Stages::empty(),
            base: None,
            published: Vec::new(),
            handles: Mutex::new(HandleTable::with_capacity(config.max_handles)),
            pool,
        })
    }

    /// Cria e registra (equivalente a module_init)
    pub fn init<H: DeviceHost + ?Sized>(config: DriverConfig, host: &mut H) -> DevResult<Self> {
        let mut driver = Self::new(config)?;
        driver.register_all(host)?;
        Ok(driver)
    }

    // =========================================================================
    // REGISTRO
    // =========================================================================

    /// Reserva os device numbers, instala o dispatch e publica um nó por
    /// endpoint.
    pub fn register_all<H: DeviceHost + ?Sized>(&mut self, host: &mut H) -> DevResult<()> {
        if self.state != RegistryState::Unregistered {
            crate::kwarn!("(SIMPLE) register_all: driver já registrado");
            return Err(DriverError::AlreadyRegistered);
        }
        crate::kinfo!("(SIMPLE) Registrando endpoints: count=", self.config.minor_count);
        self.state = RegistryState::Registering;

        // 1. Reserva da faixa
        let reserved = host.reserve(self.config.minor_base, self.config.minor_count, DRIVER_NAME);
        let base = match reserved {
            Ok(base) => base,
            Err(e) => {
                crate::kerror!("(SIMPLE) reserve falhou");
                self.state = RegistryState::Unregistered;
                return Err(stage_error(DriverError::RegistrationFailed, e));
            }
        };
        self.base = Some(base);
        self.stages.insert(Stages::REGION);
        crate::kdebug!("(SIMPLE) major=", base.major);

        // 2. Dispatch
        if let Err(e) = host.install(base, self.config.minor_count, DRIVER_NAME) {
            crate::kerror!("(SIMPLE) install de dispatch falhou");
            self.unwind(host);
            return Err(stage_error(DriverError::DispatchFailed, e));
        }
        self.stages.insert(Stages::DISPATCH);

        // 3. Classe
        if let Err(e) = host.create_class(CLASS_NAME) {
            crate::kerror!("(SIMPLE) create_class falhou");
            self.unwind(host);
            return Err(stage_error(DriverError::PublishFailed, e));
        }
        self.stages.insert(Stages::CLASS);

        // 4. Nós. Falha num nó não derruba o registro.
        let mut label = [0u8; NODE_NAME_MAX];
        for offset in 0..self.config.minor_count {
            let dev = base.offset(offset);
            let len = format_label(NODE_PREFIX, dev.minor, &mut label);
            let name = core::str::from_utf8(&label[..len]).unwrap_or(NODE_PREFIX);
            match host.publish(CLASS_NAME, dev, name) {
                Ok(()) => self.published.push(dev),
                Err(_) => crate::kwarn!("(SIMPLE) publish falhou: minor=", dev.minor),
            }
        }

        self.state = RegistryState::Registered;
        crate::kok!("(SIMPLE) Endpoints registrados");
        Ok(())
    }

    /// Remove os nós, o dispatch e libera a faixa. Chamar num driver não
    /// registrado não faz nada.
    ///
    /// Handles ainda abertos são fechados à força.
    pub fn unregister_all<H: DeviceHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == RegistryState::Unregistered {
            return;
        }
        crate::kinfo!("(SIMPLE) Removendo endpoints");
        self.state = RegistryState::Unregistering;

        let forced = self.handles.lock().close_all();
        if forced > 0 {
            crate::kwarn!("(SIMPLE) handles fechados à força=", forced);
        }

        self.unwind(host);
        crate::kok!("(SIMPLE) Endpoints removidos");
    }

    /// Desfaz o que foi feito, em ordem reversa, e volta a `Unregistered`
    fn unwind<H: DeviceHost + ?Sized>(&mut self, host: &mut H) {
        while let Some(dev) = self.published.pop() {
            host.unpublish(CLASS_NAME, dev);
        }
        if let Some(base) = self.base {
            if self.stages.contains(Stages::CLASS) {
                host.destroy_class(CLASS_NAME);
            }
            if self.stages.contains(Stages::DISPATCH) {
                host.remove(base);
            }
            if self.stages.contains(Stages::REGION) {
                host.release(base, self.config.minor_count);
            }
        }
        self.stages = Stages::empty();
        self.base = None;
        self.state = RegistryState::Unregistered;
    }

    // =========================================================================
    // CONSULTAS
    // =========================================================================

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn stages(&self) -> Stages {
        self.stages
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Device number do primeiro endpoint (se registrado)
    pub fn base(&self) -> Option<DeviceNumber> {
        self.base
    }

    /// Device number do endpoint `index` (0..minor_count)
    pub fn endpoint(&self, index: u32) -> Option<DeviceNumber> {
        let base = self.base?;
        (index < self.config.minor_count).then(|| base.offset(index))
    }

    /// Todos os endpoints registrados
    pub fn endpoints(&self) -> impl Iterator<Item = DeviceNumber> + '_ {
        (0..self.config.minor_count).filter_map(move |index| self.endpoint(index))
    }

    /// Nós efetivamente publicados
    pub fn published(&self) -> &[DeviceNumber] {
        &self.published
    }

    /// Handles abertos
    pub fn open_handles(&self) -> usize {
        self.handles.lock().open_count()
    }

    /// Buffer Stores vivos no pool
    pub fn pool_in_use(&self) -> usize {
        self.pool.lock().in_use()
    }

    /// Endpoint dono de um handle
    pub fn endpoint_of(&self, handle: FileHandle) -> DevResult<DeviceNumber> {
        let minor = self.handles.lock().minor_of(handle)?;
        let base = self.base.ok_or(DriverError::InvalidHandle)?;
        Ok(DeviceNumber::new(base.major, minor))
    }

    /// Valida que `dev` é um dos endpoints registrados
    fn resolve(&self, dev: DeviceNumber) -> DevResult<u32> {
        if self.state != RegistryState::Registered {
            return Err(DriverError::NoDevice);
        }
        let base = self.base.ok_or(DriverError::NoDevice)?;
        let in_range = dev.minor >= base.minor && dev.minor - base.minor < self.config.minor_count;
        if dev.major != base.major || !in_range {
            return Err(DriverError::NoDevice);
        }
        Ok(dev.minor)
    }

    // =========================================================================
    // OPERAÇÕES DE ARQUIVO
    // =========================================================================

    /// Abre um handle novo no endpoint `dev`
    pub fn open(&self, dev: DeviceNumber) -> DevResult<FileHandle> {
        crate::ktrace!("(SIMPLE) device_open: minor=", dev.minor);
        let minor = self.resolve(dev)?;
        match self.handles.lock().open(minor, &self.pool) {
            Ok(handle) => {
                crate::ktrace!("(SIMPLE) device_open: handle=", handle.as_u32());
                Ok(handle)
            }
            Err(e) => {
                crate::kerror!(e.as_str());
                Err(e)
            }
        }
    }

    /// Fecha um handle. Fechar de novo (ou o handle nulo) não faz nada.
    pub fn close(&self, handle: FileHandle) {
        crate::ktrace!("(SIMPLE) device_close: handle=", handle.as_u32());
        let released = self.handles.lock().close(handle);
        // O store volta ao pool fora do lock da tabela
        drop(released);
    }

    /// Lê até `min(count, 256)` bytes do início do buffer do handle
    pub fn read<W: UserWriter + ?Sized>(
        &self,
        handle: FileHandle,
        dst: &mut W,
        count: usize,
    ) -> DevResult<usize> {
        crate::ktrace!("(SIMPLE) device_read: count=", count);
        let store = self.handles.lock().get(handle)?;
        let guard = store.lock();
        transfer::read(&guard, dst, count)
    }

    /// Escreve `count` bytes no início do buffer do handle
    pub fn write<R: UserReader + ?Sized>(
        &self,
        handle: FileHandle,
        src: &R,
        count: usize,
    ) -> DevResult<usize> {
        crate::ktrace!("(SIMPLE) device_write: count=", count);
        let store = self.handles.lock().get(handle)?;
        let mut guard = store.lock();
        transfer::write(&mut guard, src, count)
    }
}

impl FileOperations for SimpleDriver {
    type Handle = FileHandle;
    type Error = DriverError;

    fn open(&self, dev: DeviceNumber) -> DevResult<FileHandle> {
        SimpleDriver::open(self, dev)
    }

    fn release(&self, handle: FileHandle) {
        self.close(handle)
    }

    fn read<W: UserWriter + ?Sized>(
        &self,
        handle: FileHandle,
        dst: &mut W,
        count: usize,
    ) -> DevResult<usize> {
        SimpleDriver::read(self, handle, dst, count)
    }

    fn write<R: UserReader + ?Sized>(
        &self,
        handle: FileHandle,
        src: &R,
        count: usize,
    ) -> DevResult<usize> {
        SimpleDriver::write(self, handle, src, count)
    }
}

// =============================================================================
// FRONTEIRA DE DISPATCH (ssize_t)
// =============================================================================

/// read no formato da syscall: bytes lidos ou `-errno`
pub fn device_read<W: UserWriter + ?Sized>(
    driver: &SimpleDriver,
    handle: FileHandle,
    dst: &mut W,
    count: usize,
) -> isize {
    result_to_isize(driver.read(handle, dst, count))
}

/// write no formato da syscall: bytes escritos ou `-errno`
pub fn device_write<R: UserReader + ?Sized>(
    driver: &SimpleDriver,
    handle: FileHandle,
    src: &R,
    count: usize,
) -> isize {
    result_to_isize(driver.write(handle, src, count))
}

/// open no formato da syscall: handle ou `-errno`
pub fn device_open(driver: &SimpleDriver, dev: DeviceNumber) -> isize {
    match driver.open(dev) {
        Ok(handle) => handle.as_u32() as isize,
        Err(e) => e.errno().as_isize(),
    }
}
