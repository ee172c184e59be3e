//! # Handle Table
//!
//! Ciclo de vida dos handles: `open` cria um Buffer Store e amarra a um
//! handle novo; `close` solta o store e invalida o handle.
//!
//! Cada slot guarda o minor dono e um `Arc<Mutex<BufferStore>>`. O Mutex
//! por handle serializa operações concorrentes no mesmo handle; handles
//! diferentes nunca disputam o mesmo lock.
//!
//! Um slot reaproveitado ganha uma generation nova, então um handle antigo
//! nunca enxerga o buffer de outro.

use super::buffer::{BufferStore, SharedPool};
use super::error::{DevResult, DriverError};
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

/// Handle é índice + generation
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(u32);

impl FileHandle {
    /// Handle nulo
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn new(index: u16, generation: u16) -> Self {
        Self((generation as u32) << 16 | index as u32)
    }

    pub const fn index(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    pub const fn generation(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }
}

/// Store de um handle, com o lock próprio
pub type StoreRef = Arc<Mutex<BufferStore>>;

// Entrada na tabela
struct HandleEntry {
    minor: u32,
    store: Option<StoreRef>,
    generation: u16,
}

impl HandleEntry {
    const fn empty() -> Self {
        Self {
            minor: 0,
            store: None,
            generation: 0,
        }
    }

    fn in_use(&self) -> bool {
        self.store.is_some()
    }
}

/// Tabela de handles do driver
pub struct HandleTable {
    entries: Vec<HandleEntry>,
    capacity: usize,
    open: usize,
}

impl HandleTable {
    /// Cria tabela com até `capacity` handles simultâneos
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            open: 0,
        }
    }

    /// Handles abertos
    pub fn open_count(&self) -> usize {
        self.open
    }

    /// Aloca um Buffer Store e amarra a um handle novo.
    ///
    /// Em caso de erro nada fica alocado.
    pub fn open(&mut self, minor: u32, pool: &SharedPool) -> DevResult<FileHandle> {
        let slot = self.free_slot()?;
        let store = BufferStore::allocate(pool)?;

        if slot == self.entries.len() {
            self.entries.push(HandleEntry::empty());
        }
        let entry = &mut self.entries[slot];
        entry.generation = entry.generation.wrapping_add(1);
        // Generation 0xFFFF + índice 0xFFFF seria o INVALID
        if FileHandle::new(slot as u16, entry.generation) == FileHandle::INVALID {
            entry.generation = entry.generation.wrapping_add(1);
        }
        entry.minor = minor;
        entry.store = Some(Arc::new(Mutex::new(store)));
        self.open += 1;

        Ok(FileHandle::new(slot as u16, entry.generation))
    }

    /// Obtém o store de um handle (validando generation)
    pub fn get(&self, handle: FileHandle) -> DevResult<StoreRef> {
        self.entry(handle)
            .and_then(|entry| entry.store.clone())
            .ok_or(DriverError::InvalidHandle)
    }

    /// Minor dono do handle
    pub fn minor_of(&self, handle: FileHandle) -> DevResult<u32> {
        self.entry(handle)
            .map(|entry| entry.minor)
            .ok_or(DriverError::InvalidHandle)
    }

    /// Fecha handle. Handle nulo, fechado ou desconhecido: nada acontece.
    ///
    /// Retorna o store solto; ele volta ao pool quando a última referência
    /// (uma operação em andamento, no máximo) terminar.
    pub fn close(&mut self, handle: FileHandle) -> Option<StoreRef> {
        if !handle.is_valid() {
            return None;
        }
        let idx = handle.index() as usize;
        let entry = self.entries.get_mut(idx)?;
        if entry.generation != handle.generation() {
            return None;
        }
        let store = entry.store.take()?;
        self.open -= 1;
        Some(store)
    }

    /// Fecha todos os handles. Retorna quantos estavam abertos.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for entry in self.entries.iter_mut() {
            if entry.store.take().is_some() {
                closed += 1;
            }
        }
        self.open = 0;
        closed
    }

    fn entry(&self, handle: FileHandle) -> Option<&HandleEntry> {
        if !handle.is_valid() {
            return None;
        }
        let entry = self.entries.get(handle.index() as usize)?;
        if !entry.in_use() || entry.generation != handle.generation() {
            return None;
        }
        Some(entry)
    }

    fn free_slot(&self) -> DevResult<usize> {
        if self.open >= self.capacity {
            return Err(DriverError::HandleTableFull);
        }
        Ok(self
            .entries
            .iter()
            .position(|entry| !entry.in_use())
            .unwrap_or(self.entries.len()))
    }
}
