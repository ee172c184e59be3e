//! # Buffer Store
//!
//! Armazenamento privado de um handle: exatamente `BUFFER_CAPACITY` bytes.
//!
//! Os Buffer Stores saem de um pool do próprio driver (um `Heap` de lista
//! encadeada sobre uma região fixa). O pool tem capacidade para
//! `pool_slots` buffers; quando não há espaço, `open` falha com
//! `OutOfMemory` em vez de tocar no heap global do kernel.
//!
//! Um `BufferStore` devolve sua memória ao pool no `Drop`, então fechar o
//! handle (ou derrubar o driver) nunca vaza buffer. `BufferPool::in_use`
//! torna isso observável.

use super::config::{BUFFER_CAPACITY, MAX_POOL_SLOTS, SEED};
use super::error::{DevResult, DriverError};
use crate::klib::align_up;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::ptr::NonNull;
use linked_list_allocator::Heap;
use spin::Mutex;

/// Layout de um Buffer Store dentro do pool (alinhado a 8)
const STORE_LAYOUT: Layout = Layout::new::<[u64; BUFFER_CAPACITY / 8]>();

/// Folga da região para metadados do alocador. Menor que um buffer,
/// então não cabe um buffer extra nela.
const POOL_SLACK: usize = BUFFER_CAPACITY / 2;

// =============================================================================
// POOL
// =============================================================================

/// Pool de Buffer Stores
pub struct BufferPool {
    heap: Heap,
    // Região usada pelo heap. Alinhada a 8 (u64). Nunca é lida diretamente,
    // só precisa viver enquanto o heap existir.
    _region: Vec<u64>,
    slots: usize,
    in_use: usize,
}

// SAFETY: o Heap só aponta para `_region`, que pertence ao próprio pool.
unsafe impl Send for BufferPool {}

impl BufferPool {
    /// Cria um pool com espaço para `slots` Buffer Stores.
    ///
    /// `slots` zero ou acima de `MAX_POOL_SLOTS` é `InvalidConfig`.
    pub fn new(slots: usize) -> DevResult<Self> {
        if slots == 0 || slots > MAX_POOL_SLOTS {
            return Err(DriverError::InvalidConfig);
        }
        let bytes = slots
            .checked_mul(BUFFER_CAPACITY)
            .and_then(|bytes| bytes.checked_add(POOL_SLACK))
            .ok_or(DriverError::InvalidConfig)?;
        let bytes = align_up(bytes, 8);
        let mut region = vec![0u64; bytes / 8];
        // SAFETY: `region` é memória exclusiva do pool, não é movida (só o
        // Vec que a descreve) e vive até o pool ser destruído.
        let heap = unsafe { Heap::new(region.as_mut_ptr() as *mut u8, bytes) };
        Ok(Self {
            heap,
            _region: region,
            slots,
            in_use: 0,
        })
    }

    /// Capacidade nominal em Buffer Stores
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Buffer Stores vivos
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Bytes ocupados no heap do pool
    pub fn used_bytes(&self) -> usize {
        self.heap.used()
    }

    fn allocate(&mut self) -> DevResult<NonNull<u8>> {
        let ptr = self
            .heap
            .allocate_first_fit(STORE_LAYOUT)
            .map_err(|_| DriverError::OutOfMemory)?;
        self.in_use += 1;
        Ok(ptr)
    }

    /// # Safety
    /// `ptr` precisa ter vindo de `allocate` deste pool e não pode ser usado
    /// depois.
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>) {
        self.heap.deallocate(ptr, STORE_LAYOUT);
        self.in_use -= 1;
    }
}

/// Pool compartilhado entre o driver e os Buffer Stores vivos
pub type SharedPool = Arc<Mutex<BufferPool>>;

/// Cria um pool compartilhado
pub fn shared_pool(slots: usize) -> DevResult<SharedPool> {
    Ok(Arc::new(Mutex::new(BufferPool::new(slots)?)))
}

// =============================================================================
// BUFFER STORE
// =============================================================================

/// Armazenamento de capacidade fixa de um único handle
pub struct BufferStore {
    ptr: NonNull<u8>,
    pool: SharedPool,
}

// SAFETY: `ptr` aponta para memória exclusiva deste store; o acesso
// concorrente é serializado pelo Mutex do handle.
unsafe impl Send for BufferStore {}

impl BufferStore {
    /// Capacidade fixa
    pub const CAPACITY: usize = BUFFER_CAPACITY;

    /// Aloca um store do pool, zerado e com a semente no início
    pub fn allocate(pool: &SharedPool) -> DevResult<Self> {
        let ptr = pool.lock().allocate()?;
        let mut store = Self {
            ptr,
            pool: Arc::clone(pool),
        };
        let bytes = store.as_mut_slice();
        bytes.fill(0);
        bytes[..SEED.len()].copy_from_slice(SEED);
        Ok(store)
    }

    /// Capacidade em bytes
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// Conteúdo completo
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` é uma alocação viva de BUFFER_CAPACITY bytes.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), BUFFER_CAPACITY) }
    }

    /// Conteúdo completo, mutável
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: idem, e `&mut self` garante acesso exclusivo.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), BUFFER_CAPACITY) }
    }
}

impl Drop for BufferStore {
    fn drop(&mut self) {
        // SAFETY: `ptr` veio de `allocate` deste pool e o store está morrendo.
        unsafe { self.pool.lock().deallocate(self.ptr) };
    }
}

impl core::fmt::Debug for BufferStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BufferStore")
            .field("capacity", &BUFFER_CAPACITY)
            .field("head", &&self.as_slice()[..SEED.len()])
            .finish()
    }
}
