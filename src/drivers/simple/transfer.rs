//! # Transfer Engine
//!
//! read/write limitados sobre o Buffer Store de um handle.
//!
//! - Ambos ignoram qualquer cursor: toda leitura e toda escrita começam no
//!   offset 0.
//! - `read` corta o pedido na capacidade (`min(count, 256)`) e nunca falha
//!   por pedido grande.
//! - `write` acima da capacidade é rejeitado com `InvalidLength` e o store
//!   fica intacto.
//! - Destino/origem inválidos (ou menores que `count`) viram `Fault`.

use super::buffer::BufferStore;
use super::error::{DevResult, DriverError};
use crate::fs::devfs::{UserReader, UserWriter};

/// Copia os primeiros `min(count, capacidade)` bytes do store para `dst`.
pub fn read<W: UserWriter + ?Sized>(
    store: &BufferStore,
    dst: &mut W,
    count: usize,
) -> DevResult<usize> {
    let count = count.min(store.capacity());
    if let Err(fault) = dst.copy_to_user(&store.as_slice()[..count]) {
        crate::kerror!("(SIMPLE) read: copy_to_user falhou");
        crate::kerror!(fault.as_str());
        return Err(DriverError::Fault);
    }
    Ok(count)
}

/// Copia `count` bytes de `src` para o início do store.
pub fn write<R: UserReader + ?Sized>(
    store: &mut BufferStore,
    src: &R,
    count: usize,
) -> DevResult<usize> {
    if count > store.capacity() {
        crate::kwarn!("(SIMPLE) write: tamanho acima da capacidade=", count);
        return Err(DriverError::InvalidLength);
    }

    if src.available() < count {
        crate::kerror!("(SIMPLE) write: origem menor que count=", count);
        return Err(DriverError::Fault);
    }

    // Copia para um rascunho antes: uma falha no meio não deixa o store
    // parcialmente escrito.
    let mut staging = [0u8; BufferStore::CAPACITY];
    if let Err(fault) = src.copy_from_user(&mut staging[..count]) {
        crate::kerror!("(SIMPLE) write: copy_from_user falhou");
        crate::kerror!(fault.as_str());
        return Err(DriverError::Fault);
    }
    store.as_mut_slice()[..count].copy_from_slice(&staging[..count]);
    Ok(count)
}
