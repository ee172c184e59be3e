//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do driver.

pub mod test_framework;

/// Alinha um valor para cima ao múltiplo de `align` (potência de 2).
///
/// # Exemplo
/// `align_up(10, 4) -> 12`
#[inline]
pub const fn align_up(addr: usize, align: usize) -> usize {
    (addr + align - 1) & !(align - 1)
}

/// Verifica se um valor está alinhado.
#[inline]
pub const fn is_aligned(addr: usize, align: usize) -> bool {
    (addr & (align - 1)) == 0
}
