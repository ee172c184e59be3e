//! Sistema de Arquivos (lado de dispositivos).
//!
//! Submódulos:
//! - `devfs`: Dispositivos de caractere (/dev) e serviços de host.

pub mod devfs;

#[cfg(test)]
mod tests;
