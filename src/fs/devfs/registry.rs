//! Device Registry - Registro de dispositivos do DevFS
//!
//! Implementação em memória dos serviços de host (`DeviceHost`): guarda as
//! faixas de device numbers reservadas, as faixas com dispatch instalado,
//! as classes e os nós publicados em /dev.

use super::device::{DeviceNode, DeviceNumber};
use super::host::{DispatchTable, HostError, HostResult, NodeService, RegionAllocator};
use alloc::string::String;
use alloc::vec::Vec;

/// Primeiro major da faixa dinâmica (igual ao Linux)
pub const DYNAMIC_MAJOR_MIN: u32 = 234;

/// Último major da faixa dinâmica. A alocação começa daqui e desce.
pub const DYNAMIC_MAJOR_MAX: u32 = 254;

// Faixa de minors reservada por um driver
struct RegionEntry {
    base: DeviceNumber,
    count: u32,
    name: String,
}

impl RegionEntry {
    fn contains(&self, dev: DeviceNumber) -> bool {
        dev.major == self.base.major
            && dev.minor >= self.base.minor
            && dev.minor < self.base.minor + self.count
    }
}

// Faixa com open/read/write roteados para um driver
struct DispatchEntry {
    base: DeviceNumber,
    count: u32,
    name: String,
}

impl DispatchEntry {
    fn overlaps(&self, base: DeviceNumber, count: u32) -> bool {
        self.base.major == base.major
            && base.minor < self.base.minor + self.count
            && self.base.minor < base.minor + count
    }
}

// Nó publicado numa classe
struct NodeEntry {
    class: String,
    node: DeviceNode,
}

/// Registro de dispositivos
pub struct DeviceRegistry {
    regions: Vec<RegionEntry>,
    dispatch: Vec<DispatchEntry>,
    classes: Vec<String>,
    nodes: Vec<NodeEntry>,
}

impl DeviceRegistry {
    /// Cria um novo registro vazio
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
            dispatch: Vec::new(),
            classes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Busca um nó por nome
    pub fn lookup(&self, label: &str) -> Option<DeviceNumber> {
        self.nodes
            .iter()
            .find(|entry| entry.node.name() == label)
            .map(|entry| entry.node.dev)
    }

    /// Busca o nome do nó de um device number
    pub fn lookup_by_dev(&self, dev: DeviceNumber) -> Option<&str> {
        self.nodes
            .iter()
            .find(|entry| entry.node.dev == dev)
            .map(|entry| entry.node.name())
    }

    /// Nó publicado para `dev`
    pub fn node(&self, dev: DeviceNumber) -> Option<&DeviceNode> {
        self.nodes
            .iter()
            .find(|entry| entry.node.dev == dev)
            .map(|entry| &entry.node)
    }

    /// Nome do driver dono da faixa que contém `dev`
    pub fn region_owner(&self, dev: DeviceNumber) -> Option<&str> {
        self.regions
            .iter()
            .find(|region| region.contains(dev))
            .map(|region| region.name.as_str())
    }

    /// Nome do driver que recebe o dispatch de `dev`
    pub fn routed_to(&self, dev: DeviceNumber) -> Option<&str> {
        self.dispatch
            .iter()
            .find(|entry| entry.overlaps(dev, 1))
            .map(|entry| entry.name.as_str())
    }

    /// Verifica se a classe existe
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|class| class == name)
    }

    /// Número de nós publicados
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Número de faixas reservadas
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Número de faixas com dispatch instalado
    pub fn dispatch_count(&self) -> usize {
        self.dispatch.len()
    }

    /// Número de classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// True se nada está registrado
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
            && self.dispatch.is_empty()
            && self.classes.is_empty()
            && self.nodes.is_empty()
    }

    fn major_in_use(&self, major: u32) -> bool {
        self.regions.iter().any(|region| region.base.major == major)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionAllocator for DeviceRegistry {
    fn reserve(&mut self, minor_base: u32, count: u32, name: &str) -> HostResult<DeviceNumber> {
        let end = minor_base.checked_add(count).ok_or(HostError::InvalidArgument)?;
        if count == 0 || end > DeviceNumber::MINOR_MASK + 1 {
            return Err(HostError::InvalidArgument);
        }

        let major = (DYNAMIC_MAJOR_MIN..=DYNAMIC_MAJOR_MAX)
            .rev()
            .find(|&major| !self.major_in_use(major))
            .ok_or(HostError::NoSpace)?;

        let base = DeviceNumber::new(major, minor_base);
        self.regions.push(RegionEntry {
            base,
            count,
            name: String::from(name),
        });
        Ok(base)
    }

    fn release(&mut self, base: DeviceNumber, count: u32) {
        self.regions
            .retain(|region| !(region.base == base && region.count == count));
    }
}

impl DispatchTable for DeviceRegistry {
    fn install(&mut self, base: DeviceNumber, count: u32, name: &str) -> HostResult<()> {
        if count == 0 {
            return Err(HostError::InvalidArgument);
        }
        if self.dispatch.iter().any(|entry| entry.overlaps(base, count)) {
            return Err(HostError::Busy);
        }
        self.dispatch.push(DispatchEntry {
            base,
            count,
            name: String::from(name),
        });
        Ok(())
    }

    fn remove(&mut self, base: DeviceNumber) {
        self.dispatch.retain(|entry| entry.base != base);
    }
}

impl NodeService for DeviceRegistry {
    fn create_class(&mut self, name: &str) -> HostResult<()> {
        if self.has_class(name) {
            return Err(HostError::AlreadyExists);
        }
        self.classes.push(String::from(name));
        Ok(())
    }

    fn destroy_class(&mut self, name: &str) {
        self.classes.retain(|class| class != name);
    }

    fn publish(&mut self, class: &str, dev: DeviceNumber, label: &str) -> HostResult<()> {
        if !self.has_class(class) {
            return Err(HostError::NotFound);
        }
        if self.lookup(label).is_some() || self.lookup_by_dev(dev).is_some() {
            return Err(HostError::AlreadyExists);
        }
        self.nodes.push(NodeEntry {
            class: String::from(class),
            node: DeviceNode::new(label, dev),
        });
        Ok(())
    }

    fn unpublish(&mut self, class: &str, dev: DeviceNumber) {
        self.nodes
            .retain(|entry| !(entry.class == class && entry.node.dev == dev));
    }
}
