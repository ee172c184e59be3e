//! Testes para o DeviceRegistry

#![cfg(test)]

use super::create_test_registry;
use crate::fs::devfs::registry::{DYNAMIC_MAJOR_MAX, DYNAMIC_MAJOR_MIN};
use crate::fs::devfs::{DeviceNumber, DispatchTable, HostError, NodeService, RegionAllocator};

#[test]
fn test_reserve_allocates_dynamic_major() {
    let mut reg = create_test_registry();
    let base = reg.reserve(0, 2, "drv").unwrap();
    assert_eq!(base, DeviceNumber::new(DYNAMIC_MAJOR_MAX, 0));
    assert_eq!(reg.region_owner(base.offset(1)), Some("drv"));
    assert_eq!(reg.region_owner(base.offset(2)), None);

    let second = reg.reserve(0, 1, "other").unwrap();
    assert_eq!(second.major, DYNAMIC_MAJOR_MAX - 1);
}

#[test]
fn test_reserve_rejects_bad_ranges() {
    let mut reg = create_test_registry();
    assert_eq!(reg.reserve(0, 0, "drv"), Err(HostError::InvalidArgument));
    assert_eq!(reg.reserve(u32::MAX, 2, "drv"), Err(HostError::InvalidArgument));
    assert_eq!(
        reg.reserve(DeviceNumber::MINOR_MASK, 2, "drv"),
        Err(HostError::InvalidArgument)
    );
    assert!(reg.is_empty());
}

#[test]
fn test_reserve_exhausts_majors() {
    let mut reg = create_test_registry();
    let total = DYNAMIC_MAJOR_MAX - DYNAMIC_MAJOR_MIN + 1;
    for _ in 0..total {
        reg.reserve(0, 1, "drv").unwrap();
    }
    assert_eq!(reg.reserve(0, 1, "drv"), Err(HostError::NoSpace));
}

#[test]
fn test_release_frees_major() {
    let mut reg = create_test_registry();
    let base = reg.reserve(0, 2, "drv").unwrap();
    reg.release(base, 2);
    assert_eq!(reg.region_count(), 0);
    assert_eq!(reg.reserve(0, 2, "drv").unwrap(), base);
}

#[test]
fn test_install_and_remove_dispatch() {
    let mut reg = create_test_registry();
    let base = DeviceNumber::new(254, 0);
    reg.install(base, 2, "drv").unwrap();
    assert_eq!(reg.routed_to(base.offset(1)), Some("drv"));
    assert_eq!(reg.install(base.offset(1), 1, "other"), Err(HostError::Busy));
    assert_eq!(reg.install(base, 0, "other"), Err(HostError::InvalidArgument));

    reg.remove(base);
    assert_eq!(reg.routed_to(base), None);
    assert_eq!(reg.dispatch_count(), 0);
}

#[test]
fn test_class_lifecycle() {
    let mut reg = create_test_registry();
    reg.create_class("device").unwrap();
    assert!(reg.has_class("device"));
    assert_eq!(reg.create_class("device"), Err(HostError::AlreadyExists));
    reg.destroy_class("device");
    assert!(!reg.has_class("device"));
}

#[test]
fn test_publish_and_lookup() {
    let mut reg = create_test_registry();
    let dev = DeviceNumber::new(254, 0);
    assert_eq!(reg.publish("device", dev, "device0"), Err(HostError::NotFound));

    reg.create_class("device").unwrap();
    reg.publish("device", dev, "device0").unwrap();
    assert_eq!(reg.lookup("device0"), Some(dev));
    assert_eq!(reg.lookup_by_dev(dev), Some("device0"));
    assert_eq!(reg.node(dev).map(|node| node.mode), Some(0o666));

    // Nome ou device number repetido
    assert_eq!(
        reg.publish("device", dev.offset(1), "device0"),
        Err(HostError::AlreadyExists)
    );
    assert_eq!(
        reg.publish("device", dev, "device9"),
        Err(HostError::AlreadyExists)
    );

    reg.unpublish("device", dev);
    assert_eq!(reg.lookup("device0"), None);
    assert_eq!(reg.node_count(), 0);
}
