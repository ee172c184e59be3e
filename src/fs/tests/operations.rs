//! Testes para as cópias de/para o chamador

#![cfg(test)]

use crate::fs::devfs::operations::USER_SPACE_END;
use crate::fs::devfs::{UserFault, UserReader, UserSlice, UserWriter};
use alloc::vec;

#[test]
fn test_slice_writer() {
    let mut buf = [0u8; 4];
    let dst: &mut [u8] = &mut buf;
    assert_eq!(dst.capacity(), 4);
    dst.copy_to_user(b"ab").unwrap();
    assert_eq!(dst.copy_to_user(b"abcde"), Err(UserFault::TooSmall));
    assert_eq!(&buf, b"ab\0\0");
}

#[test]
fn test_slice_reader() {
    let src: &[u8] = b"xyz";
    let mut out = [0u8; 2];
    src.copy_from_user(&mut out).unwrap();
    assert_eq!(&out, b"xy");

    let mut big = [0u8; 8];
    assert_eq!(src.copy_from_user(&mut big), Err(UserFault::TooSmall));
}

#[test]
fn test_user_slice_validate() {
    assert_eq!(UserSlice::new(0, 16).validate(4), Err(UserFault::NullPointer));
    assert_eq!(UserSlice::new(0, 16).validate(0), Ok(()));
    assert_eq!(UserSlice::new(0x1000, 2).validate(4), Err(UserFault::TooSmall));
    assert_eq!(
        UserSlice::new(USER_SPACE_END - 2, 16).validate(4),
        Err(UserFault::OutOfRange)
    );
    assert_eq!(
        UserSlice::new(usize::MAX - 1, 16).validate(4),
        Err(UserFault::OutOfRange)
    );
    assert_eq!(UserSlice::new(0x1000, 16).validate(16), Ok(()));
}

#[test]
fn test_user_slice_copies_real_memory() {
    let mut backing = vec![0u8; 8];
    let mut dst = UserSlice::new(backing.as_mut_ptr() as usize, backing.len());
    dst.copy_to_user(b"hey").unwrap();
    assert_eq!(&backing[..3], b"hey");

    let data = b"input".to_vec();
    let src = UserSlice::new(data.as_ptr() as usize, data.len());
    let mut out = [0u8; 5];
    src.copy_from_user(&mut out).unwrap();
    assert_eq!(&out, b"input");
}

#[test]
fn test_user_slice_empty() {
    let slice = UserSlice::new(0, 0);
    assert!(slice.is_empty());
    assert_eq!(slice.len(), 0);
    assert_eq!(slice.addr(), 0);
}
