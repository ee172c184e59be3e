//! # Standard Error Codes (Errno)
//!
//! Códigos de erro devolvidos ao host na fronteira de dispatch.
//! Numeração POSIX/Linux: o host espera `-errno` no retorno de
//! open/read/write, como um `ssize_t` de um `file_operations`.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    Success = 0,
    ENOENT = 2,  // No such file or directory
    EIO = 5,     // I/O error
    EBADF = 9,   // Bad file number
    ENOMEM = 12, // Out of memory
    EFAULT = 14, // Bad address
    EBUSY = 16,  // Device or resource busy
    EEXIST = 17, // File exists
    ENODEV = 19, // No such device
    EINVAL = 22, // Invalid argument
    ENFILE = 23, // File table overflow
}

impl Errno {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }

    /// Converte um retorno negativo de volta para Errno
    pub fn from_isize(code: isize) -> Option<Self> {
        if code >= 0 {
            return None;
        }
        match -code {
            2 => Some(Self::ENOENT),
            5 => Some(Self::EIO),
            9 => Some(Self::EBADF),
            12 => Some(Self::ENOMEM),
            14 => Some(Self::EFAULT),
            16 => Some(Self::EBUSY),
            17 => Some(Self::EEXIST),
            19 => Some(Self::ENODEV),
            22 => Some(Self::EINVAL),
            23 => Some(Self::ENFILE),
            _ => None,
        }
    }
}
