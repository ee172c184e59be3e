//! Self-test do driver Simple
//!
//! Roda dentro do kernel (feature `self_test`), contra um `DeviceRegistry`
//! privado, sem tocar nos endpoints reais.

use super::config::{BUFFER_CAPACITY, SEED};
use super::{DriverConfig, DriverError, FileHandle, SimpleDriver};
use crate::fs::devfs::DeviceRegistry;
use crate::klib::test_framework::{run_test_suite, SuiteReport, TestCase, TestResult};

/// Casos de teste do driver
const SIMPLE_TESTS: &[TestCase] = &[
    TestCase::new("simple_register_unwind", test_register_unwind),
    TestCase::new("simple_seed", test_seed),
    TestCase::new("simple_read_clamp", test_read_clamp),
    TestCase::new("simple_write_read", test_write_read),
    TestCase::new("simple_oversize_write", test_oversize_write),
    TestCase::new("simple_isolation", test_isolation),
    TestCase::new("simple_double_close", test_double_close),
];

/// Executa todos os testes do driver
pub fn run_simple_tests() -> SuiteReport {
    run_test_suite("Simple", SIMPLE_TESTS)
}

// Driver registrado num registro privado. O registro precisa viver até o
// fim do caso, por isso volta junto.
fn setup() -> Option<(DeviceRegistry, SimpleDriver)> {
    let mut registry = DeviceRegistry::new();
    match SimpleDriver::init(DriverConfig::default(), &mut registry) {
        Ok(driver) => Some((registry, driver)),
        Err(e) => {
            crate::kerror!(e.as_str());
            None
        }
    }
}

fn open_first(driver: &SimpleDriver) -> Option<FileHandle> {
    driver.endpoint(0).and_then(|dev| driver.open(dev).ok())
}

/// register_all + unregister_all deixam o host vazio
fn test_register_unwind() -> TestResult {
    let Some((mut registry, mut driver)) = setup() else {
        return TestResult::Fail;
    };
    if registry.node_count() != 2 {
        crate::kerror!("(Simple) nós publicados=", registry.node_count());
        return TestResult::Fail;
    }
    driver.unregister_all(&mut registry);
    if !registry.is_empty() {
        crate::kerror!("(Simple) host não ficou vazio após unregister");
        return TestResult::Fail;
    }
    TestResult::Pass
}

/// Buffer recém aberto: semente + zeros
fn test_seed() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let Some(handle) = open_first(&driver) else {
        return TestResult::Fail;
    };
    let mut out = [0xFFu8; 16];
    if driver.read(handle, &mut out[..], 16) != Ok(16) {
        return TestResult::Fail;
    }
    if &out[..SEED.len()] != SEED || out[SEED.len()..].iter().any(|&b| b != 0) {
        crate::kerror!("(Simple) conteúdo inicial inesperado");
        return TestResult::Fail;
    }
    driver.close(handle);
    TestResult::Pass
}

/// Leitura maior que a capacidade devolve exatamente a capacidade
fn test_read_clamp() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let Some(handle) = open_first(&driver) else {
        return TestResult::Fail;
    };
    let mut out = [0u8; BUFFER_CAPACITY * 2];
    let result = driver.read(handle, &mut out[..], BUFFER_CAPACITY * 2);
    driver.close(handle);
    if result != Ok(BUFFER_CAPACITY) {
        crate::kerror!("(Simple) leitura não foi limitada");
        return TestResult::Fail;
    }
    TestResult::Pass
}

/// "hello" escrito volta com o resto zerado; "hi" depois vira "hillo"
fn test_write_read() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let Some(handle) = open_first(&driver) else {
        return TestResult::Fail;
    };
    let mut out = [0u8; 10];
    let ok = driver.write(handle, &b"hello"[..], 5) == Ok(5)
        && driver.read(handle, &mut out[..], 10) == Ok(10)
        && &out == b"hello\0\0\0\0\0"
        && driver.write(handle, &b"hi"[..], 2) == Ok(2)
        && driver.read(handle, &mut out[..], 5) == Ok(5)
        && &out[..5] == b"hillo";
    driver.close(handle);
    if ok {
        TestResult::Pass
    } else {
        TestResult::Fail
    }
}

/// write acima da capacidade é rejeitado sem alterar o buffer
fn test_oversize_write() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let Some(handle) = open_first(&driver) else {
        return TestResult::Fail;
    };
    let data = [0x41u8; BUFFER_CAPACITY + 44];
    let mut out = [0u8; 5];
    let rejected =
        driver.write(handle, &data[..], data.len()) == Err(DriverError::InvalidLength);
    let intact = driver.read(handle, &mut out[..], 5).is_ok() && &out[..] == SEED;
    driver.close(handle);
    if rejected && intact {
        TestResult::Pass
    } else {
        TestResult::Fail
    }
}

/// Dois handles no mesmo endpoint não compartilham buffer
fn test_isolation() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let (Some(a), Some(b)) = (open_first(&driver), open_first(&driver)) else {
        return TestResult::Fail;
    };
    let mut out = [0u8; 5];
    let ok = driver.write(a, &b"XXXXX"[..], 5).is_ok()
        && driver.read(b, &mut out[..], 5).is_ok()
        && &out[..] == SEED;
    driver.close(a);
    driver.close(b);
    if ok {
        TestResult::Pass
    } else {
        TestResult::Fail
    }
}

/// Fechar duas vezes não faz nada; o handle fechado é rejeitado
fn test_double_close() -> TestResult {
    let Some((_registry, driver)) = setup() else {
        return TestResult::Fail;
    };
    let Some(handle) = open_first(&driver) else {
        return TestResult::Fail;
    };
    driver.close(handle);
    driver.close(handle);
    let mut out = [0u8; 1];
    if driver.read(handle, &mut out[..], 1) != Err(DriverError::InvalidHandle) {
        return TestResult::Fail;
    }
    if driver.open_handles() != 0 || driver.pool_in_use() != 0 {
        crate::kerror!("(Simple) buffer vazou após close");
        return TestResult::Fail;
    }
    TestResult::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_suite_passes() {
        let report = run_simple_tests();
        assert_eq!(report.failed, 0);
        assert_eq!(report.passed, SIMPLE_TESTS.len());
    }
}
