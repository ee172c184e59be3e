// =============================================================================
// DRIVER LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do driver com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt no caminho quente - apenas strings literais + um valor hex
// - SEM alocação
// - Escreve no LogSink instalado pelo host (serial no kernel, captura nos
//   testes). Sem sink instalado, o evento é descartado.
//
// O sink é "fire-and-forget": nunca bloqueia e nunca falha a operação que
// está logando.
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros fatais ou críticos
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal de execução
// - DEBUG: Informações de debugging
// - TRACE: Detalhes extremos (cada open/read/write)
//
// COMO USAR:
//   kinfo!("(SIMPLE) Registrando endpoints...");   // Apenas string
//   ktrace!("(SIMPLE) read: count=", count);       // String + hex
//
// =============================================================================

use spin::Once;

// =============================================================================
// NÍVEIS E SINK
// =============================================================================

/// Nível de log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Ok = 3,
    Warn = 4,
    Fail = 5,
    Error = 6,
}

impl LogLevel {
    /// Prefixo textual (sem cores ANSI)
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Trace => "[TRAC] ",
            Self::Debug => "[DEBG] ",
            Self::Info => "[INFO] ",
            Self::Ok => "[OK] ",
            Self::Warn => "[WARN] ",
            Self::Fail => "[FAIL] ",
            Self::Error => "[ERRO] ",
        }
    }
}

/// Destino dos eventos de diagnóstico.
///
/// Implementado pelo host: no kernel escreve na COM1, nos testes guarda
/// os eventos em memória. `emit` não pode bloquear nem entrar em pânico.
pub trait LogSink: Sync {
    /// Emite um evento. `value` é o valor numérico opcional do macro.
    fn emit(&self, level: LogLevel, message: &str, value: Option<u64>);
}

static SINK: Once<&'static dyn LogSink> = Once::new();

/// Instala o sink global.
///
/// Só a primeira chamada tem efeito; retorna `false` se já havia um sink.
pub fn set_sink(sink: &'static dyn LogSink) -> bool {
    let mut installed = false;
    SINK.call_once(|| {
        installed = true;
        sink
    });
    installed
}

/// Ponto de entrada usado pelos macros.
#[inline(never)]
pub fn emit(level: LogLevel, message: &str, value: Option<u64>) {
    if let Some(sink) = SINK.get() {
        sink.emit(level, message, value);
    }
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================
//
// kerror! - Sempre ativo (exceto com no_logs)
//

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Error, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit(
            $crate::core::logging::LogLevel::Error,
            $msg,
            Some($val as u64),
        );
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Warn, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit(
            $crate::core::logging::LogLevel::Warn,
            $msg,
            Some($val as u64),
        );
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================
//
// kinfo! - Inativo com no_logs e log_error
//

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Info, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit(
            $crate::core::logging::LogLevel::Info,
            $msg,
            Some($val as u64),
        );
    }};
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================
//
// kdebug! - Ativo apenas com log_trace ou log_debug
//

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_trace", feature = "log_debug")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Debug, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit(
            $crate::core::logging::LogLevel::Debug,
            $msg,
            Some($val as u64),
        );
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_trace", feature = "log_debug")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================
//
// ktrace! - Ativo apenas com log_trace
//

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Trace, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit(
            $crate::core::logging::LogLevel::Trace,
            $msg,
            Some($val as u64),
        );
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

/// kok! - Log de sucesso.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Ok, $msg, None);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::core::logging::emit($crate::core::logging::LogLevel::Fail, $msg, None);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
