use async_trait::async_trait;

/// Severity of a trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Error,
}

/// Best-effort sink for per-call diagnostics
///
/// Implementations must swallow their own failures: `emit` returns nothing,
/// so a broken sink can never change the outcome of a call.
#[async_trait]
pub trait Observer: Send + Sync {
    /// Deliver one trace entry
    async fn emit(&self, level: TraceLevel, message: &str);
}

/// Emit to an optional observer
pub async fn notify(observer: Option<&dyn Observer>, level: TraceLevel, message: &str) {
    if let Some(observer) = observer {
        observer.emit(level, message).await;
    }
}
