use tokio_util::sync::CancellationToken;

/// Execution context threaded through Expand/Flatten.
///
/// Carries the caller's cancellation scope so conversions can sit inside
/// async resource handlers. The engine never inspects or waits on it:
/// a conversion is a bounded synchronous traversal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
}

impl Context {
    /// Context with a fresh, never-cancelled token.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}
