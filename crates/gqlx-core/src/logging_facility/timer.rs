//! Span timing guard

use std::time::Instant;

use gqlx_core_types::schema::FIELD_DURATION_MS;
use tracing::Span;

/// Records the elapsed time on a span when dropped.
///
/// Dropping happens on every exit path of the owning call (return, `?`,
/// panic unwinding, or the future being dropped), so the span always carries
/// its duration when it closes. The span must declare a `duration_ms` field
/// (`duration_ms = tracing::field::Empty`).
pub struct SpanTimer {
    span: Span,
    start: Instant,
}

impl SpanTimer {
    pub fn start(span: &Span) -> Self {
        Self {
            span: span.clone(),
            start: Instant::now(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Drop for SpanTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        self.span.record(FIELD_DURATION_MS, elapsed);
    }
}
