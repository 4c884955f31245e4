use tracing::Span;

use super::TraceId;

/// Root span for one chart computation.
///
/// `pair_id` is left empty so the caller can record it once the pair is known.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        pair_id = tracing::field::Empty
    )
}

/// Child span for one stage of a computation (inherits the root's trace_id).
pub fn child_span(name: &'static str) -> Span {
    tracing::debug_span!("stage", name = %name)
}
