//! The completion acknowledgment returned by synchronization.

use weir_core::Tuple;

/// Acknowledgment that the engine consumed a delivery.
///
/// Wraps the response tuple the consuming operation produced. The
/// response is a completion signal: it is intentionally fine to drop
/// an `Ack` without looking inside, and inspecting it never fails.
/// `receive_data` callers typically ignore it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ack {
    response: Tuple,
}

impl Ack {
    pub(crate) fn new(response: Tuple) -> Self {
        Self { response }
    }

    /// The response tuple, for the rare caller that wants it.
    pub fn response(&self) -> &Tuple {
        &self.response
    }

    /// Unwrap into the response tuple.
    pub fn into_response(self) -> Tuple {
        self.response
    }
}
