use crate::types::{InvoiceData, ScoredMatch};
use crate::util;

/// A classification strategy scored against one invoice.
///
/// Classifiers run in pipeline order. Returning `None` defers to the next
/// classifier; returning a match ends the pipeline.
pub trait Classifier: Send + Sync {
    /// Decide if this classifier should run for the given invoice.
    fn enable(&self, _invoice: &InvoiceData) -> bool {
        true
    }

    /// Score the invoice, or defer.
    fn classify(&self, invoice: &InvoiceData) -> Option<ScoredMatch>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
