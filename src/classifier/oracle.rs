use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Label/score pairs in the order the oracle returned them
pub type LabelScores = Vec<(String, f64)>;

/// External label-scoring capability
///
/// Scores are in 0..=1 and independent per label (multi-label); higher
/// means more relevant. Nothing else about them is assumed.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores>;

    /// Short name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ClassificationOracle + ?Sized> ClassificationOracle for Arc<T> {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores> {
        (**self).classify(text, labels).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: ClassificationOracle + ?Sized> ClassificationOracle for Box<T> {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores> {
        (**self).classify(text, labels).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
