use pricecut_common::models::prediction::PredictionResult;
use rust_decimal::Decimal;
use tracing::debug;

/// A prediction as far as the engine cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsablePrediction {
    Available(Decimal),
    Unusable,
}

/// Collapses `Missing` and `Failed` into a single `Unusable` outcome.
pub fn normalize(prediction: &PredictionResult) -> UsablePrediction {
    match prediction {
        PredictionResult::Available(value) => UsablePrediction::Available(*value),
        PredictionResult::Missing => UsablePrediction::Unusable,
        PredictionResult::Failed(cause) => {
            debug!(%cause, "prediction failed, treating as unusable");
            UsablePrediction::Unusable
        }
    }
}
