//! Trained-model prediction path.
//!
//! Loads a serialized forecasting model (ONNX) and its fitted scaler from a
//! fixed artifact directory, caches both for the process lifetime, and runs
//! single-step inference on the last known demand value.

pub mod scaler;

pub use scaler::MinMaxScaler;

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;
use tracing::info;

use crate::forecast::ForecastError;

const MODEL_FILE: &str = "model.onnx";
const SCALER_FILE: &str = "scaler.json";
// Historical misspelling still present in some training exports.
const SCALER_FILE_ALT: &str = "scalar.json";

/// Auxiliary feature vector width expected by the model's second input.
const AUX_FEATURES: usize = 4;

type RunnableOnnx = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

struct Artifacts {
    model: RunnableOnnx,
    scaler: MinMaxScaler,
}

/// Lazily-loaded demand predictor.
///
/// Artifacts are resolved and deserialized on first use and retained for the
/// remainder of the process; there is no reload or invalidation path. A
/// failed load is not cached, so the next request attempts the load again.
pub struct Predictor {
    artifacts_dir: PathBuf,
    cache: OnceCell<Artifacts>,
}

impl Predictor {
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self { artifacts_dir: artifacts_dir.into(), cache: OnceCell::new() }
    }

    fn artifacts(&self) -> Result<&Artifacts, ForecastError> {
        self.cache.get_or_try_init(|| load_artifacts(&self.artifacts_dir))
    }

    /// Predict the next demand value (MW) from the last known one.
    ///
    /// `features` defaults to zeros when the caller has none; the scalar
    /// input travels through the scaler's forward transform as a 1x1x1
    /// tensor and the output comes back through the inverse transform.
    pub fn predict_next_demand(
        &self,
        last_demand: f64,
        features: Option<[f64; AUX_FEATURES]>,
    ) -> Result<f64, ForecastError> {
        let artifacts = self.artifacts()?;

        let scaled = artifacts.scaler.transform(last_demand) as f32;
        let demand_input = tract_ndarray::Array3::from_shape_vec((1, 1, 1), vec![scaled])
            .map_err(|e| ForecastError::InferenceFailed(e.to_string()))?
            .into_tensor();

        let features = features.unwrap_or([0.0; AUX_FEATURES]);
        let feature_input = tract_ndarray::Array2::from_shape_vec(
            (1, AUX_FEATURES),
            features.iter().map(|f| *f as f32).collect(),
        )
        .map_err(|e| ForecastError::InferenceFailed(e.to_string()))?
        .into_tensor();

        let outputs = artifacts
            .model
            .run(tvec!(demand_input.into(), feature_input.into()))
            .map_err(|e| ForecastError::InferenceFailed(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ForecastError::InferenceFailed(e.to_string()))?;
        let scaled_prediction = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ForecastError::InferenceFailed("model returned no output".into()))?;

        Ok(artifacts.scaler.inverse_transform(scaled_prediction as f64))
    }
}

fn load_artifacts(dir: &Path) -> Result<Artifacts, ForecastError> {
    let model_path = dir.join(MODEL_FILE);
    let mut scaler_path = dir.join(SCALER_FILE);
    if !scaler_path.exists() {
        scaler_path = dir.join(SCALER_FILE_ALT);
    }

    let model = tract_onnx::onnx()
        .model_for_path(&model_path)
        .map_err(|e| ForecastError::ArtifactUnavailable(format!("{}: {e}", model_path.display())))?
        .into_optimized()
        .map_err(|e| ForecastError::ArtifactUnavailable(e.to_string()))?
        .into_runnable()
        .map_err(|e| ForecastError::ArtifactUnavailable(e.to_string()))?;

    let scaler = MinMaxScaler::load(&scaler_path)?;

    info!(
        model = %model_path.display(),
        scaler = %scaler_path.display(),
        "loaded forecasting artifacts"
    );

    Ok(Artifacts { model, scaler })
}
