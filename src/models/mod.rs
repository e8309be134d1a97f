use serde::Serializer;

pub mod movie;
pub mod recommendation;

pub use movie::{MovieRecord, REQUIRED_COLUMNS};
pub use recommendation::{PosterResponse, Recommendation};

/// Sentinel written in place of missing or non-finite values
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Wire helpers
// ============================================================================

/// Serializes an optional float, writing `"N/A"` for missing, NaN and infinite values.
pub fn serialize_float_or_na<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.is_finite() => serializer.serialize_f64(*v),
        _ => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// Like [`serialize_float_or_na`], but writes integral values without a fractional
/// part so columns such as `budget` or `vote_count` keep their source shape.
pub fn serialize_count_or_na<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => {
            serializer.serialize_i64(*v as i64)
        }
        _ => serialize_float_or_na(value, serializer),
    }
}

/// Serializes an optional string, writing `"N/A"` when it is missing.
pub fn serialize_text_or_na<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(v),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}
