use serde::Deserialize;

mod kalman;

pub use kalman::Kalman;

/// Signal the correction step compares the prediction against.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Observation {
    /// `C·x`, where `x` follows the prediction rule but is never corrected.
    #[default]
    Synthesized,
    /// The raw measurement, which reduces the filter to the textbook 1-D form.
    Measured,
}
