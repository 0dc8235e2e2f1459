use super::file;
use crate::error::Error;
use crate::filter::Observation;
use std::fmt;

pub const PARAMETER_RANGE_OF_NOISE: &str = "range of noise";
pub const PARAMETER_CONSTANT_A: &str = "constant A";
pub const PARAMETER_CONSTANT_B: &str = "constant B";
pub const PARAMETER_CONSTANT_C: &str = "constant C";
pub const PARAMETER_START_VALUE_OF_P: &str = "start value of P";
pub const PARAMETER_DEFINE_START_VALUE: &str = "define x0";
pub const PARAMETER_START_VALUE: &str = "x0";

const CONSTANT_MIN: f64 = i32::MIN as f64;
const CONSTANT_MAX: f64 = i32::MAX as f64;

/// Validated parameter block, immutable for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub r: f64,
    pub p0: f64,
    /// Present only when `define x0` is set.
    pub x0: Option<f64>,
    pub observation: Observation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Real {
        min: f64,
        max: f64,
        default: Option<f64>,
    },
    Boolean {
        default: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterType {
    pub key: &'static str,
    pub description: &'static str,
    pub kind: Kind,
    /// Boolean parameter (and its value) that must hold for this one to be visible.
    pub condition: Option<(&'static str, bool)>,
}

pub fn parameter_types() -> Vec<ParameterType> {
    let constant = |key: &'static str, description: &'static str, default: f64| ParameterType {
        key,
        description,
        kind: Kind::Real {
            min: CONSTANT_MIN,
            max: CONSTANT_MAX,
            default: Some(default),
        },
        condition: None,
    };

    vec![
        ParameterType {
            key: PARAMETER_DEFINE_START_VALUE,
            description: "If checked, a custom x0 can be entered.",
            kind: Kind::Boolean { default: false },
            condition: None,
        },
        ParameterType {
            key: PARAMETER_START_VALUE,
            description: "Custom start value x0 of the estimate.",
            kind: Kind::Real {
                min: f64::MIN,
                max: f64::MAX,
                default: None,
            },
            condition: Some((PARAMETER_DEFINE_START_VALUE, true)),
        },
        constant(
            PARAMETER_CONSTANT_A,
            "Weight of the prior state in the prediction of xk.",
            0.8,
        ),
        constant(
            PARAMETER_CONSTANT_B,
            "Weight of the current measurement in the prediction of xk.",
            0.2,
        ),
        constant(
            PARAMETER_CONSTANT_C,
            "Measurement model gain mapping the state to zk.",
            1.0,
        ),
        ParameterType {
            key: PARAMETER_START_VALUE_OF_P,
            description: "Initial estimation error variance P0.",
            kind: Kind::Real {
                min: 0.0,
                max: CONSTANT_MAX,
                default: Some(1.0),
            },
            condition: None,
        },
        ParameterType {
            key: PARAMETER_RANGE_OF_NOISE,
            description: "Measurement noise variance R.",
            kind: Kind::Real {
                min: 0.0,
                max: CONSTANT_MAX,
                default: None,
            },
            condition: None,
        },
    ]
}

impl ParameterType {
    fn check(&self, value: f64) -> Result<f64, Error> {
        match self.kind {
            Kind::Real { min, max, .. } if !(min..=max).contains(&value) => Err(Error::config(
                format!(
                    "Parameter '{}' must be within [{}, {}], got {}",
                    self.key, min, max, value
                ),
            )),
            _ => Ok(value),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<18}", self.key)?;
        match self.kind {
            Kind::Real { min, max, default } => {
                write!(f, " real    [{:e}, {:e}]", min, max)?;
                match default {
                    Some(default) => write!(f, " default {}", default)?,
                    None => write!(f, " no default")?,
                }
            }
            Kind::Boolean { default } => write!(f, " boolean default {}", default)?,
        }
        if let Some((key, value)) = self.condition {
            write!(f, " (only when '{}' is {})", key, value)?;
        }
        write!(f, "\n    {}", self.description)
    }
}

impl Parameters {
    pub fn load(source: &file::Parameters) -> Result<Self, Error> {
        let types = parameter_types();
        let checked = |key: &str, value: f64| -> Result<f64, Error> {
            types
                .iter()
                .find(|t| t.key == key)
                .map_or(Ok(value), |t| t.check(value))
        };

        let x0 = match (source.define_x0, source.x0) {
            (true, Some(x0)) => Some(checked(PARAMETER_START_VALUE, x0)?),
            (true, None) => {
                return Err(Error::config(format!(
                    "Parameter '{}' is required when '{}' is set",
                    PARAMETER_START_VALUE, PARAMETER_DEFINE_START_VALUE
                )))
            }
            (false, _) => None,
        };

        let r = source.range_of_noise.ok_or_else(|| {
            Error::config(format!(
                "Parameter '{}' is not set",
                PARAMETER_RANGE_OF_NOISE
            ))
        })?;

        let parameters = Self {
            a: checked(PARAMETER_CONSTANT_A, source.constant_a)?,
            b: checked(PARAMETER_CONSTANT_B, source.constant_b)?,
            c: checked(PARAMETER_CONSTANT_C, source.constant_c)?,
            r: checked(PARAMETER_RANGE_OF_NOISE, r)?,
            p0: checked(PARAMETER_START_VALUE_OF_P, source.start_value_of_p)?,
            x0,
            observation: source.observation,
        };

        // exact comparison, 0.1 + 0.9 passes only because it rounds to 1.0
        if parameters.a + parameters.b != 1.0 {
            return Err(Error::config("Sum of constant A and B have to be 1!"));
        }

        Ok(parameters)
    }
}
