use crate::filter::Observation;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Input {
    pub path: Option<String>,
    pub label: String,
    pub separator: char,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Output {
    pub path: Option<String>,
}

/// Operator parameters under the names the host knows them by.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Parameters {
    #[serde(rename = "range of noise")]
    pub range_of_noise: Option<f64>,
    #[serde(rename = "constant A")]
    pub constant_a: f64,
    #[serde(rename = "constant B")]
    pub constant_b: f64,
    #[serde(rename = "constant C")]
    pub constant_c: f64,
    #[serde(rename = "start value of P")]
    pub start_value_of_p: f64,
    #[serde(rename = "define x0")]
    pub define_x0: bool,
    pub x0: Option<f64>,
    pub observation: Observation,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub input: Input,
    pub output: Output,
    pub parameters: Parameters,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            path: None,
            label: "label".to_string(),
            separator: ',',
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            range_of_noise: None,
            constant_a: 0.8,
            constant_b: 0.2,
            constant_c: 1.0,
            start_value_of_p: 1.0,
            define_x0: false,
            x0: None,
            observation: Observation::default(),
        }
    }
}
