use crate::config::file::Parameters;
use crate::table::ExampleSet;
use crate::ErrorBox;

pub mod file;

/// Platform the operator runs inside: supplies parameters and the input table,
/// and receives the augmented table.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    fn parameters(&self) -> Result<Parameters, ErrorBox>;
    fn example_set(&mut self) -> Result<ExampleSet, ErrorBox>;
    fn deliver(&mut self, example_set: ExampleSet) -> Result<(), ErrorBox>;
}
