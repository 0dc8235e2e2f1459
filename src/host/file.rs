use crate::config::file::{Config, Parameters};
use crate::table::{csv, ExampleSet};
use crate::ErrorBox;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

/// Reads the example set from a file or stdin and writes the result to a file or stdout.
pub struct Host {
    config: Config,
}

impl Host {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl super::Host for Host {
    fn parameters(&self) -> Result<Parameters, ErrorBox> {
        Ok(self.config.parameters.clone())
    }

    fn example_set(&mut self) -> Result<ExampleSet, ErrorBox> {
        let input = &self.config.input;
        let set = match &input.path {
            Some(path) => {
                let file = File::open(path)
                    .map_err(|e| ErrorBox::from(format!("Unable to open '{path}': {e}")))?;
                csv::read(BufReader::new(file), &input.label, input.separator)?
            }
            None => csv::read(io::stdin().lock(), &input.label, input.separator)?,
        };

        log::debug!("Read {} examples", set.len());
        Ok(set)
    }

    fn deliver(&mut self, example_set: ExampleSet) -> Result<(), ErrorBox> {
        let separator = self.config.input.separator;
        match &self.config.output.path {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| ErrorBox::from(format!("Unable to create '{path}': {e}")))?;
                csv::write(BufWriter::new(file), &example_set, separator)?
            }
            None => csv::write(io::stdout().lock(), &example_set, separator)?,
        };

        Ok(())
    }
}
