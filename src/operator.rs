use crate::config::app::Parameters;
use crate::error::Error;
use crate::filter::Kalman;
use crate::host::Host;
use crate::table::{Attribute, Ontology, Schema, Value};
use std::time::Instant;

pub const RESULT_ATTRIBUTE: &str = "result";
pub const STATISTIC_ATTRIBUTE: &str = "statistic";

/// Output schema: the input schema followed by the estimate and direction statistic.
pub fn transform_metadata(schema: &Schema) -> Schema {
    let mut schema = schema.clone();
    schema
        .attributes
        .push(Attribute::new(RESULT_ATTRIBUTE, Ontology::Real));
    schema
        .attributes
        .push(Attribute::new(STATISTIC_ATTRIBUTE, Ontology::Integer));
    schema
}

pub fn run(host: &mut dyn Host) -> Result<(), Error> {
    let start = Instant::now();
    log::info!("Kalman filter start!");

    let parameters = Parameters::load(&host.parameters().map_err(Error::Host)?)?;
    let mut example_set = host.example_set().map_err(Error::Host)?;

    let label = example_set
        .label()
        .ok_or_else(|| Error::config("Input has no label attribute"))?;

    if let Some(taken) = example_set
        .attributes()
        .iter()
        .find(|a| [RESULT_ATTRIBUTE, STATISTIC_ATTRIBUTE].contains(&a.name.trim()))
    {
        return Err(Error::config(format!(
            "Input already has an attribute named '{}'",
            taken.name
        )));
    }

    let first = match parameters.x0 {
        Some(_) => None,
        None if example_set.is_empty() => None,
        None => Some(example_set.real(0, label)?),
    };
    let mut kalman = Kalman::initialize(&parameters, first)?;

    log::info!("x0 = {}", kalman.estimate());

    let output_schema = transform_metadata(&example_set.schema());
    log::debug!("Output attributes: {:?}", output_schema.attributes);

    let result = example_set.add_attribute(Attribute::new(RESULT_ATTRIBUTE, Ontology::Real));
    let statistic =
        example_set.add_attribute(Attribute::new(STATISTIC_ATTRIBUTE, Ontology::Integer));
    debug_assert_eq!(output_schema, example_set.schema());

    let mut matches = 0;
    for row in 0..example_set.len() {
        let z = example_set.real(row, label)?;
        let (estimate, direction_match) = kalman.step(z);

        example_set.set(row, result, Value::Real(estimate));
        example_set.set(row, statistic, Value::Integer(direction_match as i64));
        matches += direction_match as usize;
    }

    log::debug!(
        "Direction agreed in {} of {} examples, final variance {}",
        matches,
        example_set.len(),
        kalman.covariance()
    );

    host.deliver(example_set).map_err(Error::Host)?;

    log::info!(
        "Kalman filter ends! Duration: {} ms",
        start.elapsed().as_millis()
    );
    Ok(())
}
