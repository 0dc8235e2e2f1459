//! Delimited text reader and writer for example sets.
//!
//! The first non-empty line names the attributes. Cells are kept exactly as written so
//! they can be passed through untouched, the label is parsed only when it is read.
//! Quoted fields are not supported.

use super::{Attribute, ExampleSet, Ontology, Schema, TableError, Value};
use itertools::Itertools;
use std::io::{BufRead, Write};

pub fn read<R: BufRead>(reader: R, label: &str, separator: char) -> Result<ExampleSet, TableError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l.trim_end_matches('\r').to_string())))
        .filter_ok(|(_, line)| !line.trim().is_empty());

    let header = match lines.next().transpose()? {
        Some((_, header)) => header,
        None => {
            return Err(TableError::Parse {
                line: 1,
                message: "missing header".to_string(),
            })
        }
    };

    let attributes = header
        .split(separator)
        .map(|name| {
            let ontology = if name.trim() == label {
                Ontology::Real
            } else {
                Ontology::Nominal
            };
            Attribute::new(name, ontology)
        })
        .collect_vec();
    let label = attributes
        .iter()
        .find(|a| a.ontology == Ontology::Real)
        .map(|a| a.name.clone());

    let mut set = ExampleSet::with_schema(Schema { attributes, label });

    for line in lines {
        let (line_num, line) = line?;
        let cells = line.split(separator).collect_vec();
        if cells.len() != set.attributes().len() {
            return Err(TableError::Parse {
                line: line_num,
                message: format!(
                    "expected {} values, got {}",
                    set.attributes().len(),
                    cells.len()
                ),
            });
        }

        set.push(
            cells
                .into_iter()
                .map(|cell| Value::Nominal(cell.to_string()))
                .collect(),
        )?;
    }

    Ok(set)
}

pub fn write<W: Write>(mut writer: W, set: &ExampleSet, separator: char) -> Result<(), TableError> {
    let separator = separator.to_string();

    writeln!(
        writer,
        "{}",
        set.attributes().iter().map(|a| &a.name).join(&separator)
    )?;
    for row in set.rows() {
        writeln!(writer, "{}", row.iter().map(format_value).join(&separator))?;
    }
    writer.flush()?;

    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Real(v) => v.to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Nominal(v) => v.clone(),
        Value::Missing => String::new(),
    }
}
