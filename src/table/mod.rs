//! In-memory example set: typed attributes, an optional label attribute and row cells.

pub mod csv;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unable to read '{value}' as a number in row {row} of attribute '{attribute}'")]
    NotNumeric {
        row: usize,
        attribute: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ontology {
    Real,
    Integer,
    Nominal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub ontology: Ontology,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Integer(i64),
    Nominal(String),
    Missing,
}

/// Attribute layout of an example set, known before any row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleSet {
    attributes: Vec<Attribute>,
    label: Option<usize>,
    rows: Vec<Vec<Value>>,
}

impl Attribute {
    pub fn new(name: &str, ontology: Ontology) -> Self {
        Self {
            name: name.to_string(),
            ontology,
        }
    }
}

impl ExampleSet {
    pub fn new(attributes: Vec<Attribute>, label: Option<usize>) -> Self {
        Self {
            attributes,
            label,
            rows: Vec::default(),
        }
    }

    /// Builds a set from a schema; the label must name one of its attributes.
    pub fn with_schema(schema: Schema) -> Self {
        let label = schema
            .label
            .as_ref()
            .and_then(|label| schema.attributes.iter().position(|a| &a.name == label));
        Self::new(schema.attributes, label)
    }

    pub fn push(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.attributes.len() {
            return Err(TableError::Parse {
                line: self.rows.len() + 1,
                message: format!(
                    "expected {} values, got {}",
                    self.attributes.len(),
                    row.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn schema(&self) -> Schema {
        Schema {
            attributes: self.attributes.clone(),
            label: self.label.map(|i| self.attributes[i].name.clone()),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn label(&self) -> Option<usize> {
        self.label
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Appends an attribute with a missing value in every row and returns its index.
    pub fn add_attribute(&mut self, attribute: Attribute) -> usize {
        self.attributes.push(attribute);
        for row in &mut self.rows {
            row.push(Value::Missing);
        }
        self.attributes.len() - 1
    }

    pub fn value(&self, row: usize, attribute: usize) -> &Value {
        &self.rows[row][attribute]
    }

    /// Reads a cell as a number. Missing values, including empty and `?` text, read as NaN.
    pub fn real(&self, row: usize, attribute: usize) -> Result<f64, TableError> {
        match self.value(row, attribute) {
            Value::Real(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            Value::Missing => Ok(f64::NAN),
            Value::Nominal(v) => match v.trim() {
                "" | "?" => Ok(f64::NAN),
                text => text.parse().map_err(|_| TableError::NotNumeric {
                    row,
                    attribute: self.attributes[attribute].name.clone(),
                    value: v.clone(),
                }),
            },
        }
    }

    pub fn set(&mut self, row: usize, attribute: usize, value: Value) {
        self.rows[row][attribute] = value;
    }
}
