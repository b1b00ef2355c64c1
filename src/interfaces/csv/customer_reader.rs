use crate::error::{ReservationError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a customer import file: `name, age, money`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CustomerRecord {
    pub name: String,
    pub age: i64,
    pub money: Decimal,
}

/// Reads customers to import from a CSV source.
///
/// Whitespace around fields is trimmed, so hand-written files with
/// `name, age, money` headers load as expected.
pub struct CustomerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CustomerReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes records; a malformed row yields an error without
    /// stopping the rest of the file.
    pub fn customers(self) -> impl Iterator<Item = Result<CustomerRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ReservationError::from))
    }
}
