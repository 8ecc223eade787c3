use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Required column '{0}' not found in table")]
    ColumnNotFound(String),

    #[error("Column '{column}' cannot be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Unsupported dtype '{dtype}' for the 'date' column")]
    DateType { dtype: String },

    #[error("Unparsable date '{value}' in the 'date' column")]
    DateParse { value: String },

    #[error("Null {field} at row {row}")]
    NullValue { field: &'static str, row: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
