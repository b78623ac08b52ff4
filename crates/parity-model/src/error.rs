use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParityError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workbook '{workbook}': no usable data sheets found")]
    TablesNotFound { workbook: String },
    #[error("workbook '{workbook}': cannot determine the {side} identifier column")]
    IdentifierNotFound { workbook: String, side: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ParityError>;
