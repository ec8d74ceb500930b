use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum KindnessError {
    #[error("INVALID_PAGE_SIZE: page size must be positive, got {0}")]
    InvalidPageSize(usize),
    #[error("EMPTY_GRADE_TABLE: a grade table needs at least one band")]
    EmptyGradeTable,
    #[error("INVALID_MARKS: {0:?} is not a `min-max` range or `-`")]
    InvalidMarks(String),
    #[error("UNKNOWN_STATUS: {0:?} (expected Pending, Submitted, Graded or Overdue)")]
    UnknownStatus(String),
}

pub type KindnessResult<T> = Result<T, KindnessError>;
