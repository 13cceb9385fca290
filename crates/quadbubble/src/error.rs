use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MenuError {
    #[error("Illegal quadrant location: {0}")]
    InvalidQuadrant(i32),
    #[error("Invalid {field} {value}: expected {expected}")]
    InvalidGeometry {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}
