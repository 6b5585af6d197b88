use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NurbsError {
    #[error("Dimension mismatch: {control_points} control points but {weights} weights")]
    DimensionMismatch {
        control_points: usize,
        weights: usize,
    },

    #[error("Singular evaluation at u = {parameter}: rational denominator is zero")]
    SingularEvaluation { parameter: f64 },

    #[error("Invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("Invalid degree: {0}")]
    InvalidDegree(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, NurbsError>;
