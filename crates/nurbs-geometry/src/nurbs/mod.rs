//! NURBS core algorithms: knot vector utilities and Cox-de Boor basis evaluation.

pub mod basis;
pub mod knot;

pub use basis::{
    all_basis_functions, all_basis_functions_local, basis_function, basis_function_batch,
    nonzero_basis_functions, LocalBasis,
};
pub use knot::{closing_span, find_span, is_non_decreasing, multiplicity, KnotVector};
