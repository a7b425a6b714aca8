//! Text exchange formats.

pub mod coordinate;
pub use coordinate::{
    MATRIX_TAG, VECTOR_TAG, decode_residual_history, decode_vector, encode_matrix_with_vector,
    encode_vector,
};
