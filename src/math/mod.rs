mod ortho;
mod rotation;

pub use ortho::orthonormalize;
pub use rotation::rotation_matrix;
