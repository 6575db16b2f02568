//! Math types used throughout the crate, which are re-exported from `cgmath`.

pub use cgmath::*;

pub mod prelude {
    pub use cgmath::{
        Array, ElementWise, InnerSpace, Matrix, One, Rotation, Rotation3, SquareMatrix, Zero,
    };
    pub use cgmath::{Deg, Euler, Matrix3, Matrix4, Quaternion, Rad, Vector3, Vector4};
}
