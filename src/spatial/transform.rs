use serde::{Deserialize, Serialize};

use crate::math::prelude::*;

/// `Transform` is used to store and manipulate the postiion, rotation and scale
/// of the object relative to its parent. We use a left handed, y-up world
/// coordinate system.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    #[inline]
    pub fn new<T1, T2, T3>(position: T1, rotation: T2, scale: T3) -> Self
    where
        T1: Into<Vector3<f32>>,
        T2: Into<Quaternion<f32>>,
        T3: Into<Vector3<f32>>,
    {
        Transform {
            position: position.into(),
            rotation: rotation.into(),
            scale: scale.into(),
        }
    }

    /// Creates a transform that only translates.
    #[inline]
    pub fn from_position<T>(position: T) -> Self
    where
        T: Into<Vector3<f32>>,
    {
        Transform {
            position: position.into(),
            ..Default::default()
        }
    }

    /// Returns the matrix representation.
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        // M = T * R * S
        let r: Matrix3<f32> = self.rotation.into();
        let rs = Matrix3::from_cols(r.x * self.scale.x, r.y * self.scale.y, r.z * self.scale.z);

        let mut m: Matrix4<f32> = rs.into();
        m.w = self.position.extend(1.0);
        m
    }

    /// Transforms direction from local space to transform's space.
    ///
    /// This operation is not affected by scale or position of the transform. The returned
    /// vector has the same length as direction.
    #[inline]
    pub fn transform_direction<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        self.rotation * v.into()
    }

    /// Transforms vector from local space to transform's space.
    ///
    /// This operation is not affected by position of the transform, but is is affected by scale.
    /// The returned vector may have a different length than vector.
    #[inline]
    pub fn transform_vector<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        self.rotation * v.into().mul_element_wise(self.scale)
    }

    /// Transforms points from local space to transform's space.
    #[inline]
    pub fn transform_point<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        self.transform_vector(v) + self.position
    }

    /// Returns the up direction in transform's space, which is looking down the positive y-axis.
    #[inline]
    pub fn up(&self) -> Vector3<f32> {
        self.transform_direction(Vector3::unit_y())
    }

    /// Returns the forward direction in transform's space, which is looking down the positive z-axis.
    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.transform_direction(Vector3::unit_z())
    }

    /// Returns the right direction in transform's space, which is looking down the positive x-axis.
    #[inline]
    pub fn right(&self) -> Vector3<f32> {
        self.transform_direction(Vector3::unit_x())
    }
}
