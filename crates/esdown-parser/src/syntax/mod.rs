//! Syntax helpers shared by the binder and the lowering transforms.

pub mod transform_utils;
