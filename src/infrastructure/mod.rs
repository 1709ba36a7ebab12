//! Adapters for the camera and codec ports. Everything here is in-memory
//! or pure computation; no hardware is touched.

pub mod camera;
pub mod codec;
