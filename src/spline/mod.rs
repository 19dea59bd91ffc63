//! Stateless spline math used to tessellate path segments.

mod tessellate;

pub use tessellate::*;
