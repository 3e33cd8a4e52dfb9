pub mod distances2;
pub mod polygon;
pub mod transform;
