//! Core building blocks: the pixel buffer, service parameters, and the
//! processing stages. These are consumed by the high-level `api` module.
pub mod buffer;
pub mod params;
pub mod processing;
