//! The pencil-sketch pipeline and its building blocks.
//!
//! Stage order: `grayscale` feeds `edges`, `shading` and `texture` (fan-out);
//! `compositor` combines their outputs (fan-in). `pipeline` wires the stages;
//! `kernel` holds the shared filters; `resize` is the pre-render size cap.
pub mod clahe;
pub mod compositor;
pub mod edges;
pub mod grayscale;
pub mod kernel;
pub mod pipeline;
pub mod resize;
pub mod shading;
pub mod texture;
pub mod tone;
