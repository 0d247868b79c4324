//! I/O layer around the renderer: upload validation and decoding (`decode`),
//! and `writers` for PNG/JPEG encoding, data URLs, download files and
//! JSON report sidecars.
pub mod decode;
pub use decode::{decode_image, validate_upload};

pub mod writers;
pub use writers::{EncodedImage, encode_image};
