#![doc = r#"
pencilsketch: a deterministic pencil-sketch renderer for raster images.

The renderer turns a color (or gray) pixel buffer into a single-channel sketch
of the same size by combining multi-scale edge detection, directional stroke
shading, paper-grain texture and a fixed tonal curve. It powers the
`pencilsketch` CLI and can be embedded in your own Rust applications.

Pipeline
--------
1. Grayscale reduction (channel-order aware luma).
2. Edge extractor: Difference of Gaussians with a soft tanh threshold.
3. Directional shading: horizontal, vertical and isotropic strokes, each
   color-dodged against a blurred inverse, averaged.
4. Grain: Gaussian noise smoothed by a bilateral filter.
5. Tonal compositor: weighted blends, CLAHE, linear rescale, gamma 0.8,
   softening blur, highlight clamp, midtone darkening.

All thresholds, weights and kernel sizes are fixed; there are no tuning knobs.

Render a buffer
---------------
```rust
use pencilsketch::{PixelBuffer, PixelLayout, render_pencil_sketch};

fn main() -> pencilsketch::Result<()> {
    let image = PixelBuffer::from_raw(4, 2, PixelLayout::Rgb, vec![128; 4 * 2 * 3])?;
    let sketch = render_pencil_sketch(&image)?;
    assert_eq!((sketch.width(), sketch.height(), sketch.channels()), (4, 2, 1));
    Ok(())
}
```

Grain noise is seeded from the input pixels, so identical input always yields
identical output. Use `render_pencil_sketch_with_seed` or
`render_pencil_sketch_with_rng` to control the noise source explicitly.

Process an upload
-----------------
```rust,no_run
use pencilsketch::{ServiceParams, sketch_upload};

fn main() -> pencilsketch::Result<()> {
    let bytes = std::fs::read("/data/photo.jpg")?;
    let output = sketch_upload(&bytes, "photo.jpg", &ServiceParams::default())?;
    println!("{}", output.to_response_json());
    Ok(())
}
```

Error handling
--------------
All public functions return `pencilsketch::Result<T>`. The renderer only fails
with `Error::InvalidBuffer`; uploads are rejected up front with distinct
variants (`EmptyUpload`, `UnsupportedFileType`, `UploadTooLarge`, `Decode`).

```rust,no_run
use pencilsketch::{Error, ServiceParams, sketch_upload};

fn main() {
    match sketch_upload(b"", "photo.png", &ServiceParams::default()) {
        Ok(_) => {}
        Err(Error::EmptyUpload) => eprintln!("nothing uploaded"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — the pixel buffer, service parameters and the processing stages.
- [`io`] — upload validation, decoding and writers.
- [`types`] — shared enums (`PixelLayout`, `OutputFormat`).
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::buffer::{GrayImage, PixelBuffer};
pub use crate::core::params::ServiceParams;
pub use error::{Error, Result};
pub use types::{OutputFormat, PixelLayout};

// Renderer
pub use crate::core::processing::pipeline::{
    SketchStages, content_seed, render_pencil_sketch, render_pencil_sketch_with_rng,
    render_pencil_sketch_with_seed, render_stages_with_rng,
};

// Writers
pub use io::writers::EncodedImage;
pub use io::writers::download::DownloadFile;
pub use io::writers::report::{SketchReport, write_report_sidecar};

// High-level API re-exports
pub use api::{
    RenderedSketch, SketchOutput, export_download, render_buffer, sketch_file_to_path,
    sketch_stages_to_dir, sketch_upload,
};
