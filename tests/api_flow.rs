use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use pencilsketch::{
    Error, OutputFormat, ServiceParams, export_download, sketch_file_to_path,
    sketch_stages_to_dir, sketch_upload, write_report_sidecar,
};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

#[test]
fn upload_round_trip_returns_data_urls() {
    let bytes = png_bytes(30, 20);
    let output = sketch_upload(&bytes, "photo.png", &ServiceParams::default()).unwrap();

    let sketch = image::load_from_memory(&output.sketch.bytes).unwrap();
    assert_eq!((sketch.width(), sketch.height()), (30, 20));
    assert!(!output.report.resized);

    let json = output.to_response_json();
    assert_eq!(json["success"], true);
    assert!(json["sketch"].as_str().unwrap().starts_with("data:image/png;base64,"));
    assert!(json["original"].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[test]
fn large_uploads_are_capped_before_rendering() {
    let params = ServiceParams {
        max_dimension: Some(16),
        ..ServiceParams::default()
    };
    let output = sketch_upload(&png_bytes(64, 32), "wide.PNG", &params).unwrap();
    assert!(output.report.resized);
    assert_eq!((output.report.width, output.report.height), (16, 8));
    assert_eq!((output.report.original_width, output.report.original_height), (64, 32));
}

#[test]
fn bad_uploads_never_reach_the_renderer() {
    let params = ServiceParams::default();
    assert!(matches!(sketch_upload(b"", "a.png", &params), Err(Error::EmptyUpload)));
    assert!(matches!(sketch_upload(b"x", "", &params), Err(Error::NoFileSelected)));
    assert!(matches!(
        sketch_upload(b"x", "notes.txt", &params),
        Err(Error::UnsupportedFileType { .. })
    ));
    assert!(matches!(
        sketch_upload(b"not an image", "a.jpg", &params),
        Err(Error::Decode(_))
    ));
}

#[test]
fn download_export_writes_the_sketch_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let params = ServiceParams::default();
    let output = sketch_upload(&png_bytes(12, 12), "a.png", &params).unwrap();

    let file = export_download(&output.sketch.to_data_url(), dir.path(), &params).unwrap();
    assert_eq!(file.download_name, "pencil_sketch.png");
    assert_eq!(file.mime_type, "image/png");
    assert_eq!(std::fs::read(&file.path).unwrap(), output.sketch.bytes);
}

#[test]
fn file_flow_writes_outputs_report_and_stages() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, png_bytes(10, 6)).unwrap();

    let params = ServiceParams {
        output_format: OutputFormat::JPEG,
        seed: Some(3),
        ..ServiceParams::default()
    };
    let output = dir.path().join("out.jpg");
    let original = dir.path().join("orig.jpg");
    let report = sketch_file_to_path(&input, &output, Some(&original), &params).unwrap();
    assert_eq!(report.seed, 3);
    assert_eq!(report.output.as_deref(), Some(output.as_path()));
    assert!(image::load_from_memory(&std::fs::read(&output).unwrap()).is_ok());
    assert!(original.exists());

    let sidecar = write_report_sidecar(&output, &report).unwrap();
    assert_eq!(sidecar, dir.path().join("out.json"));

    let stages = sketch_stages_to_dir(&input, &dir.path().join("stages"), &params).unwrap();
    assert_eq!(stages.len(), 5);
    assert!(stages[4].ends_with("4_sketch.png"));
    assert!(stages.iter().all(|p| p.exists()));
}
