//! Shared types and enums used across the crate.
//! Includes `PixelLayout` (channel count and order of a buffer) and
//! `OutputFormat` (encoding used for results).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Channel count and ordering of an 8-bit pixel buffer.
///
/// Color buffers record their channel order explicitly: decoders differ
/// (OpenCV-style decoders hand out blue-green-red, the `image` crate red-green-blue)
/// and mixing them up silently shifts the luma weights.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize,
)]
pub enum PixelLayout {
    Gray,
    Rgb,
    Bgr,
}

impl PixelLayout {
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb | PixelLayout::Bgr => 3,
        }
    }
}

impl std::fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelLayout::Gray => write!(f, "Gray"),
            PixelLayout::Rgb => write!(f, "Rgb"),
            PixelLayout::Bgr => write!(f, "Bgr"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    PNG,
    JPEG, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::PNG => "png",
            OutputFormat::JPEG => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::PNG => "image/png",
            OutputFormat::JPEG => "image/jpeg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::PNG => write!(f, "PNG"),
            OutputFormat::JPEG => write!(f, "JPEG"),
        }
    }
}
