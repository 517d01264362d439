//! # Frame Encoding
//!
//! A bulk frame is a fixed 512-byte prefix followed by the pixel payload.
//! The prefix is two 256-entry ramp tables (`0, 1, .., 255`), where the
//! first 16 entries of the first table are replaced by the frame header.

use crate::error::{DeviceError, DeviceResult};

/// Panel width in pixels.
pub const WIDTH: u32 = 320;
/// Panel height in pixels.
pub const HEIGHT: u32 = 240;
/// Bytes per 5-6-5 pixel.
pub const BYTES_PER_PIXEL: usize = 2;
/// Size of the pixel payload: `width * height * 2`.
pub const FRAME_PIXEL_BYTES: usize = WIDTH as usize * HEIGHT as usize * BYTES_PER_PIXEL;

/// Frame header, sent first.
pub const HEADER: [u8; 16] = [
    0x10, 0x0F, 0x00, 0x58, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3F, 0x01, 0xEF, 0x00, 0x0F,
];

/// Header plus both tables.
pub const PREFIX_LEN: usize = 512;

/// Size of one complete bulk write.
pub const FRAME_LEN: usize = PREFIX_LEN + FRAME_PIXEL_BYTES;

/// The fixed bytes in front of every frame.
pub const PREFIX: [u8; PREFIX_LEN] = build_prefix();

#[allow(clippy::cast_possible_truncation)]
const fn build_prefix() -> [u8; PREFIX_LEN] {
    let mut prefix = [0u8; PREFIX_LEN];
    let mut i = 0;
    while i < 256 {
        prefix[i] = i as u8;
        prefix[256 + i] = i as u8;
        i += 1;
    }
    let mut j = 0;
    while j < HEADER.len() {
        prefix[j] = HEADER[j];
        j += 1;
    }
    prefix
}

/// Scan order of the pixel payload on the wire.
///
/// Callers always hand over row-major pixels. `ColumnMajor` reorders them
/// top-to-bottom, left-to-right, which is how the panel scans natively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelOrder {
    /// Send the pixels as given.
    #[default]
    RowMajor,
    /// Transpose to column-major while encoding.
    ColumnMajor,
}

/// Checks `pixels` has exactly [`FRAME_PIXEL_BYTES`] bytes.
///
/// # Errors
///
/// [`DeviceError::FrameSize`] on any other length.
pub fn check_size(pixels: &[u8]) -> DeviceResult<()> {
    if pixels.len() == FRAME_PIXEL_BYTES {
        Ok(())
    } else {
        Err(DeviceError::FrameSize {
            expected: FRAME_PIXEL_BYTES,
            actual: pixels.len(),
        })
    }
}

/// Writes the complete bulk frame for `pixels` into `out`, replacing its contents.
///
/// # Errors
///
/// [`DeviceError::FrameSize`] if `pixels` is not exactly one frame; `out` is
/// left untouched.
pub fn encode(pixels: &[u8], order: PixelOrder, out: &mut Vec<u8>) -> DeviceResult<()> {
    check_size(pixels)?;
    out.clear();
    out.reserve(FRAME_LEN);
    out.extend_from_slice(&PREFIX);
    match order {
        PixelOrder::RowMajor => out.extend_from_slice(pixels),
        PixelOrder::ColumnMajor => {
            let width = WIDTH as usize;
            for x in 0..width {
                for y in 0..HEIGHT as usize {
                    let at = (y * width + x) * BYTES_PER_PIXEL;
                    out.extend_from_slice(&pixels[at..at + BYTES_PER_PIXEL]);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_layout() {
        assert_eq!(&PREFIX[..16], &HEADER);
        assert_eq!(PREFIX[16], 16);
        assert_eq!(PREFIX[255], 255);
        assert_eq!(PREFIX[256], 0);
        assert_eq!(PREFIX[511], 255);
    }

    #[test]
    fn test_encode_row_major() {
        let pixels: Vec<u8> = (0..FRAME_PIXEL_BYTES).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        encode(&pixels, PixelOrder::RowMajor, &mut out).unwrap();
        assert_eq!(out.len(), FRAME_LEN);
        assert_eq!(&out[..PREFIX_LEN], &PREFIX);
        assert_eq!(&out[PREFIX_LEN..], pixels.as_slice());
    }

    #[test]
    fn test_encode_column_major() {
        let mut pixels = vec![0u8; FRAME_PIXEL_BYTES];
        // Pixel (x=1, y=0) and (x=0, y=1).
        pixels[2..4].copy_from_slice(&[0xAA, 0xBB]);
        let row1 = WIDTH as usize * BYTES_PER_PIXEL;
        pixels[row1..row1 + 2].copy_from_slice(&[0xCC, 0xDD]);

        let mut out = Vec::new();
        encode(&pixels, PixelOrder::ColumnMajor, &mut out).unwrap();
        let payload = &out[PREFIX_LEN..];
        // Column 0: (0,0) then (0,1).
        assert_eq!(&payload[2..4], &[0xCC, 0xDD]);
        // Column 1 starts after HEIGHT pixels.
        let col1 = HEIGHT as usize * BYTES_PER_PIXEL;
        assert_eq!(&payload[col1..col1 + 2], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_wrong_size_leaves_output() {
        let mut out = vec![1, 2, 3];
        let err = encode(&[0; 10], PixelOrder::RowMajor, &mut out).unwrap_err();
        assert_eq!(err, DeviceError::FrameSize { expected: FRAME_PIXEL_BYTES, actual: 10 });
        assert_eq!(out, vec![1, 2, 3]);
    }
}
