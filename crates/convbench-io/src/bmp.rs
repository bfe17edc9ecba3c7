//! BMP image format support
//!
//! Reads and writes uncompressed 24-bit Windows Bitmap (BMP) files.
//!
//! Every header field is decoded field-by-field from a little-endian byte
//! cursor rather than overlaying a packed struct, and every decoded field
//! (reserved ones included) is kept on the [`Bitmap`] so that encoding a
//! decoded file reproduces it byte-for-byte.
//!
//! The pixel data is taken to be exactly `width * height * 3` bytes at the
//! header-declared offset, with a row stride of `width * 3` and no 4-byte
//! row alignment. That matches the files this benchmark exchanges with its
//! collaborators; padded files are rejected territory, not silently
//! misread (see [`CodecError::UnsupportedFormat`]).

use crate::{CodecError, CodecResult};
use convbench_core::RasterImage;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// BMP file header size
const FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const INFO_HEADER_SIZE: usize = 40;

/// Magic signature, "BM"
const MAGIC: [u8; 2] = *b"BM";

/// The 14-byte BMP file header, minus the magic signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Declared total file size in bytes
    pub file_size: u32,
    /// First reserved field, preserved verbatim
    pub reserved1: u16,
    /// Second reserved field, preserved verbatim
    pub reserved2: u16,
    /// Offset from the start of the file to the pixel data
    pub pixel_offset: u32,
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared info header size (>= 40)
    pub header_size: u32,
    /// Signed width in pixels
    pub width: i32,
    /// Signed height in pixels
    pub height: i32,
    /// Color planes, normally 1
    pub planes: u16,
    /// Bits per pixel; only 24 is supported
    pub bits_per_pixel: u16,
    /// Compression flag; only 0 (uncompressed) is supported
    pub compression: u32,
    /// Declared pixel data size, preserved verbatim
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter
    pub x_pixels_per_meter: i32,
    /// Vertical resolution in pixels per meter
    pub y_pixels_per_meter: i32,
    /// Palette colors used
    pub colors_used: u32,
    /// Important palette colors
    pub colors_important: u32,
}

/// A decoded BMP file: both headers, any bytes between the headers and the
/// declared pixel offset, and the pixel buffer.
///
/// Keeping the headers and the gap around is what makes
/// `encode(decode(bytes))` reproduce `bytes` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// File header as decoded (or synthesized by [`Bitmap::new`])
    pub header: FileHeader,
    /// Info header as decoded (or synthesized by [`Bitmap::new`])
    pub info: InfoHeader,
    gap: Vec<u8>,
    image: RasterImage,
}

impl Bitmap {
    /// Wrap an image in canonical headers: pixel data at offset 54,
    /// reserved and resolution fields zeroed.
    pub fn new(image: RasterImage) -> Self {
        let pixel_bytes = image.pixels().len() as u32;
        let pixel_offset = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32;
        Self {
            header: FileHeader {
                file_size: pixel_offset + pixel_bytes,
                reserved1: 0,
                reserved2: 0,
                pixel_offset,
            },
            info: InfoHeader {
                header_size: INFO_HEADER_SIZE as u32,
                width: image.width() as i32,
                height: image.height() as i32,
                planes: 1,
                bits_per_pixel: 24,
                compression: 0,
                image_size: pixel_bytes,
                x_pixels_per_meter: 0,
                y_pixels_per_meter: 0,
                colors_used: 0,
                colors_important: 0,
            },
            gap: Vec::new(),
            image,
        }
    }

    /// The decoded pixel buffer.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Consume the bitmap and return the pixel buffer.
    pub fn into_image(self) -> RasterImage {
        self.image
    }

    /// Replace the pixel buffer, keeping the decoded headers.
    ///
    /// The replacement must have the same dimensions as the original, so
    /// the preserved headers stay truthful.
    pub fn replace_image(&mut self, image: RasterImage) -> CodecResult<()> {
        if image.width() != self.image.width() || image.height() != self.image.height() {
            return Err(convbench_core::Error::DimensionMismatch {
                expected: (self.image.width(), self.image.height()),
                actual: (image.width(), image.height()),
            }
            .into());
        }
        self.image = image;
        Ok(())
    }
}

/// Read exactly `buf.len()` bytes, reporting a short read as `Truncated`
/// with the byte counts.
fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> CodecResult<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(CodecError::Truncated {
                    expected: buf.len(),
                    actual: filled,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    Ok(())
}

fn u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn u32_le(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn i32_le(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Decode a BMP image from a reader.
pub fn decode<R: Read>(mut reader: R) -> CodecResult<Bitmap> {
    // File header (14 bytes)
    let mut file_header = [0u8; FILE_HEADER_SIZE];
    read_exact_or_truncated(&mut reader, &mut file_header)?;

    if file_header[0..2] != MAGIC {
        return Err(CodecError::NotABitmap);
    }

    let header = FileHeader {
        file_size: u32_le(&file_header, 2),
        reserved1: u16_le(&file_header, 6),
        reserved2: u16_le(&file_header, 8),
        pixel_offset: u32_le(&file_header, 10),
    };

    // Info header (40 bytes)
    let mut info_header = [0u8; INFO_HEADER_SIZE];
    read_exact_or_truncated(&mut reader, &mut info_header)?;

    let info = InfoHeader {
        header_size: u32_le(&info_header, 0),
        width: i32_le(&info_header, 4),
        height: i32_le(&info_header, 8),
        planes: u16_le(&info_header, 12),
        bits_per_pixel: u16_le(&info_header, 14),
        compression: u32_le(&info_header, 16),
        image_size: u32_le(&info_header, 20),
        x_pixels_per_meter: i32_le(&info_header, 24),
        y_pixels_per_meter: i32_le(&info_header, 28),
        colors_used: u32_le(&info_header, 32),
        colors_important: u32_le(&info_header, 36),
    };

    if info.header_size < INFO_HEADER_SIZE as u32 {
        return Err(CodecError::UnsupportedFormat(format!(
            "info header size {} < {}",
            info.header_size, INFO_HEADER_SIZE
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(CodecError::UnsupportedFormat(format!(
            "bit depth {} (only 24 bpp is supported)",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(CodecError::UnsupportedFormat(format!(
            "compression {} (only uncompressed is supported)",
            info.compression
        )));
    }
    if info.width <= 0 || info.height <= 0 {
        return Err(CodecError::UnsupportedFormat(format!(
            "non-positive dimensions {}x{}",
            info.width, info.height
        )));
    }

    let headers_end = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
    let pixel_offset = header.pixel_offset as usize;
    if pixel_offset < headers_end {
        return Err(CodecError::UnsupportedFormat(format!(
            "pixel data offset {pixel_offset} inside the headers"
        )));
    }

    // Bytes between the headers and the pixel data, kept for re-encoding
    let mut gap = vec![0u8; pixel_offset - headers_end];
    read_exact_or_truncated(&mut reader, &mut gap)?;

    let width = info.width as u32;
    let height = info.height as u32;
    let mut pixels = vec![0u8; width as usize * height as usize * convbench_core::CHANNELS];
    read_exact_or_truncated(&mut reader, &mut pixels)?;

    let image = RasterImage::from_pixels(width, height, pixels)?;
    Ok(Bitmap {
        header,
        info,
        gap,
        image,
    })
}

/// Encode a BMP image to a writer.
///
/// The headers (and any preserved gap bytes) are written exactly as they
/// were decoded, followed by the pixel buffer.
pub fn encode<W: Write>(bitmap: &Bitmap, mut writer: W) -> CodecResult<()> {
    let mut out = Vec::with_capacity(
        FILE_HEADER_SIZE + INFO_HEADER_SIZE + bitmap.gap.len() + bitmap.image.pixels().len(),
    );

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&bitmap.header.file_size.to_le_bytes());
    out.extend_from_slice(&bitmap.header.reserved1.to_le_bytes());
    out.extend_from_slice(&bitmap.header.reserved2.to_le_bytes());
    out.extend_from_slice(&bitmap.header.pixel_offset.to_le_bytes());

    out.extend_from_slice(&bitmap.info.header_size.to_le_bytes());
    out.extend_from_slice(&bitmap.info.width.to_le_bytes());
    out.extend_from_slice(&bitmap.info.height.to_le_bytes());
    out.extend_from_slice(&bitmap.info.planes.to_le_bytes());
    out.extend_from_slice(&bitmap.info.bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&bitmap.info.compression.to_le_bytes());
    out.extend_from_slice(&bitmap.info.image_size.to_le_bytes());
    out.extend_from_slice(&bitmap.info.x_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&bitmap.info.y_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&bitmap.info.colors_used.to_le_bytes());
    out.extend_from_slice(&bitmap.info.colors_important.to_le_bytes());

    out.extend_from_slice(&bitmap.gap);
    out.extend_from_slice(bitmap.image.pixels());

    writer.write_all(&out).map_err(CodecError::Write)?;
    writer.flush().map_err(CodecError::Write)?;
    Ok(())
}

/// Decode a BMP image from a file path.
pub fn decode_file<P: AsRef<Path>>(path: P) -> CodecResult<Bitmap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CodecError::NotFound(path.to_path_buf())
        } else {
            CodecError::Io(e)
        }
    })?;
    decode(BufReader::new(file))
}

/// Encode a BMP image to a file path.
pub fn encode_file<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> CodecResult<()> {
    let file = File::create(path.as_ref()).map_err(CodecError::Write)?;
    encode(bitmap, BufWriter::new(file))
}
