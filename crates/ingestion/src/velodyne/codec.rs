//! Raw frame byte packing
//!
//! Wide values are stored in a raw frame with one byte per raw row: the
//! little-endian bytes of the value at decoded row `r`, column `c` sit at raw
//! rows `r*K .. r*K + K` of column `c`, where `K` is the value width.
//! Getting the direction wrong still yields plausible numbers, so both
//! directions live here next to each other.

use byteorder::{ByteOrder, LittleEndian};
use contracts::{RawChannels, RawFrameLayout, Result, SensorError};
use image::GrayImage;
use ndarray::{s, Array2, ArrayView2};

/// Fixed-width integer stored little-endian down a column
pub trait LeWord: Copy {
    /// Raw rows per decoded row
    const BYTES: usize;

    fn read_le(buf: &[u8]) -> Self;

    fn write_le(self, buf: &mut [u8]);
}

impl LeWord for u16 {
    const BYTES: usize = 2;

    #[inline]
    fn read_le(buf: &[u8]) -> Self {
        LittleEndian::read_u16(buf)
    }

    #[inline]
    fn write_le(self, buf: &mut [u8]) {
        LittleEndian::write_u16(buf, self)
    }
}

impl LeWord for i64 {
    const BYTES: usize = 8;

    #[inline]
    fn read_le(buf: &[u8]) -> Self {
        LittleEndian::read_i64(buf)
    }

    #[inline]
    fn write_le(self, buf: &mut [u8]) {
        LittleEndian::write_i64(buf, self)
    }
}

/// Unpack a block of raw rows into decoded rows of `T`.
///
/// The block must hold a whole number of `T::BYTES`-row groups.
pub fn unpack_columns<T: LeWord>(block: ArrayView2<'_, u8>) -> Result<Array2<T>> {
    let (raw_rows, cols) = block.dim();
    if raw_rows % T::BYTES != 0 {
        return Err(SensorError::shape(format!(
            "block of {raw_rows} raw rows cannot hold {}-byte values",
            T::BYTES
        )));
    }

    let mut word = vec![0u8; T::BYTES];
    Ok(Array2::from_shape_fn((raw_rows / T::BYTES, cols), |(r, c)| {
        for (k, byte) in word.iter_mut().enumerate() {
            *byte = block[[r * T::BYTES + k, c]];
        }
        T::read_le(&word)
    }))
}

/// Inverse of [`unpack_columns`]
pub fn pack_columns<T: LeWord>(values: ArrayView2<'_, T>) -> Array2<u8> {
    let (rows, cols) = values.dim();
    let mut block = Array2::zeros((rows * T::BYTES, cols));
    let mut word = vec![0u8; T::BYTES];
    for ((r, c), value) in values.indexed_iter() {
        value.write_le(&mut word);
        for (k, byte) in word.iter().enumerate() {
            block[[r * T::BYTES + k, c]] = *byte;
        }
    }
    block
}

/// View a grayscale image as a (rows × columns) byte array
pub fn frame_view(image: &GrayImage) -> Result<ArrayView2<'_, u8>> {
    let shape = (image.height() as usize, image.width() as usize);
    ArrayView2::from_shape(shape, image.as_raw()).map_err(|e| SensorError::shape(e.to_string()))
}

/// Split a raw frame into its integer channels
pub fn decode_channels(layout: RawFrameLayout, frame: ArrayView2<'_, u8>) -> Result<RawChannels> {
    let (height, width) = frame.dim();
    if width == 0 {
        return Err(SensorError::shape("raw frame has no columns"));
    }
    layout.timestamp_rows(height)?;

    let intensities = frame.slice(s![layout.intensity_rows(), ..]).to_owned();
    let ranges = unpack_columns::<u16>(frame.slice(s![layout.range_rows(), ..]))?;
    let angles = unpack_columns::<u16>(frame.slice(s![layout.angle_rows(), ..]))?;
    let timestamps = unpack_columns::<i64>(frame.slice(s![layout.timestamp_start().., ..]))?;

    Ok(RawChannels {
        intensities,
        ranges,
        angles,
        timestamps,
    })
}

/// Pack integer channels into a raw frame image
pub fn encode_raw_frame(layout: RawFrameLayout, channels: &RawChannels) -> Result<GrayImage> {
    let rings = layout.rings();
    let cols = channels.columns();

    check_dim("intensities", channels.intensities.dim(), (rings, cols))?;
    check_dim("ranges", channels.ranges.dim(), (rings, cols))?;
    check_dim("angles", channels.angles.dim(), (1, cols))?;
    let timestamp_rows = channels.timestamps.nrows();
    if timestamp_rows == 0 {
        return Err(SensorError::shape("at least one timestamp row is required"));
    }
    check_dim("timestamps", channels.timestamps.dim(), (timestamp_rows, cols))?;

    let height = layout.height_for(timestamp_rows);
    let mut frame = Array2::<u8>::zeros((height, cols));
    frame
        .slice_mut(s![layout.intensity_rows(), ..])
        .assign(&channels.intensities);
    frame
        .slice_mut(s![layout.range_rows(), ..])
        .assign(&pack_columns(channels.ranges.view()));
    frame
        .slice_mut(s![layout.angle_rows(), ..])
        .assign(&pack_columns(channels.angles.view()));
    frame
        .slice_mut(s![layout.timestamp_start().., ..])
        .assign(&pack_columns(channels.timestamps.view()));

    let raw: Vec<u8> = frame.iter().copied().collect();
    GrayImage::from_raw(cols as u32, height as u32, raw)
        .ok_or_else(|| SensorError::shape("encoded frame does not match image dimensions"))
}

fn check_dim(name: &str, found: (usize, usize), expected: (usize, usize)) -> Result<()> {
    if found != expected {
        return Err(SensorError::shape(format!(
            "{name} has shape {found:?}, expected {expected:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::Rng;

    #[test]
    fn test_bytes_stack_down_columns() {
        // column 0 holds 0x0201, column 1 holds 0x0403
        let block = array![[0x01u8, 0x03], [0x02, 0x04]];
        let values = unpack_columns::<u16>(block.view()).unwrap();
        assert_eq!(values, array![[0x0201u16, 0x0403]]);
    }

    #[test]
    fn test_row_pairs_map_to_decoded_rows() {
        let block = array![[0xF4u8], [0x01], [0x28], [0x23]];
        let values = unpack_columns::<u16>(block.view()).unwrap();
        assert_eq!(values, array![[500u16], [9000]]);
    }

    #[test]
    fn test_i64_little_endian_column() {
        let ts: i64 = -2;
        let block = Array2::from_shape_vec((8, 1), ts.to_le_bytes().to_vec()).unwrap();
        let values = unpack_columns::<i64>(block.view()).unwrap();
        assert_eq!(values[[0, 0]], -2);
    }

    #[test]
    fn test_ragged_block_rejected() {
        let block = Array2::<u8>::zeros((3, 4));
        let err = unpack_columns::<u16>(block.view()).unwrap_err();
        assert!(matches!(err, SensorError::Shape { .. }));
    }

    #[test]
    fn test_pack_is_inverse_of_unpack() {
        let mut rng = rand::rng();
        let values = Array2::from_shape_fn((5, 7), |_| rng.random::<u16>());
        let packed = pack_columns(values.view());
        assert_eq!(packed.dim(), (10, 7));
        assert_eq!(unpack_columns::<u16>(packed.view()).unwrap(), values);
    }

    fn channels(rings: usize, cols: usize) -> RawChannels {
        RawChannels {
            intensities: Array2::from_shape_fn((rings, cols), |(r, c)| (r * 7 + c) as u8),
            ranges: Array2::from_shape_fn((rings, cols), |(r, c)| (r * 1000 + c) as u16),
            angles: Array2::from_shape_fn((1, cols), |(_, c)| (c * 100) as u16),
            timestamps: Array2::from_shape_fn((1, cols), |(_, c)| 1_400_000_000_000_000 + c as i64),
        }
    }

    #[test]
    fn test_encode_places_blocks_at_layout_rows() {
        let layout = RawFrameLayout::HDL32E;
        let image = encode_raw_frame(layout, &channels(32, 3)).unwrap();
        assert_eq!(image.height(), 106);
        assert_eq!(image.width(), 3);

        // ring 1, column 2: range 1002 = 0x03EA
        assert_eq!(image.get_pixel(2, 32 + 2).0[0], 0xEA);
        assert_eq!(image.get_pixel(2, 32 + 3).0[0], 0x03);
        // column 1 angle: 100 = 0x0064
        assert_eq!(image.get_pixel(1, 96).0[0], 0x64);
        assert_eq!(image.get_pixel(1, 97).0[0], 0x00);
        // intensity passthrough
        assert_eq!(image.get_pixel(2, 4).0[0], 30);
    }

    #[test]
    fn test_channels_round_trip() {
        let layout = RawFrameLayout::HDL32E;
        let original = channels(32, 16);
        let image = encode_raw_frame(layout, &original).unwrap();
        let decoded = decode_channels(layout, frame_view(&image).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_random_round_trip_with_extra_timestamp_rows() {
        let mut rng = rand::rng();
        let layout = RawFrameLayout::for_rings(4);
        let original = RawChannels {
            intensities: Array2::from_shape_fn((4, 9), |_| rng.random()),
            ranges: Array2::from_shape_fn((4, 9), |_| rng.random()),
            angles: Array2::from_shape_fn((1, 9), |_| rng.random_range(0..36000)),
            timestamps: Array2::from_shape_fn((2, 9), |_| rng.random()),
        };
        let image = encode_raw_frame(layout, &original).unwrap();
        assert_eq!(image.height() as usize, layout.height_for(2));
        let decoded = decode_channels(layout, frame_view(&image).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_rejects_mismatched_columns() {
        let mut bad = channels(32, 4);
        bad.angles = Array2::zeros((1, 3));
        let err = encode_raw_frame(RawFrameLayout::HDL32E, &bad).unwrap_err();
        assert!(err.to_string().contains("angles"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_short_frame() {
        let frame = Array2::<u8>::zeros((105, 10));
        let err = decode_channels(RawFrameLayout::HDL32E, frame.view()).unwrap_err();
        assert!(matches!(err, SensorError::Shape { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_width() {
        let frame = Array2::<u8>::zeros((106, 0));
        assert!(decode_channels(RawFrameLayout::HDL32E, frame.view()).is_err());
    }
}
