//! Point cloud writers

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytes::{BufMut, BytesMut};
use contracts::{PointCloud, Result, SensorError, POINT_CHANNELS, POINT_STRIDE};
use tracing::{debug, instrument};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCloudFormat {
    /// Channel-major `f32` array
    Bin,
    /// Binary PLY
    Ply,
}

impl PointCloudFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "bin" => Some(Self::Bin),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Infer format from a path
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| SensorError::format_any(&["bin", "ply"], ext))
    }

    pub fn writer(self) -> Box<dyn PointCloudWriter> {
        match self {
            Self::Bin => Box::new(BinWriter),
            Self::Ply => Box::new(PlyWriter),
        }
    }
}

/// Serializes a point cloud to a byte stream
pub trait PointCloudWriter: Send + Sync {
    fn format(&self) -> PointCloudFormat;

    fn write(&self, cloud: &PointCloud, out: &mut dyn Write) -> std::io::Result<()>;
}

/// Writes the `.bin` layout: all x, all y, all z, all intensity
#[derive(Debug, Clone, Copy, Default)]
pub struct BinWriter;

impl PointCloudWriter for BinWriter {
    fn format(&self) -> PointCloudFormat {
        PointCloudFormat::Bin
    }

    fn write(&self, cloud: &PointCloud, out: &mut dyn Write) -> std::io::Result<()> {
        let mut buf = BytesMut::with_capacity(cloud.len() * POINT_CHANNELS * 4);
        // row-major iteration walks channel by channel
        for value in cloud.as_array().iter() {
            buf.put_f32_le(*value);
        }
        out.write_all(&buf)
    }
}

/// Writes binary little-endian PLY
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyWriter;

impl PointCloudWriter for PlyWriter {
    fn format(&self) -> PointCloudFormat {
        PointCloudFormat::Ply
    }

    fn write(&self, cloud: &PointCloud, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "ply")?;
        writeln!(out, "format binary_little_endian 1.0")?;
        writeln!(out, "element vertex {}", cloud.len())?;
        writeln!(out, "property float x")?;
        writeln!(out, "property float y")?;
        writeln!(out, "property float z")?;
        writeln!(out, "property float intensity")?;
        writeln!(out, "end_header")?;

        let points = cloud.to_points();
        let bytes: &[u8] = bytemuck::cast_slice(&points);
        debug_assert_eq!(bytes.len(), points.len() * POINT_STRIDE);
        if cfg!(target_endian = "little") {
            out.write_all(bytes)
        } else {
            let mut buf = BytesMut::with_capacity(bytes.len());
            for p in &points {
                buf.put_f32_le(p.x);
                buf.put_f32_le(p.y);
                buf.put_f32_le(p.z);
                buf.put_f32_le(p.intensity);
            }
            out.write_all(&buf)
        }
    }
}

/// Write a point cloud to `path`, choosing the format from its extension
#[instrument(name = "write_point_cloud", skip(cloud, path), fields(path = %path.display(), points = cloud.len()))]
pub fn write_point_cloud(path: &Path, cloud: &PointCloud) -> Result<PointCloudFormat> {
    let format = PointCloudFormat::from_path(path)?;
    let mut file = BufWriter::new(File::create(path)?);
    format.writer().write(cloud, &mut file)?;
    file.flush()?;
    debug!(format = ?format, "point cloud written");
    Ok(format)
}
