//! Flat binary point file format used by the plotter.
//!
//! File layout (little-endian):
//!   00  : i32     count
//!   04  : for each point: f32 x, f32 y
//!
//! Total size = 4 + count*8 bytes. No magic, no version, no padding.
//!
//! A truncated points block is rejected with `UnexpectedEof`; a negative
//! count is rejected with `InvalidData`. Trailing bytes after the last
//! record are ignored.

use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// Record size per point on the wire: two little-endian f32 values.
pub const POINT_RECORD_BYTES: usize = 8;

/// An ordered sequence of (x, y) pairs, immutable after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub points: Vec<[f32; 2]>,
}

/// Axis-aligned bounding box over a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl PointSet {
    pub fn new(points: Vec<[f32; 2]>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of all points, or `None` when empty.
    ///
    /// Metadata only; nothing downstream sizes the view from it.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut it = self.points.iter();
        let first = *it.next()?;
        let (mut min, mut max) = (first, first);

        for p in it {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }

        Some(Bounds { min, max })
    }
}

#[inline(always)]
fn need(buf: &[u8], want: usize) -> io::Result<()> {
    if buf.len() < want {
        Err(io::Error::new(ErrorKind::UnexpectedEof, "truncated point file"))
    } else {
        Ok(())
    }
}

#[inline(always)]
fn take<'a>(buf: &mut &'a [u8], n: usize) -> io::Result<&'a [u8]> {
    need(buf, n)?;
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

#[inline(always)]
fn le_i32(buf: &mut &[u8]) -> io::Result<i32> {
    let b = take(buf, 4)?;
    Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline(always)]
fn le_f32(buf: &mut &[u8]) -> io::Result<f32> {
    let b = take(buf, 4)?;
    Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[cold]
fn bad(msg: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg)
}

/// Parse a point file from a contiguous byte slice. This is the single
/// source of truth for parsing.
pub fn parse_points_bytes(mut p: &[u8]) -> io::Result<PointSet> {
    let count = le_i32(&mut p)?;
    if count < 0 {
        return Err(bad("negative point count"));
    }
    let count = count as usize;

    let bytes = count
        .checked_mul(POINT_RECORD_BYTES)
        .ok_or_else(|| bad("points size overflow"))?;
    need(p, bytes)?;

    let mut points = Vec::<[f32; 2]>::with_capacity(count);
    for _ in 0..count {
        let x = le_f32(&mut p)?;
        let y = le_f32(&mut p)?;
        points.push([x, y]);
    }

    Ok(PointSet { points })
}

/// Fast path: prefer mmap; fall back to a single read.
#[cfg(feature = "mmap")]
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<PointSet> {
    let file = File::open(path)?;
    let map = unsafe { memmap2::MmapOptions::new().map(&file)? };
    parse_points_bytes(&map)
}

#[cfg(not(feature = "mmap"))]
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<PointSet> {
    let bytes = std::fs::read(path)?;
    parse_points_bytes(&bytes)
}

/// Serialize a point set to a writer. Exact inverse of
/// [`parse_points_bytes`]; the round-trip is bit-exact.
pub fn write_points<W: Write>(w: &mut W, set: &PointSet) -> io::Result<()> {
    let count = i32::try_from(set.points.len())
        .map_err(|_| bad("point count exceeds i32"))?;

    w.write_all(&count.to_le_bytes())?;

    for p in &set.points {
        w.write_all(&p[0].to_le_bytes())?;
        w.write_all(&p[1].to_le_bytes())?;
    }

    Ok(())
}

pub fn write_file<P: AsRef<Path>>(path: P, set: &PointSet) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_points(&mut file, set)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes(set: &PointSet) -> Vec<u8> {
        let mut out = Vec::new();
        write_points(&mut out, set).unwrap();
        out
    }

    #[test]
    fn empty_file_loads() {
        let set = parse_points_bytes(&0i32.to_le_bytes()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.bounds(), None);
    }

    #[test]
    fn known_bytes_load_exactly() {
        // count=2, point1=(1.0, 0.0), point2=(-2.0, 1.0)
        let bytes: Vec<u8> = [
            [0x02, 0x00, 0x00, 0x00],
            [0x00, 0x00, 0x80, 0x3F],
            [0x00, 0x00, 0x00, 0x00],
            [0x00, 0x00, 0x00, 0xC0],
            [0x00, 0x00, 0x80, 0x3F],
        ]
        .concat();

        let set = parse_points_bytes(&bytes).unwrap();
        assert_eq!(set.points, vec![[1.0, 0.0], [-2.0, 1.0]]);
    }

    #[test]
    fn truncated_points_block_is_rejected() {
        // count=3 but the payload stops mid-record.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3i32.to_le_bytes());
        for v in [1.0f32, 2.0, 3.0, 4.0, 5.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }

        let err = parse_points_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = parse_points_bytes(&(-1i32).to_le_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn empty_header_is_rejected() {
        let err = parse_points_bytes(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = to_bytes(&PointSet::new(vec![[0.5, -0.5]]));
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let set = parse_points_bytes(&bytes).unwrap();
        assert_eq!(set.points, vec![[0.5, -0.5]]);
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let set = PointSet::new(vec![
            [0.0, -0.0],
            [f32::MIN_POSITIVE, f32::MAX],
            [1.5e-30, -7.25],
            [std::f32::consts::PI, -std::f32::consts::E],
        ]);

        let back = parse_points_bytes(&to_bytes(&set)).unwrap();
        assert_eq!(back.points.len(), set.points.len());
        for (a, b) in back.points.iter().zip(&set.points) {
            assert_eq!(a[0].to_bits(), b[0].to_bits());
            assert_eq!(a[1].to_bits(), b[1].to_bits());
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let set = PointSet::new(vec![[1.0, 2.0], [-3.0, 0.5], [0.0, 9.0]]);
        let b = set.bounds().unwrap();
        assert_eq!(b.min, [-3.0, 0.5]);
        assert_eq!(b.max, [1.0, 9.0]);
    }
}
