//! Fixed-length position history for one particle
//!
//! A ring buffer of exactly `N` positions, zero-filled at creation. Each
//! `push` drops the oldest entry and appends the newest, so reading from the
//! head always yields the last `N` positions oldest-first.

use super::states::NVec3;

#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<NVec3>,
    head: usize,         // index of the oldest entry
    written: usize,      // real positions pushed so far, saturating at N
    needs_redraw: bool,
}

impl Trail {
    /// Trail of `len` zero entries; `len` of zero is bumped to one
    pub fn new(len: usize) -> Self {
        Self {
            points: vec![NVec3::zeros(); len.max(1)],
            head: 0,
            written: 0,
            needs_redraw: false,
        }
    }

    /// Always the capacity; the buffer never shrinks or grows
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of entries that came from `push` rather than the zero fill
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn push(&mut self, p: NVec3) {
        self.points[self.head] = p;
        self.head = (self.head + 1) % self.points.len();
        self.written = (self.written + 1).min(self.points.len());
    }

    /// All `N` entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &NVec3> + '_ {
        self.points[self.head..].iter().chain(self.points[..self.head].iter())
    }

    /// Only the pushed entries, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &NVec3> + '_ {
        self.iter().skip(self.len() - self.written)
    }

    pub fn newest(&self) -> &NVec3 {
        let n = self.points.len();
        &self.points[(self.head + n - 1) % n]
    }

    pub fn oldest(&self) -> &NVec3 {
        &self.points[self.head]
    }

    /// Flat `x, y, z` buffer of length `3 * N`, oldest first
    pub fn to_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(3 * self.len());
        for p in self.iter() {
            out.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        out
    }

    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Read and clear the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
