use super::Tint;

/// Held piece as the render pipeline sees it: rotation-0 offsets plus colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldPreview {
    pub cells: Vec<(i32, i32)>,
    pub tint: Tint,
}

/// Read model handed from the board engine to the renderer once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, active piece merged in.
    pub cells: Vec<Option<Tint>>,
    pub score: u64,
    pub level: u32,
    pub hold: Option<HoldPreview>,
}

impl Snapshot {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            score: 0,
            level: 1,
            hold: None,
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tint> {
        self.cells.get(y * self.width + x).copied().flatten()
    }
}
