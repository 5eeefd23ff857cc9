use super::Tint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Tint),
}

#[derive(Clone, Debug)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    /// True when `(x, y)` is inside the grid and empty.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (xu, yu) = (x as usize, y as usize);
        xu < self.width && yu < self.height && self.get(xu, yu) == Cell::Empty
    }

    fn row_full(&self, y: usize) -> bool {
        (0..self.width).all(|x| matches!(self.get(x, y), Cell::Filled(_)))
    }

    /// Removes every full row, shifting the rows above down. Returns the number cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let full: Vec<usize> = (0..self.height).filter(|&y| self.row_full(y)).collect();
        if full.is_empty() {
            return 0;
        }
        let mut kept = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            if full.contains(&y) {
                continue;
            }
            for x in 0..self.width {
                kept.push(self.get(x, y));
            }
        }
        let mut new_cells = vec![Cell::Empty; full.len() * self.width];
        new_cells.extend(kept);
        self.cells = new_cells;
        full.len()
    }
}
