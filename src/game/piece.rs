use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

pub const ALL_SHAPES: [Shape; 7] = [
    Shape::I,
    Shape::O,
    Shape::T,
    Shape::S,
    Shape::Z,
    Shape::J,
    Shape::L,
];

/// Fill colour of a locked or falling cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

impl Shape {
    pub fn tint(self) -> Tint {
        match self {
            Shape::I => Tint::Cyan,
            Shape::O => Tint::Yellow,
            Shape::T => Tint::Magenta,
            Shape::S => Tint::Green,
            Shape::Z => Tint::Red,
            Shape::J => Tint::Blue,
            Shape::L => Tint::Orange,
        }
    }
}

pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn cells(&self) -> Vec<(i32, i32)> {
        shape_offsets(self.shape, self.rotation)
            .iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    pub fn rotated(&self, clockwise: bool) -> Self {
        let mut next = self.clone();
        next.rotation = if clockwise {
            (next.rotation + 1) % 4
        } else {
            (next.rotation + 3) % 4
        };
        next
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.x += dx;
        next.y += dy;
        next
    }
}

/// Seven-bag generator: every shape once per bag, bag order shuffled.
pub struct Bag {
    rng: StdRng,
    pending: Vec<Shape>,
}

impl Bag {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            pending: Vec::new(),
        }
    }

    pub fn next_shape(&mut self) -> Shape {
        if self.pending.is_empty() {
            self.pending.extend_from_slice(&ALL_SHAPES);
            self.pending.shuffle(&mut self.rng);
        }
        self.pending.pop().unwrap_or(Shape::I)
    }
}

pub fn shape_offsets(shape: Shape, rotation: u8) -> &'static [(i32, i32)] {
    const I: [[(i32, i32); 4]; 4] = [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ];
    const O: [[(i32, i32); 4]; 4] = [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ];
    const T: [[(i32, i32); 4]; 4] = [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ];
    const S: [[(i32, i32); 4]; 4] = [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ];
    const Z: [[(i32, i32); 4]; 4] = [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ];
    const J: [[(i32, i32); 4]; 4] = [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ];
    const L: [[(i32, i32); 4]; 4] = [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ];

    let r = (rotation % 4) as usize;
    match shape {
        Shape::I => &I[r],
        Shape::O => &O[r],
        Shape::T => &T[r],
        Shape::S => &S[r],
        Shape::Z => &Z[r],
        Shape::J => &J[r],
        Shape::L => &L[r],
    }
}
