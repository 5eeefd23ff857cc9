use crate::game::piece::shape_offsets;
use crate::game::{Bag, Board, Cell, Engine, HoldPreview, Piece, Shape, Snapshot};
use crate::{BOARD_H, BOARD_W};

const LINES_PER_LEVEL: u64 = 10;
const ROTATION_KICKS: [i32; 5] = [0, -1, 1, -2, 2];

pub struct Game {
    pub board: Board,
    pub current: Piece,
    pub active_piece: bool,
    pub hold: Option<Shape>,
    hold_used: bool,
    bag: Bag,
    pub game_over: bool,
    pub score: u64,
    pub lines_cleared: u64,
    pub level: u32,
}

impl Game {
    pub fn new() -> Self {
        Self::with_bag(Bag::new())
    }

    pub fn with_bag(bag: Bag) -> Self {
        Self {
            board: Board::new(BOARD_W, BOARD_H),
            current: Piece::spawn(Shape::I),
            active_piece: false,
            hold: None,
            hold_used: false,
            bag,
            game_over: false,
            score: 0,
            lines_cleared: 0,
            level: 1,
        }
    }

    pub fn can_place(&self, piece: &Piece) -> bool {
        piece.cells().into_iter().all(|(x, y)| self.board.is_free(x, y))
    }

    fn spawn(&mut self, shape: Shape) {
        let piece = Piece::spawn(shape);
        if self.can_place(&piece) {
            self.current = piece;
            self.active_piece = true;
        } else {
            self.current = piece;
            self.active_piece = false;
            self.game_over = true;
        }
    }

    fn lock_piece(&mut self) {
        let tint = self.current.shape.tint();
        for (x, y) in self.current.cells() {
            if x >= 0 && y >= 0 {
                let (xu, yu) = (x as usize, y as usize);
                if xu < self.board.width && yu < self.board.height {
                    self.board.set(xu, yu, Cell::Filled(tint));
                }
            }
        }
        self.active_piece = false;
        self.hold_used = false;
        let cleared = self.board.clear_full_rows() as u64;
        if cleared > 0 {
            self.add_score(cleared);
        }
        self.generate_piece();
    }

    fn add_score(&mut self, cleared: u64) {
        let add = match cleared {
            1 => 100,
            2 => 300,
            3 => 500,
            4 => 800,
            _ => 0,
        };
        self.score += add * u64::from(self.level);
        self.lines_cleared += cleared;
        self.level = (self.lines_cleared / LINES_PER_LEVEL) as u32 + 1;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Game {
    fn generate_piece(&mut self) {
        if self.game_over {
            return;
        }
        let shape = self.bag.next_shape();
        self.spawn(shape);
    }

    fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over || !self.active_piece {
            return false;
        }
        let next = self.current.shifted(dx, dy);
        if self.can_place(&next) {
            self.current = next;
            true
        } else {
            false
        }
    }

    fn rotate_piece(&mut self, clockwise: bool) -> bool {
        if self.game_over || !self.active_piece {
            return false;
        }
        let rotated = self.current.rotated(clockwise);
        for dx in ROTATION_KICKS {
            let next = rotated.shifted(dx, 0);
            if self.can_place(&next) {
                self.current = next;
                return true;
            }
        }
        false
    }

    fn drop_piece(&mut self) {
        if self.game_over || !self.active_piece {
            return;
        }
        if !self.move_piece(0, 1) {
            self.lock_piece();
        }
    }

    fn full_drop_piece(&mut self) {
        if self.game_over || !self.active_piece {
            return;
        }
        while self.move_piece(0, 1) {}
        self.lock_piece();
    }

    fn hold_piece(&mut self) {
        if self.game_over || !self.active_piece || self.hold_used {
            return;
        }
        self.hold_used = true;
        match self.hold.replace(self.current.shape) {
            Some(held) => self.spawn(held),
            None => self.generate_piece(),
        }
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty(self.board.width, self.board.height);
        for (slot, cell) in snapshot.cells.iter_mut().zip(&self.board.cells) {
            if let Cell::Filled(tint) = cell {
                *slot = Some(*tint);
            }
        }

        if self.active_piece {
            let tint = self.current.shape.tint();
            for (x, y) in self.current.cells() {
                if x >= 0 && y >= 0 {
                    let (xu, yu) = (x as usize, y as usize);
                    if xu < self.board.width && yu < self.board.height {
                        snapshot.cells[yu * self.board.width + xu] = Some(tint);
                    }
                }
            }
        }

        snapshot.score = self.score;
        snapshot.level = self.level;
        snapshot.hold = self.hold.map(|shape| HoldPreview {
            cells: shape_offsets(shape, 0).to_vec(),
            tint: shape.tint(),
        });
        snapshot
    }
}
