pub mod board;
pub mod piece;
pub mod snapshot;
pub mod state;

pub use board::{Board, Cell};
pub use piece::{Bag, Piece, Shape, Tint};
pub use snapshot::{HoldPreview, Snapshot};
pub use state::Game;

/// What the game loop needs from a falling-piece board.
pub trait Engine {
    fn generate_piece(&mut self);
    fn move_piece(&mut self, dx: i32, dy: i32) -> bool;
    fn rotate_piece(&mut self, clockwise: bool) -> bool;
    /// Gravity step: one row down, locking on contact.
    fn drop_piece(&mut self);
    fn full_drop_piece(&mut self);
    fn hold_piece(&mut self);
    fn is_game_over(&self) -> bool;
    fn score(&self) -> u64;
    fn level(&self) -> u32;
    fn snapshot(&self) -> Snapshot;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn generate_piece(&mut self) {
        (**self).generate_piece()
    }

    fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        (**self).move_piece(dx, dy)
    }

    fn rotate_piece(&mut self, clockwise: bool) -> bool {
        (**self).rotate_piece(clockwise)
    }

    fn drop_piece(&mut self) {
        (**self).drop_piece()
    }

    fn full_drop_piece(&mut self) {
        (**self).full_drop_piece()
    }

    fn hold_piece(&mut self) {
        (**self).hold_piece()
    }

    fn is_game_over(&self) -> bool {
        (**self).is_game_over()
    }

    fn score(&self) -> u64 {
        (**self).score()
    }

    fn level(&self) -> u32 {
        (**self).level()
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}
