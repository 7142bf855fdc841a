//! Deterministic chess rules.
//!
//! Data flow: the notation codec builds a [`Position`], the pseudo-move
//! generator proposes moves, the legality filter keeps those that leave the
//! mover's king unattacked (using the attack detector), [`apply_move`]
//! produces the next position and [`game_status`] classifies it.
//!
//! Every operation takes a position by reference and returns new values;
//! there is no shared mutable state, so independent positions can be
//! processed from any number of threads.

pub mod attacks;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod mad_chess;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod session;
pub mod types;
pub mod uci;

// Re-export core game logic
pub use attacks::{is_square_attacked, piece_reaches};
pub use board::*;
pub use error::*;
pub use fen::{STARTPOS_FEN, parse_fen, to_fen};
pub use game::*;
pub use mad_chess::{MadChess, MadChessConfig};
pub use movegen::{legal_move_strings, legal_moves, legal_moves_from, legal_moves_into};
pub use perft::{divide, perft};
pub use rules::*;
pub use session::*;
pub use types::*;
pub use uci::*;
