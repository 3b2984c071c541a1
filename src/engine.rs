//! Play-time engine: a loaded memo table behind the move-request interface.
//!
//! The engine owns a complete [`MemoTable`] and never writes to it. Building
//! and persisting happen once, in [`Engine::open`], before any move is served.

use crate::games::tictactoe::{Cell, Move, MoveError, Player, Position};
use crate::memo::{MemoStore, MemoTable, ResolveError, StoreError, resolve_move_with_depth};
use crate::search::DEFAULT_DEPTH;
use tracing::{debug, error, info, instrument};

/// Failure to play a human move and answer it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RespondError {
    /// The human's move was rejected.
    #[display("{}", _0)]
    Move(MoveError),
    /// The engine's answer does not follow from the position it answers.
    #[display("Engine reply {} does not follow {}", reply, position)]
    IllegalReply {
        /// Position the engine was asked to answer.
        position: Position,
        /// What it answered with.
        reply: Position,
    },
}

impl std::error::Error for RespondError {}

impl From<MoveError> for RespondError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

/// Outcome of one human move and the engine's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// The human's move.
    pub human: Move,
    /// Position after the human's move.
    pub after_human: Position,
    /// Engine reply and the position it leads to, unless the human's move
    /// ended the game.
    pub reply: Option<(Move, Position)>,
}

impl Exchange {
    /// Position once both sides have moved (or the game ended).
    pub fn position(&self) -> Position {
        self.reply.map_or(self.after_human, |(_, pos)| pos)
    }
}

/// Move oracle backed by a precomputed memo table.
#[derive(Debug, Clone)]
pub struct Engine {
    table: MemoTable,
    search_depth: u8,
}

impl Engine {
    /// Wraps an already-built table.
    pub fn from_table(table: MemoTable) -> Self {
        Self {
            table,
            search_depth: DEFAULT_DEPTH,
        }
    }

    /// Sets the depth of the search used when the table has no answer.
    ///
    /// A depth of zero cannot pick a move and is raised to one ply.
    pub fn with_search_depth(mut self, search_depth: u8) -> Self {
        self.search_depth = search_depth.max(1);
        self
    }

    /// Loads the table from `store`, rebuilding and saving it when the file is
    /// missing, unreadable or incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if a rebuilt table cannot be saved.
    #[instrument(skip(store), fields(path = %store.path().display()))]
    pub fn open(store: &MemoStore) -> Result<Self, StoreError> {
        let table = store.load_or_default();
        if table.is_complete() {
            debug!(entries = table.len(), "Using stored memo table");
            return Ok(Self::from_table(table));
        }

        info!(entries = table.len(), "Memo table incomplete, enumerating");
        let table = MemoTable::build();
        store.save(&table)?;
        Ok(Self::from_table(table))
    }

    /// The backing table.
    pub fn table(&self) -> &MemoTable {
        &self.table
    }

    /// Recommended successor of `pos` for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::GameOver`] for terminal positions.
    pub fn reply(&self, pos: &Position) -> Result<Position, ResolveError> {
        resolve_move_with_depth(&self.table, pos, self.search_depth)
    }

    /// Applies the human's move at `cell`, then answers it if the game goes on.
    ///
    /// # Errors
    ///
    /// Returns [`RespondError::Move`] wrapping [`MoveError::GameOver`] if
    /// `pos` is already decided, or [`MoveError::SquareOccupied`] if `cell` is
    /// taken. `pos` is unchanged either way. Returns
    /// [`RespondError::IllegalReply`] if the engine's answer is not one move
    /// on from the human's.
    #[instrument(skip(self, pos, cell), fields(position = %pos, cell = %cell))]
    pub fn respond(&self, pos: &Position, cell: Cell) -> Result<Exchange, RespondError> {
        if pos.is_terminal() {
            return Err(MoveError::GameOver.into());
        }

        let human = Move::new(pos.to_move(), cell);
        let after_human = pos.apply_move(cell)?;

        let reply = match self.reply(&after_human) {
            Ok(next) => {
                let Some(mv) = after_human.move_to(&next) else {
                    error!(reply = %next, "Engine reply is not a legal move");
                    return Err(RespondError::IllegalReply {
                        position: after_human,
                        reply: next,
                    });
                };
                debug!(reply = %mv, "Engine replied");
                Some((mv, next))
            }
            Err(ResolveError::GameOver(_)) => None,
        };

        Ok(Exchange {
            human,
            after_human,
            reply,
        })
    }

    /// Value of `pos` under perfect play, positive when O wins.
    pub fn value(&self, pos: &Position) -> Option<i32> {
        self.table.lookup(pos).ok().map(|entry| entry.score())
    }

    /// Side that wins `pos` with perfect play, or `None` for a draw.
    pub fn predicted_winner(&self, pos: &Position) -> Option<Player> {
        match self.value(pos)?.signum() {
            1 => Some(Player::O),
            -1 => Some(Player::X),
            _ => None,
        }
    }
}
