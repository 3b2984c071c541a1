//! Serving moves from the memo table.

use super::entry::MemoEntry;
use super::table::{LookupError, MemoTable};
use crate::games::tictactoe::Position;
use crate::search::{DEFAULT_DEPTH, best_move};
use tracing::{debug, instrument, warn};

/// Reasons no reply can be produced.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ResolveError {
    /// The position is already decided; there is nothing to play.
    #[display("Game is already over at {}", _0)]
    GameOver(Position),
}

impl std::error::Error for ResolveError {}

/// Returns the recommended successor of `pos`.
///
/// The recommended child is re-derived from [`Position::children`] using the
/// stored index. When the table has no usable entry (a miss, or a
/// depth-limited leaf) the reply comes from a full-depth search instead.
///
/// # Errors
///
/// Returns [`ResolveError::GameOver`] for terminal positions.
pub fn resolve_move(table: &MemoTable, pos: &Position) -> Result<Position, ResolveError> {
    resolve_move_with_depth(table, pos, DEFAULT_DEPTH)
}

/// [`resolve_move`] with an explicit fallback search depth.
///
/// The fallback always looks at least one ply ahead, so the reply is a child
/// of `pos` even for a depth of zero.
///
/// # Errors
///
/// Returns [`ResolveError::GameOver`] for terminal positions.
#[instrument(skip(table, pos), fields(position = %pos))]
pub fn resolve_move_with_depth(
    table: &MemoTable,
    pos: &Position,
    fallback_depth: u8,
) -> Result<Position, ResolveError> {
    if pos.is_terminal() {
        return Err(ResolveError::GameOver(*pos));
    }

    match table.lookup(pos) {
        Ok(MemoEntry::Branch { score, best_child }) => {
            let children = pos.children();
            if let Some(reply) = children.get(usize::from(best_child)) {
                debug!(score, best_child, reply = %reply, "Resolved from memo table");
                return Ok(*reply);
            }
            warn!(
                best_child,
                children = children.len(),
                "Memo entry points past the last child, searching instead"
            );
        }
        Ok(MemoEntry::Leaf { score }) => {
            debug!(score, "Memo entry has no move, searching instead");
        }
        Err(LookupError::NotFound(key)) => {
            warn!(key = %key, "Memo miss for reachable position, searching instead");
        }
    }

    Ok(best_move(pos, fallback_depth.max(1)))
}
