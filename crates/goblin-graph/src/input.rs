//! Line parsing for prompts

use gg_core::ritual::Move;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveInputError {
    #[error("Enter exactly two integers like: 1 0")]
    NotTwoNumbers,

    #[error("No negative numbers, gremlin.")]
    Negative,
}

/// "1 0" or "1,0" into a ritual move
pub fn parse_move(line: &str) -> Result<Move, MoveInputError> {
    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [left, right] = parts.as_slice() else {
        return Err(MoveInputError::NotTwoNumbers);
    };
    let left: i64 = left.parse().map_err(|_| MoveInputError::NotTwoNumbers)?;
    let right: i64 = right.parse().map_err(|_| MoveInputError::NotTwoNumbers)?;
    if left < 0 || right < 0 {
        return Err(MoveInputError::Negative);
    }
    let left = u32::try_from(left).map_err(|_| MoveInputError::NotTwoNumbers)?;
    let right = u32::try_from(right).map_err(|_| MoveInputError::NotTwoNumbers)?;
    Ok(Move::new(left, right))
}

pub fn parse_guess(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

/// 1-based menu choice into a 0-based index below `len`
pub fn parse_menu_index(line: &str, len: usize) -> Option<usize> {
    let choice: usize = line.trim().parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}
