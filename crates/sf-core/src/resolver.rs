//! Target resolution
//!
//! Turns an operator-supplied target specification (`latest`, `+N`, `-N`,
//! or an absolute version) into a concrete direction and end version,
//! relative to the currently recorded version. Pure: no filesystem, no
//! database.

use crate::error::{CoreError, CoreResult};
use crate::migration::Direction;

/// Resolved migration plan: which way to go and where to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub direction: Direction,
    pub end_version: i64,
}

/// Resolve `target` against the recorded `current` version and the highest
/// known `latest` version.
///
/// Rejections carry no side effects; nothing has touched the database when
/// a target is refused, so the operator can simply re-run with a fixed one.
pub fn resolve(current: i64, latest: i64, target: &str) -> CoreResult<Plan> {
    if current < 0 || current > latest {
        return Err(CoreError::InvalidVersionState { current, latest });
    }

    let plan = if target == "latest" {
        Plan {
            direction: Direction::Up,
            end_version: latest,
        }
    } else if let Some(rest) = target.strip_prefix('-') {
        // Saturating: an offset past the i64 range still lands outside
        // [0, latest] and falls through to the range check below.
        Plan {
            direction: Direction::Down,
            end_version: current.saturating_sub(parse_offset(rest, target)?),
        }
    } else if let Some(rest) = target.strip_prefix('+') {
        Plan {
            direction: Direction::Up,
            end_version: current.saturating_add(parse_offset(rest, target)?),
        }
    } else {
        let version: i64 = target.parse().map_err(|_| CoreError::InvalidTarget {
            target: target.to_string(),
        })?;

        if version == current {
            return Err(CoreError::AlreadyAtVersion { version });
        }
        Plan {
            direction: if version > current {
                Direction::Up
            } else {
                Direction::Down
            },
            end_version: version,
        }
    };

    if plan.end_version < 0 || plan.end_version > latest {
        return Err(CoreError::OutOfRange {
            version: plan.end_version,
            latest,
        });
    }

    Ok(plan)
}

/// Parse the numeric part of a `+N` / `-N` relative target
fn parse_offset(digits: &str, target: &str) -> CoreResult<i64> {
    let n: i64 = digits.parse().map_err(|_| CoreError::InvalidTarget {
        target: target.to_string(),
    })?;
    if n < 0 {
        // `+-3` and `--3` parse numerically but are not valid offsets
        return Err(CoreError::InvalidTarget {
            target: target.to_string(),
        });
    }
    Ok(n)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
