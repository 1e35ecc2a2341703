//! # Perft
//! Counts the leaves of the legal move tree down to a fixed depth. Comparing
//! the counts with published figures validates the move generator.

use std::time::Instant;

use super::position::Position;

/// Options of a perft run.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerftConfig {
    pub depth: u8,
    /// Runs every depth from 1 up to `depth`.
    pub iterative: bool,
    /// Counts the moves of the last ply instead of playing them.
    pub bulk_counting: bool,
    /// Prints the node count below each root move.
    pub divide: bool,
    /// Prints elapsed time and speed.
    pub bench: bool,
    /// Prints the position before counting. Disable when the output is parsed
    /// by another tool.
    pub show_board: bool,
}
impl PerftConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Counts the nodes of `position`, printing one line per depth. Returns
    /// the count at the deepest level.
    pub fn go(&self, position: &Position) -> u64 {
        if self.show_board {
            println!("{position}\n");
        }

        let mut nodes = 0;
        let first_depth = if self.iterative { 1 } else { self.depth };
        for depth in first_depth..=self.depth {
            if self.iterative && self.divide {
                println!("-- depth {depth}")
            }
            let start = Instant::now();
            nodes = if depth == 0 {
                1
            } else {
                position
                    .actions()
                    .iter()
                    .map(|&action| {
                        let action_nodes =
                            perft(&position.play(action), depth - 1, self.bulk_counting);
                        if self.divide {
                            println!("{action}: {action_nodes} nodes");
                        }
                        action_nodes
                    })
                    .sum()
            };
            let seconds = start.elapsed().as_secs_f64();
            if self.bench {
                println!(
                    "depth {depth}: {nodes} nodes in {}s ({}nps)",
                    with_si_prefix(seconds),
                    with_si_prefix(nodes as f64 / seconds)
                );
            } else {
                println!("depth {depth}: {nodes} nodes");
            }
        }
        nodes
    }
}

/// Number of leaves of the legal move tree of `position`, `depth_left` plies deep.
pub fn perft(position: &Position, depth_left: u8, bulk_counting: bool) -> u64 {
    if depth_left == 0 {
        1
    } else if depth_left == 1 && bulk_counting {
        position.actions().len() as u64
    } else {
        position
            .actions()
            .iter()
            .map(|&action| perft(&position.play(action), depth_left - 1, bulk_counting))
            .sum()
    }
}

/// Formats a quantity with three decimals and a metric prefix.
fn with_si_prefix(value: f64) -> String {
    const PREFIXES: [(f64, &str); 6] = [
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "K"),
        (1., ""),
        (1e-3, "m"),
        (1e-6, "μ"),
    ];
    let (scale, prefix) = PREFIXES
        .into_iter()
        .find(|&(scale, _)| value >= scale)
        .unwrap_or((1e-9, "n"));
    format!("{:.3}{prefix}", value / scale)
}
