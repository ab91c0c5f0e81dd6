//! Two-phase solver for the 3x3x3 cube.
//!
//! A cube state (54 stickers or a piece-level description) is validated,
//! projected onto integer coordinates and solved by two IDA* searches: the
//! first reaches the subgroup G1 = <U, D, R2, L2, F2, B2>, the second
//! finishes inside it. Move and pruning tables are built once, lazily, and
//! shared by every solve.
//!
//! ```no_run
//! use rubik_twophase::*;
//! use std::sync::Arc;
//!
//! let solver = Solver::new(Arc::new(TableBuilder::new(TableConfig::default())));
//! let cube = CubieCube::from_moves("R U R' U'").unwrap();
//! let movs = solver.solve(&cube.into(), &SolveOptions::default()).unwrap();
//! println!("{}", movs);
//! ```

mod coord;
mod cube;
mod error;
mod extractor;
mod facelet;
mod search;
mod solver;
mod table;
mod utils;

pub use coord::*;
pub use cube::*;
pub use error::*;
pub use extractor::*;
pub use facelet::*;
pub use search::*;
pub use solver::*;
pub use table::*;
pub use utils::*;

use colored::Colorize;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use Color::*;
use Corner::*;
use Edge::*;
use Face::*;
use Turn::*;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::OnceLock;

    static TABLES: OnceLock<Arc<Tables>> = OnceLock::new();

    /// One table set for the whole test binary.
    pub fn shared_tables() -> Arc<Tables> {
        TABLES
            .get_or_init(|| Arc::new(build_tables(TableConfig::default().threads).unwrap()))
            .clone()
    }
}
