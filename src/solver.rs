use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag a caller can raise to abandon running solves.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug)]
pub struct SolveOptions {
    /// The search returns as soon as a solution this short is found.
    pub max_moves: usize,
    pub time_limit: Duration,
    pub cancel: Option<CancelToken>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_moves: 20,
            time_limit: Duration::from_secs(5),
            cancel: None,
        }
    }
}

/// Input of a solve: raw stickers straight from an input provider, or a
/// cube already at the piece level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CubeState {
    Stickers(Vec<Color>),
    Cubie(CubieCube),
}

impl CubeState {
    /// The legal cubie cube this state describes.
    pub fn validate(&self) -> Result<CubieCube, CubeError> {
        match self {
            CubeState::Stickers(colors) => FaceletCube::from_colors(colors)?.to_cubie(),
            CubeState::Cubie(cube) => cube.verify().map(|_| *cube),
        }
    }
}

impl From<CubieCube> for CubeState {
    fn from(cube: CubieCube) -> Self {
        CubeState::Cubie(cube)
    }
}

impl From<Vec<Color>> for CubeState {
    fn from(colors: Vec<Color>) -> Self {
        CubeState::Stickers(colors)
    }
}

impl From<FaceletCube> for CubeState {
    fn from(fc: FaceletCube) -> Self {
        CubeState::Stickers(fc.colors())
    }
}

/// Anything able to produce a cube state: a camera scan, manual entry, a
/// scramble.
pub trait CubeSource {
    fn cube_state(&self) -> Result<CubeState, CubeError>;
}

/// A scramble in standard notation, applied to a solved cube.
pub struct Scramble<'a>(pub &'a str);

impl CubeSource for Scramble<'_> {
    fn cube_state(&self) -> Result<CubeState, CubeError> {
        CubieCube::from_moves(self.0).map(CubeState::Cubie)
    }
}

/// 54 stickers typed as face letters or color letters.
pub struct Facelets<'a>(pub &'a str);

impl CubeSource for Facelets<'_> {
    fn cube_state(&self) -> Result<CubeState, CubeError> {
        self.0.parse::<FaceletCube>().map(CubeState::from)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub moves: MoveSeq,
    /// How many of `moves` bring the cube into G1.
    pub phase1_len: usize,
    pub elapsed: Duration,
    pub nodes: u64,
}

/// Most phase-2 moves worth trying after `p1` when the best solution so far
/// has `best_len` moves. A phase-1 path ends in a quarter turn of R, L, F or
/// B, which the first phase-2 move may join, saving one move.
fn phase2_limit(p1: &[Move], best_len: usize) -> usize {
    let seam = p1.last().map_or(0, |mv| !mv.is_phase2() as usize);

    (best_len + seam - 1 - p1.len()).min(MAX_PHASE2)
}

pub struct Solver {
    tables: Arc<TableBuilder>,
}

impl Solver {
    pub fn new(tables: Arc<TableBuilder>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TableBuilder {
        &self.tables
    }

    pub fn solve(&self, state: &CubeState, options: &SolveOptions) -> Result<MoveSeq, SolveError> {
        self.solve_report(state, options).map(|solution| solution.moves)
    }

    pub fn solve_source<S: CubeSource + ?Sized>(
        &self,
        source: &S,
        options: &SolveOptions,
    ) -> Result<Solution, SolveError> {
        self.solve_report(&source.cube_state()?, options)
    }

    pub fn solve_report(&self, state: &CubeState, options: &SolveOptions) -> Result<Solution, SolveError> {
        let cube = state.validate()?;
        let tables = self.tables.get()?;
        let start = Instant::now();
        let mut budget = Budget::new(start.checked_add(options.time_limit), options.cancel.as_ref());
        let mut phase2 = Phase2Search::new(tables);
        let mut best: Option<(Vec<Move>, usize)> = None;

        let flow = Phase1Search::new(tables, cube).run(&mut budget, |p1, g1, budget| {
            let best_len = best
                .as_ref()
                .map_or(MAX_LENGTH + MAX_PHASE2 + 1, |(movs, _)| movs.len());
            if p1.len() >= best_len {
                // every later phase-1 path is at least this long
                return Flow::Stop;
            }
            let improved = phase2
                .run(g1, phase2_limit(p1, best_len), budget)
                .map(|p2| (join_moves(p1, &p2), p2.len()))
                .filter(|(movs, _)| movs.len() < best_len);
            if let Some((movs, p2_len)) = improved {
                debug!(
                    "{} moves ({} + {}) after {} nodes",
                    movs.len(),
                    p1.len(),
                    p2_len,
                    budget.nodes()
                );
                let done = movs.len() <= options.max_moves;
                best = Some((movs, p1.len()));
                if done {
                    return Flow::Stop;
                }
            }
            if budget.expired() {
                Flow::Stop
            } else {
                Flow::Continue
            }
        });

        match best {
            Some((movs, phase1_len)) => {
                info!(
                    "Solved in {} moves, {:.3}s, {} nodes",
                    movs.len(),
                    start.elapsed().as_secs_f64(),
                    budget.nodes()
                );
                Ok(Solution {
                    moves: MoveSeq(movs),
                    phase1_len,
                    elapsed: start.elapsed(),
                    nodes: budget.nodes(),
                })
            }
            None if budget.expired() => Err(SolveError::Timeout),
            None => {
                debug_assert_eq!(flow, Flow::Continue);
                Err(SolveError::Unsolvable)
            }
        }
    }
}
