//! The two IDA* searches. Phase 1 brings the cube into G1 using all 18
//! moves, phase 2 solves a G1 cube with the 10 moves that stay in G1.

use super::*;
use std::time::Instant;

/// Any legal cube reaches G1 within this many moves.
pub const MAX_PHASE1: usize = 12;
/// Any G1 cube is solved within this many phase-2 moves.
pub const MAX_PHASE2: usize = 18;
/// Any legal cube is solved within this many moves. Phase 1 keeps deepening
/// up to it since the shortest G1 paths do not always lead to such a total.
pub const MAX_LENGTH: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Deadline, cancellation and node accounting shared by both phases of one
/// solve.
pub struct Budget<'a> {
    /// `None` when the deadline lies beyond what `Instant` can represent.
    deadline: Option<Instant>,
    cancel: Option<&'a CancelToken>,
    nodes: u64,
    expired: bool,
}

impl<'a> Budget<'a> {
    pub fn new(deadline: Option<Instant>, cancel: Option<&'a CancelToken>) -> Self {
        Self {
            deadline,
            cancel,
            nodes: 0,
            expired: false,
        }
    }

    /// Counts one expanded node; `false` once the search must unwind.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.nodes += 1;
        if !self.expired
            && (self.deadline.map_or(false, |d| Instant::now() >= d)
                || self.cancel.map_or(false, |c| c.is_cancelled()))
        {
            self.expired = true;
        }
        !self.expired
    }

    pub fn expired(&self) -> bool {
        self.expired
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

pub struct Phase1Search<'a> {
    tables: &'a Tables,
    start: CubieCube,
    path: Vec<Move>,
}

impl<'a> Phase1Search<'a> {
    pub fn new(tables: &'a Tables, start: CubieCube) -> Self {
        Self {
            tables,
            start,
            path: Vec::with_capacity(MAX_LENGTH),
        }
    }

    /// Raises the bound from the pruning estimate up to `MAX_LENGTH`, handing
    /// every path that ends in G1 exactly at the bound to `found` together
    /// with the resulting cube. Returns `Flow::Stop` as soon as `found` asks
    /// for it or the budget runs out, `Flow::Continue` once all bounds are
    /// exhausted.
    pub fn run<F>(&mut self, budget: &mut Budget, mut found: F) -> Flow
    where
        F: FnMut(&[Move], &CubieCube, &mut Budget) -> Flow,
    {
        let coord = Phase1Coord::from_cubie(&self.start);
        let lower = self.tables.phase1_bound(coord) as usize;

        for depth in lower..=MAX_LENGTH {
            debug!("phase 1 depth {} ({} nodes so far)", depth, budget.nodes());
            self.path.clear();
            if self.dfs(coord, depth, budget, &mut found) == Flow::Stop {
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    fn dfs<F>(&mut self, c: Phase1Coord, togo: usize, budget: &mut Budget, found: &mut F) -> Flow
    where
        F: FnMut(&[Move], &CubieCube, &mut Budget) -> Flow,
    {
        if !budget.tick() {
            return Flow::Stop;
        }
        if togo == 0 {
            // a path ending in a G1 move was already handed over one bound earlier
            if c.is_goal() && self.path.last().map_or(true, |mv| !mv.is_phase2()) {
                let g1 = self.start.apply_seq(&self.path);
                return found(&self.path, &g1, budget);
            }
            return Flow::Continue;
        }

        let prev = self.path.last().copied();
        for mv in Move::MOV_SET {
            if !mv.follows(prev) {
                continue;
            }
            let next = self.tables.phase1_move(c, mv.index());
            if self.tables.phase1_bound(next) as usize >= togo {
                continue;
            }
            self.path.push(mv);
            let flow = self.dfs(next, togo - 1, budget, found);
            self.path.pop();
            if flow == Flow::Stop {
                return Flow::Stop;
            }
        }
        Flow::Continue
    }
}

pub struct Phase2Search<'a> {
    tables: &'a Tables,
    path: Vec<Move>,
}

impl<'a> Phase2Search<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self {
            tables,
            path: Vec::with_capacity(MAX_PHASE2),
        }
    }

    /// Shortest phase-2 solution of at most `max_depth` moves for a G1 cube.
    /// `None` when there is none within the bound or the budget ran out.
    pub fn run(&mut self, cube: &CubieCube, max_depth: usize, budget: &mut Budget) -> Option<Vec<Move>> {
        let coord = Phase2Coord::from_cubie(cube);
        let lower = self.tables.phase2_bound(coord) as usize;

        for depth in lower..=max_depth.min(MAX_PHASE2) {
            self.path.clear();
            if self.dfs(coord, depth, budget) {
                return Some(self.path.clone());
            }
            if budget.expired() {
                return None;
            }
        }
        None
    }

    fn dfs(&mut self, c: Phase2Coord, togo: usize, budget: &mut Budget) -> bool {
        if !budget.tick() {
            return false;
        }
        if togo == 0 {
            return c.is_goal();
        }

        let last = self.path.last().copied();
        for (k, mv) in Move::PHASE2_SET.iter().enumerate() {
            if !mv.follows(last) {
                continue;
            }
            let next = self.tables.phase2_move(c, k);
            if self.tables.phase2_bound(next) as usize >= togo {
                continue;
            }
            self.path.push(*mv);
            if self.dfs(next, togo - 1, budget) {
                return true;
            }
            self.path.pop();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::shared_tables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn budget() -> Budget<'static> {
        Budget::new(Instant::now().checked_add(Duration::from_secs(60)), None)
    }

    #[test]
    fn phase1_hands_over_g1_cubes_only() {
        let tables = shared_tables();
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..5 {
            let cube = CubieCube::random(&mut rng);
            let mut handed = 0;
            let flow = Phase1Search::new(&tables, cube).run(&mut budget(), |path, g1, _| {
                assert!(g1.in_g1());
                assert_eq!(cube.apply_seq(path), *g1);
                assert!(path.len() <= MAX_LENGTH);
                handed += 1;
                if handed == 3 {
                    Flow::Stop
                } else {
                    Flow::Continue
                }
            });
            assert_eq!(flow, Flow::Stop);
        }
    }

    #[test]
    fn phase1_of_g1_cube_is_empty() {
        let tables = shared_tables();
        let (cube, _) = CubieCube::from_rand(20, 1, &mut StdRng::seed_from_u64(1));
        let mut first = None;

        Phase1Search::new(&tables, cube).run(&mut budget(), |path, _, _| {
            first = Some(path.to_vec());
            Flow::Stop
        });
        assert_eq!(first, Some(vec![]));
    }

    #[test]
    fn phase2_finds_shortest_g1_solution() {
        let tables = shared_tables();
        let cube = CubieCube::from_moves("U R2 D'").unwrap();
        let found = Phase2Search::new(&tables).run(&cube, MAX_PHASE2, &mut budget());

        let movs = found.unwrap();
        assert_eq!(movs.len(), 3);
        assert!(cube.apply_seq(&movs).is_solved());
        assert!(movs.iter().all(|mv| mv.is_phase2()));
    }

    #[test]
    fn phase2_respects_bound() {
        let tables = shared_tables();
        let cube = CubieCube::from_moves("U2 F2 D R2 U'").unwrap();

        assert_eq!(Phase2Search::new(&tables).run(&cube, 2, &mut budget()), None);
        let movs = Phase2Search::new(&tables)
            .run(&cube, MAX_PHASE2, &mut budget())
            .unwrap();
        assert!(movs.len() <= 5);
        assert!(cube.apply_seq(&movs).is_solved());
    }

    #[test]
    fn expired_budget_stops_immediately() {
        let tables = shared_tables();
        let cube = CubieCube::random(&mut StdRng::seed_from_u64(2));
        let mut expired = Budget::new(Some(Instant::now()), None);
        let mut calls = 0;

        let flow = Phase1Search::new(&tables, cube).run(&mut expired, |_, _, _| {
            calls += 1;
            Flow::Continue
        });
        assert_eq!(flow, Flow::Stop);
        assert_eq!(calls, 0);
        assert!(expired.expired());
    }

    #[test]
    fn open_deadline_only_ends_on_cancel() {
        let token = CancelToken::new();
        let mut open = Budget::new(None, Some(&token));

        assert!(open.tick());
        assert!(open.tick());
        token.cancel();
        assert!(!open.tick());
        assert!(open.expired());
        assert_eq!(open.nodes(), 3);
    }
}
