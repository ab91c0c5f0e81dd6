use super::*;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

pub const N_CORNER: usize = 8;
pub const N_EDGE: usize = 12;

/// Cube state at the piece level. `cp[i]` is the corner sitting in slot `i`,
/// `co[i]` its twist; `ep`/`eo` likewise for edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub cp: [u8; N_CORNER],
    pub co: [u8; N_CORNER],
    pub ep: [u8; N_EDGE],
    pub eo: [u8; N_EDGE],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; N_CORNER],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; N_EDGE],
    };

    /// Clockwise quarter turns of each face, in U R F D L B order.
    const BASIC: [CubieCube; 6] = [
        CubieCube {
            cp: [UBR as u8, URF as u8, UFL as u8, ULB as u8, DFR as u8, DLF as u8, DBL as u8, DRB as u8],
            co: [0, 0, 0, 0, 0, 0, 0, 0],
            ep: [
                UB as u8, UR as u8, UF as u8, UL as u8, DR as u8, DF as u8, DL as u8, DB as u8,
                FR as u8, FL as u8, BL as u8, BR as u8,
            ],
            eo: [0; N_EDGE],
        },
        CubieCube {
            cp: [DFR as u8, UFL as u8, ULB as u8, URF as u8, DRB as u8, DLF as u8, DBL as u8, UBR as u8],
            co: [2, 0, 0, 1, 1, 0, 0, 2],
            ep: [
                FR as u8, UF as u8, UL as u8, UB as u8, BR as u8, DF as u8, DL as u8, DB as u8,
                DR as u8, FL as u8, BL as u8, UR as u8,
            ],
            eo: [0; N_EDGE],
        },
        CubieCube {
            cp: [UFL as u8, DLF as u8, ULB as u8, UBR as u8, URF as u8, DFR as u8, DBL as u8, DRB as u8],
            co: [1, 2, 0, 0, 2, 1, 0, 0],
            ep: [
                UR as u8, FL as u8, UL as u8, UB as u8, DR as u8, FR as u8, DL as u8, DB as u8,
                UF as u8, DF as u8, BL as u8, BR as u8,
            ],
            eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        },
        CubieCube {
            cp: [URF as u8, UFL as u8, ULB as u8, UBR as u8, DLF as u8, DBL as u8, DRB as u8, DFR as u8],
            co: [0, 0, 0, 0, 0, 0, 0, 0],
            ep: [
                UR as u8, UF as u8, UL as u8, UB as u8, DF as u8, DL as u8, DB as u8, DR as u8,
                FR as u8, FL as u8, BL as u8, BR as u8,
            ],
            eo: [0; N_EDGE],
        },
        CubieCube {
            cp: [URF as u8, ULB as u8, DBL as u8, UBR as u8, DFR as u8, UFL as u8, DLF as u8, DRB as u8],
            co: [0, 1, 2, 0, 0, 2, 1, 0],
            ep: [
                UR as u8, UF as u8, BL as u8, UB as u8, DR as u8, DF as u8, FL as u8, DB as u8,
                FR as u8, UL as u8, DL as u8, BR as u8,
            ],
            eo: [0; N_EDGE],
        },
        CubieCube {
            cp: [URF as u8, UFL as u8, UBR as u8, DRB as u8, DFR as u8, DLF as u8, ULB as u8, DBL as u8],
            co: [0, 0, 1, 2, 0, 0, 2, 1],
            ep: [
                UR as u8, UF as u8, UL as u8, BR as u8, DR as u8, DF as u8, DL as u8, BL as u8,
                FR as u8, FL as u8, UB as u8, DB as u8,
            ],
            eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
        },
    ];

    pub fn new() -> Self {
        Self::SOLVED
    }

    /// Composition `self * other`: the state reached by applying `other`
    /// after `self`.
    pub fn multiply(&self, other: &CubieCube) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..N_CORNER {
            let from = other.cp[i] as usize;
            result.cp[i] = self.cp[from];
            result.co[i] = (self.co[from] + other.co[i]) % 3;
        }
        for i in 0..N_EDGE {
            let from = other.ep[i] as usize;
            result.ep[i] = self.ep[from];
            result.eo[i] = (self.eo[from] + other.eo[i]) % 2;
        }
        result
    }

    pub fn apply(&self, mv: Move) -> CubieCube {
        let basic = &Self::BASIC[mv.0 as usize];

        (0..mv.1.quarters()).fold(*self, |cube, _| cube.multiply(basic))
    }

    pub fn apply_seq<'a, I>(&self, movs: I) -> CubieCube
    where
        I: IntoIterator<Item = &'a Move>,
    {
        movs.into_iter().fold(*self, |cube, mv| cube.apply(*mv))
    }

    pub fn inverse(&self) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..N_CORNER {
            let c = self.cp[i] as usize;
            result.cp[c] = i as u8;
            result.co[c] = (3 - self.co[i]) % 3;
        }
        for i in 0..N_EDGE {
            let e = self.ep[i] as usize;
            result.ep[e] = i as u8;
            result.eo[e] = self.eo[i];
        }
        result
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    pub fn from_moves(s: &str) -> Result<Self, CubeError> {
        let movs: MoveSeq = s.parse()?;

        Ok(Self::SOLVED.apply_seq(&movs))
    }

    /// Random scramble of `mov_nb` moves, never turning the same face twice
    /// in a row. `group` 1 restricts the scramble to phase-2 moves.
    pub fn from_rand<R: Rng + ?Sized>(mov_nb: usize, group: usize, rng: &mut R) -> (Self, MoveSeq) {
        let set: &[Move] = if group == 1 { &Move::PHASE2_SET } else { &Move::MOV_SET };
        let mut movs: Vec<Move> = Vec::with_capacity(mov_nb);

        while movs.len() < mov_nb {
            let mv = *set.choose(rng).unwrap_or(&set[0]);
            if let Some(Move(face, _)) = movs.last() {
                if *face == mv.0 {
                    continue;
                }
            }
            movs.push(mv);
        }
        (Self::SOLVED.apply_seq(&movs), MoveSeq(movs))
    }

    /// Uniformly random legal state.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cube = Self::SOLVED;

        cube.cp.shuffle(rng);
        cube.ep.shuffle(rng);
        if Self::parity(&cube.cp) != Self::parity(&cube.ep) {
            cube.ep.swap(0, 1);
        }
        for i in 0..N_CORNER - 1 {
            cube.co[i] = rng.gen_range(0..3);
        }
        cube.co[N_CORNER - 1] = (3 - cube.co[..N_CORNER - 1].iter().sum::<u8>() % 3) % 3;
        for i in 0..N_EDGE - 1 {
            cube.eo[i] = rng.gen_range(0..2);
        }
        cube.eo[N_EDGE - 1] = cube.eo[..N_EDGE - 1].iter().sum::<u8>() % 2;
        cube
    }

    /// Permutation parity, `true` when odd.
    pub fn parity(perm: &[u8]) -> bool {
        let mut inversions = 0;

        for i in 0..perm.len() {
            for j in i + 1..perm.len() {
                if perm[i] > perm[j] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 1
    }

    fn is_permutation(perm: &[u8]) -> bool {
        let mut seen = [false; N_EDGE];

        for &p in perm {
            if p as usize >= perm.len() || seen[p as usize] {
                return false;
            }
            seen[p as usize] = true;
        }
        true
    }

    /// Checks that the state is reachable from solved by face turns.
    pub fn verify(&self) -> Result<(), CubeError> {
        if !Self::is_permutation(&self.cp) {
            return Err(CubeError::CornerPermutation);
        }
        if !Self::is_permutation(&self.ep) {
            return Err(CubeError::EdgePermutation);
        }
        if self.co.iter().any(|&o| o > 2) || self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return Err(CubeError::Twist);
        }
        if self.eo.iter().any(|&o| o > 1) || self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
            return Err(CubeError::Flip);
        }
        if Self::parity(&self.cp) != Self::parity(&self.ep) {
            return Err(CubeError::Parity);
        }
        Ok(())
    }
}
