//! Projection of a `CubieCube` onto the integer coordinates searched by
//! each phase, and back onto a representative cube.
//!
//! Phase 1 works on twist (corner orientation), flip (edge orientation) and
//! slice (positions of the FR, FL, BL, BR edges). Phase 2 works on the corner
//! permutation, the permutation of the eight U/D edges and the permutation of
//! the four slice edges. In every coordinate the solved cube maps to 0.

use super::*;

pub const N_TWIST: usize = 2187;
pub const N_FLIP: usize = 2048;
pub const N_SLICE: usize = 495;
pub const N_CORNERS: usize = 40320;
pub const N_UD_EDGES: usize = 40320;
pub const N_SLICE_PERM: usize = 24;

/// First edge index of the UD slice (FR, FL, BL, BR are 8..12).
const SLICE_EDGE: u8 = 8;

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Lehmer code of a permutation of `0..perm.len()`.
fn perm_to_index(perm: &[u8]) -> u16 {
    let n = perm.len();
    let mut idx = 0usize;

    for i in 0..n {
        let smaller = perm[i + 1..].iter().filter(|&&p| p < perm[i]).count();
        idx = idx * (n - i) + smaller;
    }
    idx as u16
}

/// Inverse of `perm_to_index`, writing into `perm`.
fn index_to_perm(mut idx: usize, perm: &mut [u8]) {
    let n = perm.len();
    let mut digits = [0usize; N_EDGE];
    let mut avail = [0u8; N_EDGE];

    for i in (0..n).rev() {
        digits[i] = idx % (n - i);
        idx /= n - i;
    }
    for (i, a) in avail.iter_mut().enumerate().take(n) {
        *a = i as u8;
    }
    let mut left = n;
    for i in 0..n {
        let d = digits[i];
        perm[i] = avail[d];
        avail.copy_within(d + 1..left, d);
        left -= 1;
    }
}

impl CubieCube {
    pub fn twist(&self) -> u16 {
        self.co[..N_CORNER - 1]
            .iter()
            .fold(0, |acc, &o| acc * 3 + o as u16)
    }

    pub fn set_twist(&mut self, mut twist: u16) {
        let mut sum = 0;

        for i in (0..N_CORNER - 1).rev() {
            self.co[i] = (twist % 3) as u8;
            sum += self.co[i];
            twist /= 3;
        }
        self.co[N_CORNER - 1] = (3 - sum % 3) % 3;
    }

    pub fn flip(&self) -> u16 {
        self.eo[..N_EDGE - 1]
            .iter()
            .fold(0, |acc, &o| acc * 2 + o as u16)
    }

    pub fn set_flip(&mut self, mut flip: u16) {
        let mut sum = 0;

        for i in (0..N_EDGE - 1).rev() {
            self.eo[i] = (flip % 2) as u8;
            sum += self.eo[i];
            flip /= 2;
        }
        self.eo[N_EDGE - 1] = sum % 2;
    }

    /// Rank of the set of positions holding slice edges, 0 when they sit in
    /// FR, FL, BL, BR (in any order).
    pub fn slice(&self) -> u16 {
        let mut idx = 0;
        let mut found = 0;

        for j in (0..N_EDGE).rev() {
            if self.ep[j] >= SLICE_EDGE {
                idx += binomial(N_EDGE - 1 - j, found + 1);
                found += 1;
            }
        }
        idx as u16
    }

    /// Places the slice edges (in order) at the positions ranked by `slice`
    /// and the other edges (in order) everywhere else.
    pub fn set_slice(&mut self, slice: u16) {
        let mut idx = slice as usize;
        let mut left = 4;
        let mut slice_edge = SLICE_EDGE;
        let mut other_edge = 0;

        for j in 0..N_EDGE {
            let c = binomial(N_EDGE - 1 - j, left);
            if left > 0 && idx >= c {
                idx -= c;
                left -= 1;
                self.ep[j] = slice_edge;
                slice_edge += 1;
            } else {
                self.ep[j] = other_edge;
                other_edge += 1;
            }
        }
    }

    pub fn corners(&self) -> u16 {
        perm_to_index(&self.cp)
    }

    pub fn set_corners(&mut self, corners: u16) {
        index_to_perm(corners as usize, &mut self.cp);
    }

    /// Permutation of the eight U/D edges; only meaningful inside G1.
    pub fn ud_edges(&self) -> u16 {
        perm_to_index(&self.ep[..SLICE_EDGE as usize])
    }

    pub fn set_ud_edges(&mut self, ud_edges: u16) {
        index_to_perm(ud_edges as usize, &mut self.ep[..SLICE_EDGE as usize]);
        for j in SLICE_EDGE..N_EDGE as u8 {
            self.ep[j as usize] = j;
        }
    }

    /// Permutation of the four slice edges; only meaningful inside G1.
    pub fn slice_perm(&self) -> u16 {
        let mut perm = [0u8; 4];

        for (p, e) in perm.iter_mut().zip(&self.ep[SLICE_EDGE as usize..]) {
            *p = e.wrapping_sub(SLICE_EDGE);
        }
        perm_to_index(&perm)
    }

    pub fn set_slice_perm(&mut self, slice_perm: u16) {
        let mut perm = [0u8; 4];

        index_to_perm(slice_perm as usize, &mut perm);
        for j in 0..SLICE_EDGE {
            self.ep[j as usize] = j;
        }
        for (e, p) in self.ep[SLICE_EDGE as usize..].iter_mut().zip(perm) {
            *e = p + SLICE_EDGE;
        }
    }

    /// Membership in G1 = <U, D, R2, L2, F2, B2>.
    pub fn in_g1(&self) -> bool {
        Phase1Coord::from_cubie(self).is_goal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase1Coord {
    pub twist: u16,
    pub flip: u16,
    pub slice: u16,
}

impl Phase1Coord {
    pub fn from_cubie(cube: &CubieCube) -> Self {
        Self {
            twist: cube.twist(),
            flip: cube.flip(),
            slice: cube.slice(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.twist == 0 && self.flip == 0 && self.slice == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase2Coord {
    pub corners: u16,
    pub ud_edges: u16,
    pub slice_perm: u16,
}

impl Phase2Coord {
    /// Expects a cube in G1.
    pub fn from_cubie(cube: &CubieCube) -> Self {
        Self {
            corners: cube.corners(),
            ud_edges: cube.ud_edges(),
            slice_perm: cube.slice_perm(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.corners == 0 && self.ud_edges == 0 && self.slice_perm == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn solved_is_zero_everywhere() {
        let cube = CubieCube::SOLVED;

        assert!(Phase1Coord::from_cubie(&cube).is_goal());
        assert!(Phase2Coord::from_cubie(&cube).is_goal());
        assert!(cube.in_g1());
    }

    #[test]
    fn orientation_coordinates_round_trip() {
        let mut cube = CubieCube::SOLVED;

        for t in 0..N_TWIST as u16 {
            cube.set_twist(t);
            assert_eq!(cube.twist(), t);
            assert_eq!(cube.co.iter().map(|&o| o as u32).sum::<u32>() % 3, 0);
        }
        for f in 0..N_FLIP as u16 {
            cube.set_flip(f);
            assert_eq!(cube.flip(), f);
            assert_eq!(cube.eo.iter().map(|&o| o as u32).sum::<u32>() % 2, 0);
        }
    }

    #[test]
    fn slice_round_trip_covers_all_placements() {
        let mut cube = CubieCube::SOLVED;

        for s in 0..N_SLICE as u16 {
            cube.set_slice(s);
            assert_eq!(cube.slice(), s);
            assert_eq!(cube.ep.iter().filter(|&&e| e >= SLICE_EDGE).count(), 4);
        }
        cube.set_slice(0);
        assert_eq!(cube, CubieCube::SOLVED);
    }

    #[test]
    fn permutation_coordinates_round_trip() {
        let mut cube = CubieCube::SOLVED;

        for c in 0..N_CORNERS as u16 {
            cube.set_corners(c);
            assert_eq!(cube.corners(), c);
        }
        for e in 0..N_UD_EDGES as u16 {
            cube.set_ud_edges(e);
            assert_eq!(cube.ud_edges(), e);
            assert!(cube.in_g1());
        }
        for p in 0..N_SLICE_PERM as u16 {
            cube.set_slice_perm(p);
            assert_eq!(cube.slice_perm(), p);
            assert!(cube.in_g1());
        }
    }

    #[test]
    fn lehmer_code_extremes() {
        assert_eq!(perm_to_index(&[0, 1, 2, 3]), 0);
        assert_eq!(perm_to_index(&[3, 2, 1, 0]), 23);
        let mut perm = [0u8; 8];
        index_to_perm(N_CORNERS - 1, &mut perm);
        assert_eq!(perm, [7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn coordinates_survive_reencoding_of_random_cubes() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let cube = CubieCube::random(&mut rng);
            let mut copy = CubieCube::SOLVED;
            copy.set_twist(cube.twist());
            copy.set_flip(cube.flip());
            copy.set_corners(cube.corners());
            assert_eq!(copy.co, cube.co);
            assert_eq!(copy.eo, cube.eo);
            assert_eq!(copy.cp, cube.cp);
        }
    }

    #[test]
    fn g1_moves_keep_g1() {
        let (cube, _) = CubieCube::from_rand(40, 1, &mut StdRng::seed_from_u64(9));

        assert!(cube.in_g1());
        assert!(!CubieCube::from_moves("R").unwrap().in_g1());
        assert!(!CubieCube::from_moves("F").unwrap().in_g1());
    }
}
