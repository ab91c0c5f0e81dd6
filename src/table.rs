use super::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Bumped whenever the layout of `Tables` changes.
const TABLE_VERSION: u32 = 1;

/// Coordinate transitions. Phase-1 tables are indexed `coord * N_MOVE +
/// move.index()`, phase-2 tables `coord * N_PHASE2_MOVE + k` where `k` is the
/// position of the move in `Move::PHASE2_SET`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTables {
    pub twist: Vec<u16>,
    pub flip: Vec<u16>,
    pub slice: Vec<u16>,
    pub corners: Vec<u16>,
    pub ud_edges: Vec<u16>,
    pub slice_perm: Vec<u16>,
}

/// Exact distances to the goal in projections of the state space; `u8::MAX`
/// marks an entry that was never reached.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningTables {
    /// `slice * N_TWIST + twist`
    pub slice_twist: Vec<u8>,
    /// `slice * N_FLIP + flip`
    pub slice_flip: Vec<u8>,
    /// `corners * N_SLICE_PERM + slice_perm`
    pub corners_slice: Vec<u8>,
    /// `ud_edges * N_SLICE_PERM + slice_perm`
    pub edges_slice: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    pub mv: MoveTables,
    pub pr: PruningTables,
}

#[derive(Serialize)]
struct TableFileRef<'a> {
    version: u32,
    tables: &'a Tables,
}

#[derive(Deserialize)]
struct TableFile {
    version: u32,
    tables: Tables,
}

impl Tables {
    #[inline]
    pub fn phase1_move(&self, c: Phase1Coord, mv: usize) -> Phase1Coord {
        Phase1Coord {
            twist: self.mv.twist[c.twist as usize * N_MOVE + mv],
            flip: self.mv.flip[c.flip as usize * N_MOVE + mv],
            slice: self.mv.slice[c.slice as usize * N_MOVE + mv],
        }
    }

    #[inline]
    pub fn phase2_move(&self, c: Phase2Coord, k: usize) -> Phase2Coord {
        Phase2Coord {
            corners: self.mv.corners[c.corners as usize * N_PHASE2_MOVE + k],
            ud_edges: self.mv.ud_edges[c.ud_edges as usize * N_PHASE2_MOVE + k],
            slice_perm: self.mv.slice_perm[c.slice_perm as usize * N_PHASE2_MOVE + k],
        }
    }

    /// Lower bound on the number of moves to reach G1.
    #[inline]
    pub fn phase1_bound(&self, c: Phase1Coord) -> u8 {
        let slice = c.slice as usize;

        self.pr.slice_twist[slice * N_TWIST + c.twist as usize]
            .max(self.pr.slice_flip[slice * N_FLIP + c.flip as usize])
    }

    /// Lower bound on the number of phase-2 moves to reach solved.
    #[inline]
    pub fn phase2_bound(&self, c: Phase2Coord) -> u8 {
        let slice_perm = c.slice_perm as usize;

        self.pr.corners_slice[c.corners as usize * N_SLICE_PERM + slice_perm]
            .max(self.pr.edges_slice[c.ud_edges as usize * N_SLICE_PERM + slice_perm])
    }

    /// Rejects tables whose shape does not match the coordinate spaces, or
    /// whose goal entries are not zero.
    pub fn check(&self) -> Result<(), SolveError> {
        let sizes = [
            ("twist moves", self.mv.twist.len(), N_TWIST * N_MOVE),
            ("flip moves", self.mv.flip.len(), N_FLIP * N_MOVE),
            ("slice moves", self.mv.slice.len(), N_SLICE * N_MOVE),
            ("corner moves", self.mv.corners.len(), N_CORNERS * N_PHASE2_MOVE),
            ("edge moves", self.mv.ud_edges.len(), N_UD_EDGES * N_PHASE2_MOVE),
            ("slice perm moves", self.mv.slice_perm.len(), N_SLICE_PERM * N_PHASE2_MOVE),
            ("slice/twist pruning", self.pr.slice_twist.len(), N_SLICE * N_TWIST),
            ("slice/flip pruning", self.pr.slice_flip.len(), N_SLICE * N_FLIP),
            ("corner pruning", self.pr.corners_slice.len(), N_CORNERS * N_SLICE_PERM),
            ("edge pruning", self.pr.edges_slice.len(), N_UD_EDGES * N_SLICE_PERM),
        ];

        for (name, len, expected) in sizes {
            if len != expected {
                return Err(SolveError::TableBuild(format!(
                    "{} table has {} entries, expected {}",
                    name, len, expected
                )));
            }
        }
        if self.pr.slice_twist[0] != 0
            || self.pr.slice_flip[0] != 0
            || self.pr.corners_slice[0] != 0
            || self.pr.edges_slice[0] != 0
        {
            return Err(SolveError::TableBuild("goal entry is not zero".to_string()));
        }
        Ok(())
    }

    pub fn save(&self, file: &Path) -> Result<(), SolveError> {
        let out = File::create(file)
            .map_err(|e| SolveError::TableBuild(format!("{}: {}", file.display(), e)))?;

        bincode::serialize_into(
            BufWriter::new(out),
            &TableFileRef {
                version: TABLE_VERSION,
                tables: self,
            },
        )
        .map_err(|e| SolveError::TableBuild(format!("{}: {}", file.display(), e)))
    }

    pub fn load(file: &Path) -> Result<Self, SolveError> {
        let input = File::open(file)
            .map_err(|e| SolveError::TableBuild(format!("{}: {}", file.display(), e)))?;
        let parsed: TableFile = bincode::deserialize_from(BufReader::new(input))
            .map_err(|e| SolveError::TableBuild(format!("{}: {}", file.display(), e)))?;

        if parsed.version != TABLE_VERSION {
            return Err(SolveError::TableBuild(format!(
                "{}: table format {} is not {}",
                file.display(),
                parsed.version,
                TABLE_VERSION
            )));
        }
        parsed.tables.check()?;
        Ok(parsed.tables)
    }
}
