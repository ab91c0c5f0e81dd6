use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl Face {
    pub const FACE_SET: [Face; 6] = [Up, Right, Front, Down, Left, Back];

    pub fn opposite(self) -> Face {
        Self::FACE_SET[(self as usize + 3) % 6]
    }

    pub fn from_char(c: char) -> Option<Face> {
        match c {
            'U' => Some(Up),
            'R' => Some(Right),
            'F' => Some(Front),
            'D' => Some(Down),
            'L' => Some(Left),
            'B' => Some(Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Up => "U",
            Right => "R",
            Front => "F",
            Down => "D",
            Left => "L",
            Back => "B",
        }
        .fmt(f)
    }
}

/// Quarter turns applied to a face, clockwise as seen facing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Cw,
    Dual,
    Ccw,
}

impl Turn {
    pub const TURN_SET: [Turn; 3] = [Cw, Dual, Ccw];

    pub fn quarters(self) -> usize {
        self as usize + 1
    }

    /// The turn worth `quarters` clockwise quarter turns, `None` for a
    /// multiple of four.
    pub fn from_quarters(quarters: usize) -> Option<Turn> {
        match quarters % 4 {
            1 => Some(Cw),
            2 => Some(Dual),
            3 => Some(Ccw),
            _ => None,
        }
    }

    pub fn inverse(self) -> Turn {
        match self {
            Cw => Ccw,
            Dual => Dual,
            Ccw => Cw,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Cw => "",
            Dual => "2",
            Ccw => "'",
        }
        .fmt(f)
    }
}

/// A face turn. Moves are numbered `face * 3 + turn` in U R F D L B order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move(pub Face, pub Turn);

pub const N_MOVE: usize = 18;
pub const N_PHASE2_MOVE: usize = 10;

impl Move {
    pub const MOV_SET: [Move; N_MOVE] = [
        Move(Up, Cw),
        Move(Up, Dual),
        Move(Up, Ccw),
        Move(Right, Cw),
        Move(Right, Dual),
        Move(Right, Ccw),
        Move(Front, Cw),
        Move(Front, Dual),
        Move(Front, Ccw),
        Move(Down, Cw),
        Move(Down, Dual),
        Move(Down, Ccw),
        Move(Left, Cw),
        Move(Left, Dual),
        Move(Left, Ccw),
        Move(Back, Cw),
        Move(Back, Dual),
        Move(Back, Ccw),
    ];

    /// Moves preserving G1, the only ones allowed in phase 2.
    pub const PHASE2_SET: [Move; N_PHASE2_MOVE] = [
        Move(Up, Cw),
        Move(Up, Dual),
        Move(Up, Ccw),
        Move(Down, Cw),
        Move(Down, Dual),
        Move(Down, Ccw),
        Move(Right, Dual),
        Move(Left, Dual),
        Move(Front, Dual),
        Move(Back, Dual),
    ];

    pub fn index(self) -> usize {
        self.0 as usize * 3 + self.1 as usize
    }

    pub fn from_index(idx: usize) -> Move {
        Self::MOV_SET[idx]
    }

    pub fn inverse(self) -> Move {
        Move(self.0, self.1.inverse())
    }

    pub fn is_phase2(self) -> bool {
        matches!(self.0, Up | Down) || self.1 == Dual
    }

    /// Whether `self` may follow `prev` in a search path. Turns of the same
    /// face are merged, and of two opposite faces only U before D, R before L
    /// and F before B is explored since they commute.
    pub fn follows(self, prev: Option<Move>) -> bool {
        match prev {
            None => true,
            Some(Move(face, _)) => {
                face != self.0 && !(face.opposite() == self.0 && (face as usize) > (self.0 as usize))
            }
        }
    }

    pub fn mov_parser(mov: &str) -> Result<Move, CubeError> {
        let mut chars = mov.chars();
        let face = chars
            .next()
            .and_then(Face::from_char)
            .ok_or_else(|| CubeError::UnknownMove(mov.to_string()))?;
        let turn = match chars.as_str() {
            "" => Cw,
            "2" => Dual,
            "'" => Ccw,
            _ => return Err(CubeError::UnknownMove(mov.to_string())),
        };
        Ok(Move(face, turn))
    }

    pub fn paint(self) -> String {
        format!(
            "{}{}",
            self.0.to_string().bright_yellow(),
            self.1.to_string().bright_red()
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, fm: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fm, "{}{}", self.0, self.1)
    }
}

impl std::str::FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::mov_parser(s)
    }
}

/// An ordered list of face turns in standard notation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSeq(pub Vec<Move>);

impl MoveSeq {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// The sequence undoing this one.
    pub fn inverse(&self) -> MoveSeq {
        MoveSeq(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }

    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(|mv| mv.to_string()).collect()
    }

    pub fn paint(&self) -> String {
        self.0.iter().map(|mv| mv.paint()).collect::<Vec<_>>().join(" ")
    }
}

/// `head` followed by `tail`, with turns of the same face meeting at the seam
/// joined into one (or dropped when they cancel).
pub fn join_moves(head: &[Move], tail: &[Move]) -> Vec<Move> {
    let mut movs = head.to_vec();

    for &mv in tail {
        match movs.last().copied() {
            Some(last) if last.0 == mv.0 => {
                movs.pop();
                if let Some(turn) = Turn::from_quarters(last.1.quarters() + mv.1.quarters()) {
                    movs.push(Move(mv.0, turn));
                }
            }
            _ => movs.push(mv),
        }
    }
    movs
}

impl std::fmt::Display for MoveSeq {
    fn fmt(&self, fm: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                write!(fm, " ")?;
            }
            write!(fm, "{}", mv)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for MoveSeq {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(Move::mov_parser)
            .collect::<Result<Vec<_>, _>>()
            .map(MoveSeq)
    }
}

impl From<Vec<Move>> for MoveSeq {
    fn from(movs: Vec<Move>) -> Self {
        MoveSeq(movs)
    }
}

impl IntoIterator for MoveSeq {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSeq {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
