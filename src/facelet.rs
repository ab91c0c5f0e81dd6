use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    /// Standard scheme, indexed by face in U R F D L B order.
    pub const COL_SET: [Color; 6] = [White, Red, Green, Yellow, Orange, Blue];

    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(White),
            'R' => Some(Red),
            'G' => Some(Green),
            'Y' => Some(Yellow),
            'O' => Some(Orange),
            'B' => Some(Blue),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            White => "  ".on_bright_white(),
            Red => "  ".on_bright_red(),
            Green => "  ".on_bright_green(),
            Yellow => "  ".on_bright_yellow(),
            Orange => "  ".on_truecolor(255, 140, 0),
            Blue => "  ".on_bright_blue(),
        }
        .fmt(f)
    }
}

pub const N_FACELET: usize = 54;

/// Sticker-level cube: face `f` occupies `facelets[9 * f..9 * f + 9]`,
/// row-major, faces in U R F D L B order. Each sticker names the face whose
/// center carries its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceletCube {
    pub facelets: [Face; N_FACELET],
}

impl FaceletCube {
    const CORNER_FACELET: [[usize; 3]; N_CORNER] = [
        [8, 9, 20],
        [6, 18, 38],
        [0, 36, 47],
        [2, 45, 11],
        [29, 26, 15],
        [27, 44, 24],
        [33, 53, 42],
        [35, 17, 51],
    ];

    const EDGE_FACELET: [[usize; 2]; N_EDGE] = [
        [5, 10],
        [7, 19],
        [3, 37],
        [1, 46],
        [32, 16],
        [28, 25],
        [30, 43],
        [34, 52],
        [23, 12],
        [21, 41],
        [50, 39],
        [48, 14],
    ];

    const CORNER_FACE: [[Face; 3]; N_CORNER] = [
        [Up, Right, Front],
        [Up, Front, Left],
        [Up, Left, Back],
        [Up, Back, Right],
        [Down, Front, Right],
        [Down, Left, Front],
        [Down, Back, Left],
        [Down, Right, Back],
    ];

    const EDGE_FACE: [[Face; 2]; N_EDGE] = [
        [Up, Right],
        [Up, Front],
        [Up, Left],
        [Up, Back],
        [Down, Right],
        [Down, Front],
        [Down, Left],
        [Down, Back],
        [Front, Right],
        [Front, Left],
        [Back, Left],
        [Back, Right],
    ];

    pub fn solved() -> Self {
        let mut facelets = [Up; N_FACELET];

        for (i, f) in facelets.iter_mut().enumerate() {
            *f = Face::FACE_SET[i / 9];
        }
        Self { facelets }
    }

    /// Builds a facelet cube from raw sticker colors. Colors are bound to
    /// faces through the six centers, so any color scheme is accepted.
    pub fn from_colors(colors: &[Color]) -> Result<Self, CubeError> {
        if colors.len() != N_FACELET {
            return Err(CubeError::StickerCount(colors.len()));
        }
        for color in Color::COL_SET {
            let count = colors.iter().filter(|c| **c == color).count();
            if count != 9 {
                return Err(CubeError::ColorCount { color, count });
            }
        }

        let mut face_of = [None; 6];
        for face in Face::FACE_SET {
            let center = colors[9 * face as usize + 4];
            if face_of[center as usize].is_some() {
                return Err(CubeError::DuplicateCenter);
            }
            face_of[center as usize] = Some(face);
        }

        let mut facelets = [Up; N_FACELET];
        for (f, c) in facelets.iter_mut().zip(colors) {
            *f = face_of[*c as usize].ok_or(CubeError::DuplicateCenter)?;
        }
        Ok(Self { facelets })
    }

    pub fn colors(&self) -> Vec<Color> {
        self.facelets
            .iter()
            .map(|f| Color::COL_SET[*f as usize])
            .collect()
    }

    pub fn from_cubie(cube: &CubieCube) -> Self {
        let mut result = Self::solved();

        for i in 0..N_CORNER {
            let j = cube.cp[i] as usize;
            let ori = cube.co[i] as usize;
            for k in 0..3 {
                result.facelets[Self::CORNER_FACELET[i][(k + ori) % 3]] = Self::CORNER_FACE[j][k];
            }
        }
        for i in 0..N_EDGE {
            let j = cube.ep[i] as usize;
            let ori = cube.eo[i] as usize;
            for k in 0..2 {
                result.facelets[Self::EDGE_FACELET[i][(k + ori) % 2]] = Self::EDGE_FACE[j][k];
            }
        }
        result
    }

    /// Identifies every corner and edge from its stickers, then checks the
    /// resulting cubie state for legality.
    pub fn to_cubie(&self) -> Result<CubieCube, CubeError> {
        let f = &self.facelets;
        let mut cube = CubieCube::SOLVED;

        for i in 0..N_CORNER {
            let slots = Self::CORNER_FACELET[i];
            let ori = (0..3)
                .find(|&o| matches!(f[slots[o]], Up | Down))
                .ok_or(CubeError::UnknownCorner(i))?;
            let col1 = f[slots[(ori + 1) % 3]];
            let col2 = f[slots[(ori + 2) % 3]];
            let j = (0..N_CORNER)
                .find(|&j| Self::CORNER_FACE[j][1] == col1 && Self::CORNER_FACE[j][2] == col2)
                .ok_or(CubeError::UnknownCorner(i))?;
            cube.cp[i] = j as u8;
            cube.co[i] = ori as u8;
        }
        for i in 0..N_EDGE {
            let [a, b] = Self::EDGE_FACELET[i];
            let (j, ori) = (0..N_EDGE)
                .find_map(|j| match Self::EDGE_FACE[j] {
                    [x, y] if f[a] == x && f[b] == y => Some((j, 0)),
                    [x, y] if f[a] == y && f[b] == x => Some((j, 1)),
                    _ => None,
                })
                .ok_or(CubeError::UnknownEdge(i))?;
            cube.ep[i] = j as u8;
            cube.eo[i] = ori;
        }
        cube.verify()?;
        Ok(cube)
    }

    /// The 54-letter face notation, e.g. `UUUUUUUUURRR...`.
    pub fn letters(&self) -> String {
        self.facelets.iter().map(|f| f.to_string()).collect()
    }

    fn row_2_str(&self, face: Face, row: usize) -> String {
        let base = 9 * face as usize + 3 * row;

        self.facelets[base..base + 3]
            .iter()
            .map(|f| Color::COL_SET[*f as usize].to_string())
            .collect()
    }

    /// Unfolded colored net: U on top, then L F R B, then D.
    pub fn net(&self) -> String {
        let mut result = String::with_capacity(0x400);

        for row in 0..3 {
            result.push_str(&format!("       {}\n", self.row_2_str(Up, row)));
        }
        for row in 0..3 {
            result.push_str(&format!(
                " {} {} {} {}\n",
                self.row_2_str(Left, row),
                self.row_2_str(Front, row),
                self.row_2_str(Right, row),
                self.row_2_str(Back, row),
            ));
        }
        for row in 0..3 {
            result.push_str(&format!("       {}\n", self.row_2_str(Down, row)));
        }
        result
    }
}

impl std::str::FromStr for FaceletCube {
    type Err = CubeError;

    /// Accepts either face letters (`URFDLB`) or color letters (`WRGYOB`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let face_letters = chars.iter().all(|c| Face::from_char(*c).is_some());
        let colors = chars
            .iter()
            .map(|&c| {
                if face_letters {
                    Face::from_char(c).map(|f| Color::COL_SET[f as usize])
                } else {
                    Color::from_char(c)
                }
                .ok_or(CubeError::UnknownSticker(c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_colors(&colors)
    }
}

impl std::fmt::Display for FaceletCube {
    fn fmt(&self, fm: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fm, "{}", self.letters())
    }
}

impl std::fmt::Display for CubieCube {
    fn fmt(&self, fm: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fm, "{}", FaceletCube::from_cubie(self).net())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn solved_round_trip() {
        let fc: FaceletCube = SOLVED.parse().unwrap();

        assert_eq!(fc, FaceletCube::solved());
        assert_eq!(fc.to_cubie(), Ok(CubieCube::SOLVED));
        assert_eq!(FaceletCube::from_cubie(&CubieCube::SOLVED).letters(), SOLVED);
    }

    #[test]
    fn single_turn_facelets() {
        let r = CubieCube::from_moves("R").unwrap();
        let fc = FaceletCube::from_cubie(&r);

        assert_eq!(
            fc.letters(),
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
        );
        assert_eq!(fc.to_cubie(), Ok(r));
    }

    #[test]
    fn random_states_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let cube = CubieCube::random(&mut rng);
            let fc = FaceletCube::from_cubie(&cube);
            assert_eq!(fc.to_cubie(), Ok(cube));
            let reparsed: FaceletCube = fc.letters().parse().unwrap();
            assert_eq!(reparsed, fc);
        }
    }

    #[test]
    fn color_letters_and_other_schemes() {
        let by_color: FaceletCube = "WWWWWWWWW RRRRRRRRR GGGGGGGGG YYYYYYYYY OOOOOOOOO BBBBBBBBB"
            .parse()
            .unwrap();
        assert_eq!(by_color, FaceletCube::solved());

        // same cube painted with a scheme where U is blue and B is white
        let swapped: Vec<Color> = FaceletCube::solved()
            .colors()
            .into_iter()
            .map(|c| match c {
                White => Blue,
                Blue => White,
                other => other,
            })
            .collect();
        assert_eq!(FaceletCube::from_colors(&swapped), Ok(FaceletCube::solved()));
    }

    #[test]
    fn rejects_bad_sticker_counts() {
        let mut colors = FaceletCube::solved().colors();
        colors.pop();
        assert_eq!(FaceletCube::from_colors(&colors), Err(CubeError::StickerCount(53)));
        colors.push(White);
        colors.push(White);
        assert_eq!(FaceletCube::from_colors(&colors), Err(CubeError::StickerCount(55)));

        let mut colors = FaceletCube::solved().colors();
        colors[0] = Red;
        assert_eq!(
            FaceletCube::from_colors(&colors),
            Err(CubeError::ColorCount { color: White, count: 8 })
        );
        assert!(matches!(
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBX".parse::<FaceletCube>(),
            Err(CubeError::UnknownSticker('X'))
        ));
    }

    #[test]
    fn rejects_illegal_arrangements() {
        // twist the URF corner in place
        let mut fc = FaceletCube::solved();
        fc.facelets[8] = Right;
        fc.facelets[9] = Front;
        fc.facelets[20] = Up;
        assert_eq!(fc.to_cubie(), Err(CubeError::Twist));

        // flip the UR edge in place
        let mut fc = FaceletCube::solved();
        fc.facelets.swap(5, 10);
        assert_eq!(fc.to_cubie(), Err(CubeError::Flip));

        // swap the UR and UF edges
        let mut fc = FaceletCube::solved();
        fc.facelets[10] = Front;
        fc.facelets[19] = Right;
        assert_eq!(fc.to_cubie(), Err(CubeError::Parity));

        // a corner with no U/D sticker
        let mut fc = FaceletCube::solved();
        fc.facelets[8] = Front;
        assert_eq!(fc.to_cubie(), Err(CubeError::UnknownCorner(0)));
    }
}
