use rand::rngs::StdRng;
use rand::SeedableRng;
use rubik_twophase::*;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

fn builder() -> Arc<TableBuilder> {
    static BUILDER: OnceLock<Arc<TableBuilder>> = OnceLock::new();

    BUILDER
        .get_or_init(|| Arc::new(TableBuilder::new(TableConfig::default())))
        .clone()
}

fn generous() -> SolveOptions {
    SolveOptions {
        time_limit: Duration::from_secs(60),
        ..SolveOptions::default()
    }
}

#[test]
fn solved_stickers_need_no_moves() {
    let solver = Solver::new(builder());

    for stickers in [
        "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
        "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB",
    ] {
        let solution = solver.solve_source(&Facelets(stickers), &generous()).unwrap();
        assert!(solution.moves.is_empty());
    }
}

#[test]
fn single_move_scramble() {
    let solver = Solver::new(builder());
    let movs = solver
        .solve(&CubieCube::from_moves("R").unwrap().into(), &generous())
        .unwrap();

    assert_eq!(movs.to_string(), "R'");
}

fn superflip() -> CubieCube {
    let mut cube = CubieCube::SOLVED;
    cube.eo = [1; N_EDGE];
    cube
}

fn patient() -> SolveOptions {
    SolveOptions {
        time_limit: Duration::from_secs(300),
        ..SolveOptions::default()
    }
}

#[test]
fn superflip_is_solved_within_twenty() {
    let solver = Solver::new(builder());
    let cube = superflip();

    let report = solver.solve_report(&cube.into(), &patient()).unwrap();
    assert!(report.moves.len() <= 20, "{} moves", report.moves.len());
    assert!(cube.apply_seq(&report.moves).is_solved());
}

#[test]
fn neighbours_of_superflip_are_solved_within_twenty() {
    let solver = Solver::new(builder());

    for scramble in ["F", "U R'"] {
        let cube = superflip().apply_seq(&scramble.parse::<MoveSeq>().unwrap());
        let movs = solver.solve(&cube.into(), &patient()).unwrap();

        assert!(movs.len() <= 20, "{}: {} moves", scramble, movs.len());
        assert!(cube.apply_seq(&movs).is_solved());
    }
}

#[test]
fn random_scrambles_round_trip() {
    let solver = Solver::new(builder());
    let mut rng = StdRng::seed_from_u64(42);

    for len in [5, 12, 25] {
        let (cube, scramble) = CubieCube::from_rand(len, 0, &mut rng);
        let movs = solver.solve(&cube.into(), &generous()).unwrap();

        assert!(movs.len() <= 20, "{} -> {} moves", scramble, movs.len());
        assert!(cube.apply_seq(&movs).is_solved(), "{} / {}", scramble, movs);
    }
}

#[test]
fn facelet_string_of_scramble_is_solved() {
    let solver = Solver::new(builder());
    let cube = CubieCube::from_moves("F R U' B2 L D").unwrap();
    let stickers = FaceletCube::from_cubie(&cube).letters();

    let solution = solver.solve_source(&Facelets(&stickers), &generous()).unwrap();
    assert!(solution.moves.len() <= 20);
    assert!(cube.apply_seq(&solution.moves).is_solved());
}

#[test]
fn invalid_input_never_touches_the_tables() {
    let solver = Solver::new(Arc::new(TableBuilder::new(TableConfig::default())));
    let mut stickers = FaceletCube::solved().colors();

    stickers.pop();
    assert!(matches!(
        solver.solve(&stickers.clone().into(), &generous()),
        Err(SolveError::InvalidCube(CubeError::StickerCount(53)))
    ));

    stickers.push(Color::White);
    stickers.push(Color::White);
    assert!(matches!(
        solver.solve(&stickers.clone().into(), &generous()),
        Err(SolveError::InvalidCube(CubeError::StickerCount(55)))
    ));

    stickers.pop();
    assert!(matches!(
        solver.solve(&stickers.into(), &generous()),
        Err(SolveError::InvalidCube(CubeError::ColorCount { .. }))
    ));

    let mut twisted = CubieCube::SOLVED;
    twisted.co[0] = 1;
    let letters = FaceletCube::from_cubie(&twisted).letters();
    assert!(matches!(
        solver.solve_source(&Facelets(&letters), &generous()),
        Err(SolveError::InvalidCube(CubeError::Twist))
    ));

    let mut swapped = CubieCube::SOLVED;
    swapped.ep.swap(0, 1);
    assert!(matches!(
        solver.solve(&swapped.into(), &generous()),
        Err(SolveError::InvalidCube(CubeError::Parity))
    ));

    assert!(!solver.tables().is_built());
}

#[test]
fn concurrent_solves_share_one_table_set() {
    let builder = builder();
    let mut rng = StdRng::seed_from_u64(7);
    let cubes: Vec<CubieCube> = (0..4).map(|_| CubieCube::random(&mut rng)).collect();

    crossbeam::thread::scope(|s| {
        for cube in &cubes {
            let solver = Solver::new(builder.clone());
            s.spawn(move |_| {
                let movs = solver.solve(&(*cube).into(), &generous()).unwrap();
                assert!(cube.apply_seq(&movs).is_solved());
            });
        }
    })
    .unwrap();
    assert!(builder.is_built());
}

#[test]
fn cancellation_ends_the_search() {
    let solver = Solver::new(builder());
    solver.tables().get().unwrap();
    let cube = CubieCube::random(&mut StdRng::seed_from_u64(3));
    let token = CancelToken::new();
    let options = SolveOptions {
        // unreachable target keeps the search going until cancelled
        max_moves: 0,
        time_limit: Duration::from_secs(600),
        cancel: Some(token.clone()),
    };
    let start = Instant::now();

    let result = crossbeam::thread::scope(|s| {
        let search = s.spawn(|_| solver.solve(&cube.into(), &options));
        std::thread::sleep(Duration::from_millis(300));
        token.cancel();
        search.join().unwrap()
    })
    .unwrap();

    assert!(start.elapsed() < Duration::from_secs(60));
    match result {
        Ok(movs) => assert!(cube.apply_seq(&movs).is_solved()),
        Err(e) => assert_eq!(e, SolveError::Timeout),
    }
}
