use clap::{Arg, ArgMatches, Command};
use colored::*;
use log::LevelFilter;
use rubik_twophase::*;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn input_checker(input: &str) -> Result<(), String> {
    input
        .parse::<MoveSeq>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn facelet_checker(input: &str) -> Result<(), String> {
    input
        .parse::<FaceletCube>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn new_app() -> Command<'static> {
    Command::new("Rubik Solver")
        .about("Two-phase solver for the 3x3x3 cube")
        .arg(
            Arg::new("MOVES")
                .validator(input_checker)
                .conflicts_with_all(&["facelets", "rand", "new"])
                .required_unless_present_any(&["facelets", "rand", "new", "tab"])
                .help(
                    "Face turns split by whitespace.\n\
                    U, D, F, B, L, R for Up, Down, Front, Back, Left and Right\n\
                    (append 2 for half turn and ' for counterclockwise)",
                ),
        )
        .arg(
            Arg::new("facelets")
                .long("facelets")
                .short('f')
                .require_equals(true)
                .value_name("STR")
                .validator(facelet_checker)
                .conflicts_with_all(&["rand", "new"])
                .help(
                    "54 stickers, face by face in U R F D L B order, each read\n\
                    row by row; face letters (URFDLB) or colors (WRGYOB)",
                ),
        )
        .arg(
            Arg::new("rand")
                .long("rand")
                .short('r')
                .help("<NB> of random moves")
                .require_equals(true)
                .value_name("NB")
                .validator(|arg| usize::from_str_radix(arg, 10)),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .short('g')
                .requires("rand")
                .help("Allowed moves when the cube is shuffled (1 keeps it in G1)")
                .require_equals(true)
                .value_name("GR")
                .possible_values(["0", "1"]),
        )
        .arg(
            Arg::new("new")
                .long("new")
                .short('n')
                .conflicts_with("rand")
                .help("Start with an unaltered cube"),
        )
        .arg(
            Arg::new("max-moves")
                .long("max-moves")
                .short('m')
                .require_equals(true)
                .value_name("N")
                .validator(|arg| usize::from_str_radix(arg, 10))
                .help("Stop at the first solution this short [default: 20]"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .require_equals(true)
                .value_name("SECS")
                .validator(|arg| {
                    time_limit(arg)
                        .map(|_| ())
                        .ok_or("expected a non-negative number of seconds")
                })
                .help("Search time budget [default: 5]"),
        )
        .arg(
            Arg::new("tables")
                .long("tables")
                .require_equals(true)
                .value_name("PATH")
                .help("Table cache file, loaded if present and written after a build"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .require_equals(true)
                .value_name("N")
                .validator(|arg| match arg.parse::<usize>() {
                    Ok(0) => Err("at least one thread is needed".to_string()),
                    Ok(_) => Ok(()),
                    Err(e) => Err(e.to_string()),
                })
                .help("Threads used to build the tables"),
        )
        .arg(
            Arg::new("tab")
                .long("tab")
                .short('t')
                .conflicts_with_all(&["MOVES", "facelets", "rand", "new"])
                .help("Build (or load) the tables and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
}

fn init_logger(verbosity: u64) {
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();
}

/// `None` unless `secs` is a non-negative number of seconds; values beyond
/// what `Duration` holds saturate.
fn time_limit(secs: &str) -> Option<Duration> {
    match secs.parse::<f64>() {
        Ok(secs) if secs >= 0.0 => Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)),
        _ => None,
    }
}

fn parsed<T: FromStr>(cmd: &ArgMatches, name: &str) -> Option<T> {
    cmd.value_of(name).and_then(|v| v.parse().ok())
}

/// The cube to solve and, when known, the moves that scrambled it.
fn scrambled(cmd: &ArgMatches) -> Result<(CubieCube, Option<MoveSeq>), SolveError> {
    if cmd.is_present("new") {
        return Ok((CubieCube::new(), None));
    }
    if let Some(nb) = parsed::<usize>(cmd, "rand") {
        let group = parsed::<usize>(cmd, "group").unwrap_or(0);
        let (cube, movs) = CubieCube::from_rand(nb, group, &mut rand::thread_rng());
        return Ok((cube, Some(movs)));
    }
    if let Some(stickers) = cmd.value_of("facelets") {
        return Ok((Facelets(stickers).cube_state()?.validate()?, None));
    }
    let movs: MoveSeq = cmd.value_of("MOVES").unwrap_or("").parse()?;
    Ok((CubieCube::new().apply_seq(&movs), Some(movs)))
}

fn run(cmd: &ArgMatches) -> Result<(), SolveError> {
    let mut config = TableConfig {
        cache_path: cmd.value_of("tables").map(PathBuf::from),
        ..TableConfig::default()
    };
    if let Some(threads) = parsed::<usize>(cmd, "threads") {
        config.threads = threads;
    }
    let builder = Arc::new(TableBuilder::new(config));

    if cmd.is_present("tab") {
        let start = Instant::now();
        builder.get()?;
        println!(
            "{} in {:.3}s",
            "Tables ready".bright_green(),
            start.elapsed().as_secs_f64()
        );
        if cmd.value_of("tables").is_none() {
            println!("(no {} given, nothing was saved)", "--tables".bright_yellow());
        }
        return Ok(());
    }

    let (cube, scramble) = scrambled(cmd)?;
    println!("\n{}", cube);
    if let Some(movs) = &scramble {
        println!("{} {}", "Scramble:".bold(), movs.paint());
    }

    let options = SolveOptions {
        max_moves: parsed(cmd, "max-moves").unwrap_or(20),
        time_limit: cmd
            .value_of("timeout")
            .and_then(time_limit)
            .unwrap_or(Duration::from_secs(5)),
        cancel: None,
    };
    let start = Instant::now();
    let solver = Solver::new(builder);
    let solution = solver.solve_report(&cube.into(), &options)?;

    println!(
        "{} {} ({} moves)",
        "Solution:".bold(),
        solution.moves.paint(),
        solution.moves.len()
    );
    println!(
        "Searched {} nodes in {:.3}s ({:.3}s with tables)",
        solution.nodes,
        solution.elapsed.as_secs_f64(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() {
    let cmd = new_app().get_matches();

    init_logger(cmd.occurrences_of("verbose"));
    if let Err(e) = run(&cmd) {
        eprintln!("{} {}", "error:".bright_red().bold(), e);
        exit(1);
    }
}
