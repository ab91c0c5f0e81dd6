use super::*;
use crossbeam::thread;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct TableConfig {
    /// Worker threads used while building; 1 builds sequentially.
    pub threads: usize,
    /// Where tables are loaded from and saved to, if anywhere.
    pub cache_path: Option<PathBuf>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            cache_path: None,
        }
    }
}

/// Owns the move and pruning tables and builds them on first use. Concurrent
/// first callers block until the single build finishes.
pub struct TableBuilder {
    config: TableConfig,
    tables: OnceLock<Arc<Tables>>,
    building: Mutex<()>,
}

impl TableBuilder {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            tables: OnceLock::new(),
            building: Mutex::new(()),
        }
    }

    /// A builder that is already initialized with `tables`.
    pub fn with_tables(tables: Arc<Tables>) -> Self {
        Self {
            config: TableConfig::default(),
            tables: OnceLock::from(tables),
            building: Mutex::new(()),
        }
    }

    pub fn is_built(&self) -> bool {
        self.tables.get().is_some()
    }

    pub fn get(&self) -> Result<&Tables, SolveError> {
        if let Some(tables) = self.tables.get() {
            return Ok(tables.as_ref());
        }

        let _guard = self
            .building
            .lock()
            .map_err(|_| SolveError::TableBuild("a previous build panicked".to_string()))?;
        if let Some(tables) = self.tables.get() {
            return Ok(tables.as_ref());
        }
        let tables = Arc::new(self.load_or_build()?);
        Ok(self.tables.get_or_init(|| tables).as_ref())
    }

    pub fn shared(&self) -> Result<Arc<Tables>, SolveError> {
        self.get()?;
        self.tables
            .get()
            .cloned()
            .ok_or_else(|| SolveError::TableBuild("tables vanished".to_string()))
    }

    fn load_or_build(&self) -> Result<Tables, SolveError> {
        if let Some(path) = &self.config.cache_path {
            if path.exists() {
                let start = Instant::now();
                match Tables::load(path) {
                    Ok(tables) => {
                        info!(
                            "Loaded tables from {} in {:.3}s",
                            path.display(),
                            start.elapsed().as_secs_f64()
                        );
                        return Ok(tables);
                    }
                    Err(e) => warn!("Ignoring table cache: {}", e),
                }
            }
        }

        let tables = build_tables(self.config.threads)?;

        if let Some(path) = &self.config.cache_path {
            match tables.save(path) {
                Ok(()) => info!("Saved tables to {}", path.display()),
                Err(e) => warn!("Could not save table cache: {}", e),
            }
        }
        Ok(tables)
    }
}

/// Splits `0..len` into one contiguous range per worker and collects each
/// worker's output in range order.
fn run_sharded<T, F>(threads: usize, len: usize, work: F) -> Result<Vec<Vec<T>>, SolveError>
where
    T: Send,
    F: Fn(Range<usize>) -> Vec<T> + Sync,
{
    if threads <= 1 || len < 1024 {
        return Ok(vec![work(0..len)]);
    }

    let chunk = (len + threads - 1) / threads;
    let work = &work;

    thread::scope(|s| {
        let mut thrds = Vec::with_capacity(threads);

        for start in (0..len).step_by(chunk) {
            let end = (start + chunk).min(len);
            thrds.push(s.spawn(move |_| {
                trace!("shard {}..{}", start, end);
                work(start..end)
            }));
        }
        thrds
            .into_iter()
            .map(|thrd| thrd.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .and_then(|joined| joined)
    .map_err(|_| SolveError::TableBuild("table worker panicked".to_string()))
}

/// For every coordinate value, decodes a representative cube, applies each
/// move and re-encodes the result.
fn build_move_table(
    threads: usize,
    n_coord: usize,
    movs: &[Move],
    set: fn(&mut CubieCube, u16),
    get: fn(&CubieCube) -> u16,
) -> Result<Vec<u16>, SolveError> {
    let shards = run_sharded(threads, n_coord, |range| {
        let mut shard = Vec::with_capacity(range.len() * movs.len());
        let mut cube = CubieCube::SOLVED;

        for coord in range {
            set(&mut cube, coord as u16);
            for mv in movs {
                shard.push(get(&cube.apply(*mv)));
            }
        }
        shard
    })?;

    Ok(shards.concat())
}

/// Breadth-first layering over the product of two coordinates, starting at
/// (0, 0). Entry `a * n_b + b` receives the depth at which it is first
/// reached; entries never reached keep `u8::MAX`.
fn build_pruning_table<F>(
    threads: usize,
    n_a: usize,
    n_b: usize,
    n_movs: usize,
    next: F,
) -> Result<Vec<u8>, SolveError>
where
    F: Fn(usize, usize, usize) -> (usize, usize) + Sync,
{
    let mut table = vec![u8::MAX; n_a * n_b];
    let mut depth = 0u8;
    let mut total = 1;

    table[0] = 0;
    loop {
        let current = &table;
        let shards = run_sharded(threads, current.len(), |range| {
            let mut found = Vec::new();

            for idx in range {
                if current[idx] != depth {
                    continue;
                }
                let (a, b) = (idx / n_b, idx % n_b);
                for m in 0..n_movs {
                    let (a2, b2) = next(a, b, m);
                    let j = a2 * n_b + b2;
                    if current[j] == u8::MAX {
                        found.push(j as u32);
                    }
                }
            }
            found
        })?;

        let mut reached = 0;
        for j in shards.into_iter().flatten() {
            if table[j as usize] == u8::MAX {
                table[j as usize] = depth + 1;
                reached += 1;
            }
        }
        if reached == 0 {
            break;
        }
        total += reached;
        depth += 1;
        trace!("depth {}: {} new entries ({} total)", depth, reached, total);
    }
    if total != table.len() {
        debug!("{} of {} entries unreachable", table.len() - total, table.len());
    }
    Ok(table)
}

pub fn build_move_tables(threads: usize) -> Result<MoveTables, SolveError> {
    Ok(MoveTables {
        twist: build_move_table(
            threads,
            N_TWIST,
            &Move::MOV_SET,
            CubieCube::set_twist,
            CubieCube::twist,
        )?,
        flip: build_move_table(
            threads,
            N_FLIP,
            &Move::MOV_SET,
            CubieCube::set_flip,
            CubieCube::flip,
        )?,
        slice: build_move_table(
            threads,
            N_SLICE,
            &Move::MOV_SET,
            CubieCube::set_slice,
            CubieCube::slice,
        )?,
        corners: build_move_table(
            threads,
            N_CORNERS,
            &Move::PHASE2_SET,
            CubieCube::set_corners,
            CubieCube::corners,
        )?,
        ud_edges: build_move_table(
            threads,
            N_UD_EDGES,
            &Move::PHASE2_SET,
            CubieCube::set_ud_edges,
            CubieCube::ud_edges,
        )?,
        slice_perm: build_move_table(
            threads,
            N_SLICE_PERM,
            &Move::PHASE2_SET,
            CubieCube::set_slice_perm,
            CubieCube::slice_perm,
        )?,
    })
}

pub fn build_pruning_tables(threads: usize, mv: &MoveTables) -> Result<PruningTables, SolveError> {
    Ok(PruningTables {
        slice_twist: build_pruning_table(threads, N_SLICE, N_TWIST, N_MOVE, |s, t, m| {
            (
                mv.slice[s * N_MOVE + m] as usize,
                mv.twist[t * N_MOVE + m] as usize,
            )
        })?,
        slice_flip: build_pruning_table(threads, N_SLICE, N_FLIP, N_MOVE, |s, f, m| {
            (
                mv.slice[s * N_MOVE + m] as usize,
                mv.flip[f * N_MOVE + m] as usize,
            )
        })?,
        corners_slice: build_pruning_table(
            threads,
            N_CORNERS,
            N_SLICE_PERM,
            N_PHASE2_MOVE,
            |c, p, k| {
                (
                    mv.corners[c * N_PHASE2_MOVE + k] as usize,
                    mv.slice_perm[p * N_PHASE2_MOVE + k] as usize,
                )
            },
        )?,
        edges_slice: build_pruning_table(
            threads,
            N_UD_EDGES,
            N_SLICE_PERM,
            N_PHASE2_MOVE,
            |e, p, k| {
                (
                    mv.ud_edges[e * N_PHASE2_MOVE + k] as usize,
                    mv.slice_perm[p * N_PHASE2_MOVE + k] as usize,
                )
            },
        )?,
    })
}

pub fn build_tables(threads: usize) -> Result<Tables, SolveError> {
    let threads = threads.max(1);
    let start = Instant::now();

    info!("Building move tables ({} threads)", threads);
    let mv = build_move_tables(threads)?;
    info!("Move tables done in {:.3}s", start.elapsed().as_secs_f64());

    let pr = build_pruning_tables(threads, &mv)?;
    info!(
        "Pruning tables done in {:.3}s",
        start.elapsed().as_secs_f64()
    );

    let tables = Tables { mv, pr };
    tables.check()?;
    Ok(tables)
}
