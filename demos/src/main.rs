//! Headless pathing demo.
//!
//! Several units request paths over one shared map while a builder thread
//! keeps opening and closing a gate in a wall. Each unit then follows its
//! chain cell by cell and reports where it ended up.
//!
//! Usage: `repair-demo [seed]`

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use repair_core::{Cell, CellMapping, GridConfig, WorldPoint};
use repair_paths::{IMPASSABLE, PathNode, WeightedMap, list_to_point, point_to_point};

const UNITS: usize = 6;
const GATE_TOGGLES: usize = 500;
const MUD_WEIGHT: i32 = 4;

struct Unit {
    id: usize,
    pos: WorldPoint,
    dest: WorldPoint,
}

struct Report {
    id: usize,
    waypoints: Vec<WorldPoint>,
    rally: Option<Cell>,
}

fn random_point(rng: &mut impl Rng, cfg: &GridConfig) -> WorldPoint {
    let w = (cfg.cols * cfg.cell_size) as f32;
    let h = (cfg.rows * cfg.cell_size) as f32;
    WorldPoint::new(rng.random_range(0.0..w), rng.random_range(0.0..h))
}

/// Wall down the middle column with a single gate, plus random mud.
fn build_map(cfg: &GridConfig, rng: &mut impl Rng) -> (WeightedMap, Cell) {
    let map = WeightedMap::from_config(cfg);
    let wall_col = cfg.cols / 2;
    let gate = Cell::new(cfg.rows / 2, wall_col);
    map.fill_tiles(
        (0..cfg.rows)
            .map(|r| Cell::new(r, wall_col))
            .filter(|&c| c != gate),
        IMPASSABLE,
    );
    for c in cfg.extent() {
        if c.col != wall_col && rng.random_bool(0.1) {
            map.fill_tile(c, MUD_WEIGHT);
        }
    }
    (map, gate)
}

/// Walk a unit along `path`, one cell per frame, returning the visited
/// world positions.
fn follow(path: &PathNode, mapping: CellMapping) -> Vec<WorldPoint> {
    path.iter().map(|n| mapping.to_world(n.cell)).collect()
}

fn run_unit(map: &WeightedMap, mapping: CellMapping, rally: &[Cell], unit: &Unit) -> Report {
    let from = mapping.to_cell(unit.pos);
    let to = mapping.to_cell(unit.dest);

    // The head of the chain is the unit's own cell.
    let waypoints = map
        .find_path(&point_to_point(), &[from], &[to])
        .map(|path| follow(&path, mapping))
        .unwrap_or_default();

    // Reversed list-to-point: head at the unit, tail at the nearest rally point.
    let rally = map
        .find_path(&list_to_point(true), rally, &[from])
        .map(|path| path.tail().cell);

    Report {
        id: unit.id,
        waypoints,
        rally,
    }
}

/// Route every unit on its own thread. Reports come back in unit order; a
/// panicking unit thread takes the caller down with it.
fn run_units(
    map: &WeightedMap,
    mapping: CellMapping,
    rally: &[Cell],
    units: &[Unit],
) -> Vec<Report> {
    std::thread::scope(|s| {
        let handles: Vec<_> = units
            .iter()
            .map(|unit| s.spawn(move || run_unit(map, mapping, rally, unit)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("unit thread panicked"))
            .collect()
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 1,
    };
    let cfg = GridConfig::default();
    cfg.validate()?;
    let mapping = cfg.mapping();
    let mut rng = StdRng::seed_from_u64(seed);

    let (map, gate) = build_map(&cfg, &mut rng);
    let rally = [
        Cell::new(0, 0),
        Cell::new(cfg.rows - 1, 0),
        Cell::new(0, cfg.cols - 1),
        Cell::new(cfg.rows - 1, cfg.cols - 1),
    ];
    let units: Vec<Unit> = (0..UNITS)
        .map(|id| Unit {
            id,
            pos: random_point(&mut rng, &cfg),
            dest: random_point(&mut rng, &cfg),
        })
        .collect();

    let toggles = AtomicUsize::new(0);
    let reports: Vec<Report> = std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..GATE_TOGGLES {
                if i % 2 == 0 {
                    map.fill_tile(gate, IMPASSABLE);
                } else {
                    map.clear_tile(gate);
                }
                toggles.fetch_add(1, Ordering::Relaxed);
            }
        });
        run_units(&map, mapping, &rally, &units)
    });

    println!(
        "grid {} ({} filled tiles), gate at {gate} toggled {} times",
        cfg.extent(),
        map.filled_len(),
        toggles.load(Ordering::Relaxed)
    );
    for report in &reports {
        let unit = &units[report.id];
        match (report.waypoints.first(), report.waypoints.last()) {
            (Some(first), Some(last)) => println!(
                "unit {}: {} -> {} in {} steps (asked for {})",
                report.id,
                first,
                last,
                report.waypoints.len() - 1,
                unit.dest
            ),
            _ => println!("unit {}: no path from {} to {}", report.id, unit.pos, unit.dest),
        }
        match report.rally {
            Some(cell) => println!("  nearest rally point {cell}"),
            None => println!("  no rally point reachable"),
        }
    }
    Ok(())
}
