use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;

use slot_traffic::config::{self, parse_percentage};
use slot_traffic::pace::{TickPace, DEFAULT_TICK_DELAY_MS};
use slot_traffic::simulation::{
    CategoryWeights, SimNetwork, VehicleCategory, VehicleGenerator, DEFAULT_CAR_PERCENT,
    DEFAULT_MOTORCYCLE_PERCENT,
};

#[derive(Parser)]
#[command(name = "slot_traffic")]
#[command(about = "Slot-based traffic simulation on a two-road map")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "40")]
    ticks: u32,

    /// Milliseconds to wait between ticks
    #[arg(long, default_value_t = DEFAULT_TICK_DELAY_MS)]
    delay_ms: u64,

    /// Halve the delay between ticks (repeatable)
    #[arg(long, action = ArgAction::Count)]
    faster: u8,

    /// Double the delay between ticks (repeatable)
    #[arg(long, action = ArgAction::Count)]
    slower: u8,

    /// Slots per lane on each road
    #[arg(long, default_value = "20")]
    slots: i32,

    /// North/east-bound lanes per road
    #[arg(long, default_value = "2")]
    ne_lanes: i32,

    /// South/west-bound lanes per road
    #[arg(long, default_value = "2")]
    sw_lanes: i32,

    /// Percentage of boundary draws that produce a car
    #[arg(long, value_parser = parse_percentage, default_value_t = DEFAULT_CAR_PERCENT)]
    car_percent: u32,

    /// Percentage of boundary draws that produce a motorcycle
    #[arg(long, value_parser = parse_percentage, default_value_t = DEFAULT_MOTORCYCLE_PERCENT)]
    motorcycle_percent: u32,

    /// Seed for reproducible vehicle generation
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut weights = CategoryWeights::default();
    config::apply_weights(
        &mut weights,
        &[
            (VehicleCategory::Car, cli.car_percent),
            (VehicleCategory::Motorcycle, cli.motorcycle_percent),
        ],
    )?;

    let mut pace = TickPace::new(cli.delay_ms);
    for _ in 0..cli.faster {
        pace.faster();
    }
    for _ in 0..cli.slower {
        pace.slower();
    }

    let generator = match cli.seed {
        Some(seed) => VehicleGenerator::new_with_seed(weights, seed),
        None => VehicleGenerator::new(weights),
    };

    run_headless(generator, &cli, pace);
    Ok(())
}

/// Run the demo map without graphics, printing snapshots after every tick
fn run_headless(generator: VehicleGenerator, cli: &Cli, mut pace: TickPace) {
    info!("Running slot traffic simulation in headless mode...");
    info!(
        "Ticks: {}, Delay: {}ms, Slots: {}, Lanes: {} NE / {} SW",
        cli.ticks,
        pace.delay_ms(),
        cli.slots,
        cli.ne_lanes,
        cli.sw_lanes
    );
    for (category, percent) in generator.weights().iter() {
        info!("{}: {}%", category.label(), percent);
    }

    let mut network = SimNetwork::build_demo_network(
        SimNetwork::with_generator(generator),
        cli.slots,
        cli.ne_lanes,
        cli.sw_lanes,
    );

    for lane in network.dangling_lanes() {
        info!("Lane {:?} has no consumer", lane);
    }

    println!("Initial state:");
    draw_map(&network);

    pace.start();
    let mut tick = 0;
    while pace.is_running() && tick < cli.ticks {
        network.tick();
        tick += 1;

        println!("--- After tick {} ---", tick);
        draw_map(&network);

        if tick < cli.ticks {
            std::thread::sleep(pace.delay());
        }
    }
    pace.stop();

    let stats = network.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", stats.ticks);
    info!("Vehicles generated: {}", stats.vehicles_generated);
    info!("Vehicles exited: {}", stats.vehicles_exited);
    info!("Vehicles on roads: {}", stats.vehicles_on_roads);
}

/// Print every road's snapshot side by side, west to east
fn draw_map(network: &SimNetwork) {
    let snapshots: Vec<Vec<String>> = network.roads().map(|road| road.snapshot()).collect();
    let rows = snapshots.iter().map(Vec::len).max().unwrap_or(0);

    for row in 0..rows {
        let line: Vec<&str> = snapshots
            .iter()
            .map(|snapshot| snapshot.get(row).map(String::as_str).unwrap_or(""))
            .collect();
        println!("{}", line.join("|"));
    }
    println!();
}
