use std::path::PathBuf;

use structopt::StructOpt;

use chip8_core::emulator::observer::LogObserver;
use chip8_core::emulator::random::RngSource;
use chip8_core::emulator::{Config, Emulator, Step};

/// Run a CHIP-8 program without a screen and print where it ended up.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of instructions to execute
    #[structopt(short, long, default_value = "1000")]
    cycles: usize,

    /// Instructions executed between two 60 Hz timer ticks
    #[structopt(long, default_value = "10")]
    cycles_per_tick: usize,

    /// Seed for the random number instruction
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Memory size in bytes
    #[structopt(long, default_value = "4096")]
    memory: usize,

    /// Display width in pixels
    #[structopt(long, default_value = "64")]
    width: usize,

    /// Display height in pixels
    #[structopt(long, default_value = "32")]
    height: usize,

    /// Log every instruction as it runs (needs RUST_LOG=trace)
    #[structopt(short, long)]
    trace: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        memory_size: opt.memory,
        display_width: opt.width,
        display_height: opt.height,
        ..Config::default()
    };
    let mut emulator = Emulator::with_config(config)?;
    if let Some(seed) = opt.seed {
        emulator.set_random_source(RngSource::seeded(seed));
    }
    if opt.trace {
        emulator.set_observer(LogObserver);
    }

    // Load instructions into emulator memory
    emulator.load(&program)?;

    // Start execution
    let cycles_per_tick = opt.cycles_per_tick.max(1);
    for cycle in 0..opt.cycles {
        match emulator.step()? {
            Step::Blocked { register } => {
                log::info!("Waiting for a key for V{:X}, stopping", register);
                break;
            }
            Step::Unknown { opcode } => log::debug!("Skipped {:#06x}", opcode),
            Step::Executed(_) => {}
        }
        if (cycle + 1) % cycles_per_tick == 0 {
            emulator.tick_timers();
        }
    }

    print!("{}", emulator);
    println!("{:?}", emulator.snapshot());

    Ok(())
}
