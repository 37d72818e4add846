mod audio;
mod config;
mod keymap;
mod rom;
mod run;

use emu8_core::{Chip8, Trace};

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args_os()) {
        Some(config) => config,
        None => return Ok(()),
    };

    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    rom::load(&mut chip8, &config.rom)?;

    if config.trace {
        chip8.set_observer(Box::new(|trace: &Trace| {
            let mnemonic = trace.mnemonic.unwrap_or("????");
            match trace.fault {
                Some(fault) => println!(
                    "{:#05x}  {:04x}  {:<6} {}",
                    trace.pc, trace.opcode, mnemonic, fault
                ),
                None => println!("{:#05x}  {:04x}  {}", trace.pc, trace.opcode, mnemonic),
            }
        }));
    }

    log::info!(
        "running {} at {} instructions per frame",
        config.rom.display(),
        config.cycles_per_frame
    );
    run::run(chip8, &config)
}
