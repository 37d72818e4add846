use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use emu8_core::CPU_CYCLES_PER_TIMER_CYCLE;

/// Command line options.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "chip8", version, about = "Runs a Chip-8 program in a window")]
pub struct Config {
    /// The program to run, a .ch8 file
    pub rom: PathBuf,

    /// Instructions executed per 60Hz frame
    #[arg(long, default_value_t = CPU_CYCLES_PER_TIMER_CYCLE)]
    pub cycles_per_frame: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    pub scale: u32,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print every executed instruction to stdout
    #[arg(long)]
    pub trace: bool,
}

impl Config {
    /// Parses `args`, the program name first.
    ///
    /// Bad usage prints the usage line and gives None, so the caller can exit
    /// cleanly without running anything. `--help` and `--version` exit here.
    pub fn from_args<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Config::try_parse_from(args) {
            Ok(config) => Some(config),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                log::debug!("{}", e);
                println!("{}", Config::command().render_usage());
                None
            }
        }
    }
}
