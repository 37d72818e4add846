use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context};

use emu8_core::Chip8;

const ROM_EXTENSION: &str = "ch8";

/// Loads the program at `path` into `chip8`.
///
/// The file must have a `.ch8` extension, be readable, and fit in memory.
pub fn load(chip8: &mut Chip8, path: &Path) -> anyhow::Result<()> {
    check_extension(path)?;
    let file = File::open(path).with_context(|| format!("couldn't open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("couldn't load {}", path.display()))
}

fn check_extension(path: &Path) -> anyhow::Result<()> {
    match path.extension() {
        Some(extension) if extension == ROM_EXTENSION => Ok(()),
        _ => bail!("{} is not a .{} file", path.display(), ROM_EXTENSION),
    }
}
