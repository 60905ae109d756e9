use std::path::PathBuf;

use clap::Parser;
use dots_core::State;

/// Render the dot choreographies to numbered PNG frames.
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(name = "dots-native", version, about)]
pub struct Args {
    /// Directory receiving `frame_NNNNN.png`
    #[arg(default_value = "frames")]
    pub out_dir: PathBuf,

    /// Width and height of the square surface, in pixels
    #[arg(default_value_t = 360, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// States to play in order, e.g. `thinking replying`
    #[arg(default_values_t = State::ALL.to_vec())]
    pub states: Vec<State>,

    /// Draw the tile grid under the dots
    #[arg(long)]
    pub grid: bool,
}
