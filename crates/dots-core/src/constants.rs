use std::time::Duration;

// Shared layout/animation tuning constants for the dot choreographies.

// Tile grid
pub const GRID_CELLS: u32 = 9; // surface is divided into GRID_CELLS x GRID_CELLS tiles
pub const SHAPE_COUNT: usize = 4;
pub const DEFAULT_BASE_SIZE: f32 = 20.0; // footprint before the first init()

// Palette, in shape order
pub const BLUE: u32 = 0x4285F4;
pub const RED: u32 = 0xEA4335;
pub const YELLOW: u32 = 0xFBBC05;
pub const GREEN: u32 = 0x34A853;
pub const DOT_COLORS: [u32; SHAPE_COUNT] = [BLUE, RED, YELLOW, GREEN];
pub const GRID_LINE_COLOR: u32 = 0x888888;

// Durations
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);
pub const REPLY_DURATION: Duration = Duration::from_millis(400);
pub const SHAKE_DURATION: Duration = Duration::from_millis(100);
pub const SHAKE_REPEATS: u32 = 4;
pub const THINK_REVERSE_PERIOD: Duration = Duration::from_millis(3000);

// Per-tick steps
pub const ROTATION_STEP_DEGREES: f32 = 3.0;
pub const LISTEN_PHASE_STEP: f32 = 0.07; // radians per tick
pub const LISTEN_ACTIVATION_THRESHOLD: f32 = 0.5;

// User speaking
pub const SPEAK_EASING: f32 = 0.1;
pub const SPEAK_JITTER: f32 = 0.5; // +/- fraction of the input level

// Replying
pub const REPLY_AMPLITUDE: f32 = 1.2; // px of radial pulse per tick

// Layout targets, in tiles
pub const CIRCLE_RADIUS_TILES: f32 = 1.5;
pub const HORIZONTAL_X_TILES: [f32; SHAPE_COUNT] = [1.0, 3.0, 5.0, 7.0];
pub const IDLE_POSITIONS_TILES: [[f32; 2]; SHAPE_COUNT] =
    [[2.0, 2.0], [5.0, 4.3], [5.0, 5.7], [6.0, 3.0]];
pub const IDLE_SCALES: [f32; SHAPE_COUNT] = [3.0, 1.0, 1.25, 0.7];
