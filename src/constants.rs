/// Page wiring and microphone tuning constants for the web front-end.
// DOM element ids
pub const CANVAS_ID: &str = "dots-canvas";
pub const STATUS_ID: &str = "dots-status";
pub const HELP_OVERLAY_ID: &str = "help-overlay";

// Frame step clamp; a backgrounded tab must not replay seconds of animation at once
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Microphone analyser
pub const MIC_FFT_SIZE: u32 = 1024;
pub const MIC_GAIN: f32 = 6.0; // raw RMS of normal speech sits well below 0.2
pub const MIC_MAX_LEVEL_TILES: f32 = 3.0; // loudest input stretches a dot to this many tiles
pub const MIC_LEVEL_SMOOTHING: f32 = 0.35; // new = (1-a)*old + a*target

// Demo drivers used without a microphone
pub const AUTO_ADVANCE_SEC: f32 = 4.0;
pub const SYNTHETIC_LEVEL_PERIOD_SEC: f32 = 0.05;
