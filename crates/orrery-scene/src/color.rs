//! Per-vertex color buffer generation.
//!
//! Color buffers are flat RGBA f32 sequences, one quadruple per vertex,
//! cached alongside the geometry so identical parameter sets share one
//! buffer. Randomness is confined to this module and always seeded -
//! geometry generation stays bit-deterministic.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform moon surface color.
pub const MOON_COLOR: [f32; 4] = [0.8, 0.95, 0.95, 0.98];
/// Uniform orbital trace ring color.
pub const TRACE_COLOR: [f32; 4] = [0.95, 0.95, 0.95, 0.98];
/// Translucent overlay color for the wireframe lines.
pub const WIREFRAME_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 0.4];

/// Red/green jitter amplitude of the bright (shallow-water) tone.
const BRIGHT_JITTER: f32 = 0.45;
/// Red/green jitter amplitude of the dark (deep-ocean) tone.
const DARK_JITTER: f32 = 0.05;
/// Fixed blue/alpha of the dark tone; the configured base color only
/// shifts the bright tone.
const DARK_TONE: [f32; 2] = [0.70, 0.92];

/// Generate the earth's two-tone speckled color buffer.
///
/// Vertices in the lower two-thirds of the pole-to-pole layout, plus every
/// sixth vertex elsewhere, get the bright tone: jittered red/green over
/// the configured base blue and alpha. The rest get the fixed dark tone.
/// Deterministic for a given seed.
pub fn earth_colors(vertex_count: usize, base: [f32; 4], seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut colors = Vec::with_capacity(vertex_count * 4);
    for i in 0..vertex_count {
        if i > vertex_count / 3 || i % 6 == 0 {
            colors.extend_from_slice(&[
                base[0] + rng.random::<f32>() * BRIGHT_JITTER,
                base[1] + rng.random::<f32>() * BRIGHT_JITTER,
                base[2],
                base[3],
            ]);
        } else {
            colors.extend_from_slice(&[
                rng.random::<f32>() * DARK_JITTER,
                rng.random::<f32>() * DARK_JITTER,
                DARK_TONE[0],
                DARK_TONE[1],
            ]);
        }
    }
    colors
}

/// Fill a color buffer with one uniform RGBA value.
pub fn flat_colors(vertex_count: usize, rgba: [f32; 4]) -> Vec<f32> {
    let mut colors = Vec::with_capacity(vertex_count * 4);
    for _ in 0..vertex_count {
        colors.extend_from_slice(&rgba);
    }
    colors
}
