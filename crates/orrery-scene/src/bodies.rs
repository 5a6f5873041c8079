//! Scene bodies, their parameters, and the canonical spin table.

use glam::Vec3;

/// The bodies the scene renders, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Earth,
    Moon,
    Trace,
    /// Optional line overlay reusing the earth's vertex buffer.
    Wireframe,
}

/// Per-body rotation applied on top of the shared base transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpin {
    /// Radians advanced per animation tick.
    pub rate: f32,
    /// Rotation axis (unit length).
    pub axis: Vec3,
}

impl BodyKind {
    /// Canonical rate table.
    ///
    /// The earth tumbles around the (1,1,1) diagonal faster than the moon
    /// system turns around +Z; the Z rotation is what carries the
    /// off-center moon along its orbit. The trace ring stays fixed. The
    /// rates are a look, not orbital mechanics.
    pub fn spin(self) -> Option<BodySpin> {
        match self {
            BodyKind::Earth | BodyKind::Wireframe => Some(BodySpin {
                rate: 0.005,
                axis: Vec3::ONE.normalize(),
            }),
            BodyKind::Moon => Some(BodySpin {
                rate: 0.002,
                axis: Vec3::Z,
            }),
            BodyKind::Trace => None,
        }
    }
}

/// Externally configurable scene parameters, read every frame.
///
/// Defaults reproduce the original animation: a small earth at the origin,
/// the moon out at x = 0.961 with the trace ring underneath its orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    pub earth_radius: f32,
    pub moon_radius: f32,
    /// Moon center offset along +X; also the trace ring radius.
    pub moon_distance: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub trace_segments: u32,
    /// Earth bright-tone base color (RGBA in [0,1]).
    pub earth_color: [f32; 4],
    /// Seed for the earth's per-vertex color speckle.
    pub color_seed: u64,
    /// Draw the wireframe overlay on top of the earth.
    pub wireframe: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            earth_radius: 0.01593,
            moon_radius: 0.00434,
            moon_distance: 0.961,
            width_segments: 32,
            height_segments: 32,
            trace_segments: 128,
            earth_color: [0.0, 0.0, 0.87, 0.95],
            color_seed: 42,
            wireframe: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_outpaces_moon() {
        let earth = BodyKind::Earth.spin().unwrap();
        let moon = BodyKind::Moon.spin().unwrap();
        assert!(earth.rate > moon.rate);
    }

    #[test]
    fn test_wireframe_follows_earth() {
        assert_eq!(BodyKind::Wireframe.spin(), BodyKind::Earth.spin());
    }

    #[test]
    fn test_trace_is_static() {
        assert!(BodyKind::Trace.spin().is_none());
    }

    #[test]
    fn test_spin_axes_are_unit_length() {
        for body in [BodyKind::Earth, BodyKind::Moon] {
            let spin = body.spin().unwrap();
            assert!((spin.axis.length() - 1.0).abs() < 1e-6);
        }
    }
}
