//! Unary modifier samplers.
//!
//! Each modifier wraps exactly one input sampler and maps its output (or its
//! query coordinate) through a deterministic function. Modifiers are generic
//! over the input, so they compose with concrete primitives as well as with
//! shared graph nodes.

use crate::error::ConfigError;
use crate::fractal::{Fractal, FractalMode};
use crate::noise::{NoiseField, Perlin, Point2, Point3, Point4, lerp};
use crate::rng::DeterministicRng;

/// Clamp the input's output to `[min, max]`.
///
/// NaN input values propagate unchanged.
#[derive(Clone)]
pub struct Clamp<N> {
    input: N,
    min: f64,
    max: f64,
}

impl<N> Clamp<N> {
    /// Create a clamp modifier. Fails when the bounds are non-finite or
    /// inverted.
    pub fn new(input: N, min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidParameter(format!(
                "clamp bounds must be finite with min <= max, got [{}, {}]",
                min, max
            )));
        }
        Ok(Self { input, min, max })
    }
}

impl<P, N: NoiseField<P>> NoiseField<P> for Clamp<N> {
    fn sample(&self, point: P) -> f64 {
        self.input.sample(point).clamp(self.min, self.max)
    }
}

/// Absolute value of the input's output.
#[derive(Clone)]
pub struct Abs<N> {
    input: N,
}

impl<N> Abs<N> {
    /// Create an absolute-value modifier.
    pub fn new(input: N) -> Self {
        Self { input }
    }
}

impl<P, N: NoiseField<P>> NoiseField<P> for Abs<N> {
    fn sample(&self, point: P) -> f64 {
        self.input.sample(point).abs()
    }
}

/// Negation of the input's output.
#[derive(Clone)]
pub struct Invert<N> {
    input: N,
}

impl<N> Invert<N> {
    /// Create an inversion modifier.
    pub fn new(input: N) -> Self {
        Self { input }
    }
}

impl<P, N: NoiseField<P>> NoiseField<P> for Invert<N> {
    fn sample(&self, point: P) -> f64 {
        -self.input.sample(point)
    }
}

/// `input * scale + bias`.
#[derive(Clone)]
pub struct ScaleBias<N> {
    input: N,
    scale: f64,
    bias: f64,
}

impl<N> ScaleBias<N> {
    /// Create a scale-and-bias modifier.
    pub fn new(input: N, scale: f64, bias: f64) -> Self {
        Self { input, scale, bias }
    }
}

impl<P, N: NoiseField<P>> NoiseField<P> for ScaleBias<N> {
    fn sample(&self, point: P) -> f64 {
        self.input.sample(point) * self.scale + self.bias
    }
}

/// One control point of a [`Curve`] remap table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Input value this point anchors.
    pub input: f64,
    /// Output value at the anchor.
    pub output: f64,
}

/// Remap the input's output through a monotonic control-point table.
///
/// Values between anchors interpolate linearly; values outside the table
/// clamp to the first or last output. NaN input values propagate as NaN.
#[derive(Clone)]
pub struct Curve<N> {
    input: N,
    control_points: Vec<ControlPoint>,
}

impl<N> Curve<N> {
    /// Create a curve modifier. Requires at least two control points with
    /// strictly increasing, finite inputs.
    pub fn new(input: N, control_points: Vec<ControlPoint>) -> Result<Self, ConfigError> {
        if control_points.len() < 2 {
            return Err(ConfigError::InvalidParameter(format!(
                "curve requires at least 2 control points, got {}",
                control_points.len()
            )));
        }
        for point in &control_points {
            if !point.input.is_finite() || !point.output.is_finite() {
                return Err(ConfigError::InvalidParameter(format!(
                    "curve control points must be finite, got ({}, {})",
                    point.input, point.output
                )));
            }
        }
        for pair in control_points.windows(2) {
            if pair[0].input >= pair[1].input {
                return Err(ConfigError::InvalidParameter(format!(
                    "curve control point inputs must be strictly increasing, got {} then {}",
                    pair[0].input, pair[1].input
                )));
            }
        }
        Ok(Self {
            input,
            control_points,
        })
    }

    fn remap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let points = &self.control_points;
        let idx = points.partition_point(|p| p.input < value);
        if idx == 0 {
            return points[0].output;
        }
        if idx == points.len() {
            return points[points.len() - 1].output;
        }
        let a = points[idx - 1];
        let b = points[idx];
        let t = (value - a.input) / (b.input - a.input);
        lerp(a.output, b.output, t)
    }
}

impl<P, N: NoiseField<P>> NoiseField<P> for Curve<N> {
    fn sample(&self, point: P) -> f64 {
        self.remap(self.input.sample(point))
    }
}

/// Perturb the query coordinate with auxiliary noise before sampling.
///
/// Each axis gets its own fBm Perlin displacer, seeded through the tagged
/// BLAKE3 derivation ("x", "y", "z", "w"), so displacement fields are
/// decorrelated across axes. `power` scales the displacement magnitude and
/// `roughness` is the displacer octave count.
#[derive(Clone)]
pub struct Turbulence<N> {
    input: N,
    displacers: Vec<Fractal<Perlin>>,
    power: f64,
}

impl<N> Turbulence<N> {
    const AXES: [&'static str; 4] = ["x", "y", "z", "w"];

    /// Create a turbulence modifier.
    ///
    /// Fails when `roughness` is zero, `frequency` is invalid, or `power` is
    /// non-finite.
    pub fn new(
        input: N,
        seed: u64,
        power: f64,
        roughness: u32,
        frequency: f64,
    ) -> Result<Self, ConfigError> {
        if !power.is_finite() {
            return Err(ConfigError::InvalidParameter(format!(
                "turbulence power must be finite, got {}",
                power
            )));
        }
        let mut displacers = Vec::with_capacity(Self::AXES.len());
        for axis in Self::AXES {
            let axis_seed = DeterministicRng::derive_tagged_seed(seed, axis);
            displacers.push(Fractal::new(
                axis_seed,
                roughness,
                frequency,
                2.0,
                0.5,
                FractalMode::Fbm,
                |s, f| Ok(Perlin::new(s).with_frequency(f)),
            )?);
        }
        Ok(Self {
            input,
            displacers,
            power,
        })
    }
}

impl<N: NoiseField<Point2>> NoiseField<Point2> for Turbulence<N> {
    fn sample(&self, point: Point2) -> f64 {
        let dx = self.displacers[0].sample(point) * self.power;
        let dy = self.displacers[1].sample(point) * self.power;
        self.input.sample([point[0] + dx, point[1] + dy])
    }
}

impl<N: NoiseField<Point3>> NoiseField<Point3> for Turbulence<N> {
    fn sample(&self, point: Point3) -> f64 {
        let dx = self.displacers[0].sample(point) * self.power;
        let dy = self.displacers[1].sample(point) * self.power;
        let dz = self.displacers[2].sample(point) * self.power;
        self.input
            .sample([point[0] + dx, point[1] + dy, point[2] + dz])
    }
}

impl<N: NoiseField<Point4>> NoiseField<Point4> for Turbulence<N> {
    fn sample(&self, point: Point4) -> f64 {
        let dx = self.displacers[0].sample(point) * self.power;
        let dy = self.displacers[1].sample(point) * self.power;
        let dz = self.displacers[2].sample(point) * self.power;
        let dw = self.displacers[3].sample(point) * self.power;
        self.input.sample([
            point[0] + dx,
            point[1] + dy,
            point[2] + dz,
            point[3] + dw,
        ])
    }
}

/// Scale the query coordinate uniformly before sampling the input.
#[derive(Clone)]
pub struct ScalePoint<N> {
    input: N,
    factor: f64,
}

impl<N> ScalePoint<N> {
    /// Create a coordinate-scaling modifier.
    pub fn new(input: N, factor: f64) -> Self {
        Self { input, factor }
    }
}

impl<N: NoiseField<Point2>> NoiseField<Point2> for ScalePoint<N> {
    fn sample(&self, point: Point2) -> f64 {
        self.input
            .sample([point[0] * self.factor, point[1] * self.factor])
    }
}

impl<N: NoiseField<Point3>> NoiseField<Point3> for ScalePoint<N> {
    fn sample(&self, point: Point3) -> f64 {
        self.input.sample([
            point[0] * self.factor,
            point[1] * self.factor,
            point[2] * self.factor,
        ])
    }
}

impl<N: NoiseField<Point4>> NoiseField<Point4> for ScalePoint<N> {
    fn sample(&self, point: Point4) -> f64 {
        self.input.sample([
            point[0] * self.factor,
            point[1] * self.factor,
            point[2] * self.factor,
            point[3] * self.factor,
        ])
    }
}

/// Translate the query coordinate before sampling the input.
///
/// Holds offsets for up to four axes; the first `d` entries apply for a
/// `d`-dimensional query. Arity against the declared dimensionality is
/// checked where the sampler is assembled.
#[derive(Clone)]
pub struct TranslatePoint<N> {
    input: N,
    offset: [f64; 4],
}

impl<N> TranslatePoint<N> {
    /// Create a coordinate-translating modifier from 2 to 4 offsets.
    pub fn new(input: N, offset: &[f64]) -> Result<Self, ConfigError> {
        if offset.len() < 2 || offset.len() > 4 {
            return Err(ConfigError::InvalidParameter(format!(
                "translate offsets must have 2 to 4 components, got {}",
                offset.len()
            )));
        }
        for component in offset {
            if !component.is_finite() {
                return Err(ConfigError::InvalidParameter(format!(
                    "translate offsets must be finite, got {}",
                    component
                )));
            }
        }
        let mut padded = [0.0; 4];
        padded[..offset.len()].copy_from_slice(offset);
        Ok(Self {
            input,
            offset: padded,
        })
    }
}

impl<N: NoiseField<Point2>> NoiseField<Point2> for TranslatePoint<N> {
    fn sample(&self, point: Point2) -> f64 {
        self.input
            .sample([point[0] + self.offset[0], point[1] + self.offset[1]])
    }
}

impl<N: NoiseField<Point3>> NoiseField<Point3> for TranslatePoint<N> {
    fn sample(&self, point: Point3) -> f64 {
        self.input.sample([
            point[0] + self.offset[0],
            point[1] + self.offset[1],
            point[2] + self.offset[2],
        ])
    }
}

impl<N: NoiseField<Point4>> NoiseField<Point4> for TranslatePoint<N> {
    fn sample(&self, point: Point4) -> f64 {
        self.input.sample([
            point[0] + self.offset[0],
            point[1] + self.offset[1],
            point[2] + self.offset[2],
            point[3] + self.offset[3],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{Constant, Perlin};

    #[test]
    fn test_clamp() {
        let clamp = Clamp::new(Constant::new(2.5), -1.0, 1.0).unwrap();
        assert_eq!(clamp.sample([0.0, 0.0]), 1.0);

        let clamp = Clamp::new(Constant::new(-2.5), -1.0, 1.0).unwrap();
        assert_eq!(clamp.sample([0.0, 0.0]), -1.0);

        let clamp = Clamp::new(Constant::new(0.25), -1.0, 1.0).unwrap();
        assert_eq!(clamp.sample([0.0, 0.0]), 0.25);
    }

    #[test]
    fn test_clamp_rejects_bad_bounds() {
        assert!(Clamp::new(Constant::new(0.0), 1.0, -1.0).is_err());
        assert!(Clamp::new(Constant::new(0.0), f64::NAN, 1.0).is_err());
        assert!(Clamp::new(Constant::new(0.0), 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamp_nan_passes_through() {
        let clamp = Clamp::new(Constant::new(f64::NAN), -1.0, 1.0).unwrap();
        assert!(clamp.sample([0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_abs_and_invert() {
        let abs = Abs::new(Constant::new(-0.75));
        assert_eq!(abs.sample([0.0, 0.0]), 0.75);

        let invert = Invert::new(Constant::new(0.75));
        assert_eq!(invert.sample([0.0, 0.0]), -0.75);
    }

    #[test]
    fn test_scale_bias() {
        let sb = ScaleBias::new(Constant::new(0.5), 2.0, -1.0);
        assert_eq!(sb.sample([0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_curve_interpolates() {
        let curve = Curve::new(
            Constant::new(0.5),
            vec![
                ControlPoint {
                    input: 0.0,
                    output: 0.0,
                },
                ControlPoint {
                    input: 1.0,
                    output: 2.0,
                },
            ],
        )
        .unwrap();
        assert!((curve.sample([0.0, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_curve_clamps_ends() {
        let points = vec![
            ControlPoint {
                input: -1.0,
                output: 0.0,
            },
            ControlPoint {
                input: 1.0,
                output: 1.0,
            },
        ];
        let below = Curve::new(Constant::new(-5.0), points.clone()).unwrap();
        assert_eq!(below.sample([0.0, 0.0]), 0.0);
        let above = Curve::new(Constant::new(5.0), points).unwrap();
        assert_eq!(above.sample([0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_curve_hits_anchor_exactly() {
        let curve = Curve::new(
            Constant::new(0.25),
            vec![
                ControlPoint {
                    input: -1.0,
                    output: -1.0,
                },
                ControlPoint {
                    input: 0.25,
                    output: 0.9,
                },
                ControlPoint {
                    input: 1.0,
                    output: 1.0,
                },
            ],
        )
        .unwrap();
        assert!((curve.sample([0.0, 0.0]) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_curve_rejects_bad_tables() {
        let one_point = vec![ControlPoint {
            input: 0.0,
            output: 0.0,
        }];
        assert!(Curve::new(Constant::new(0.0), one_point).is_err());

        let unordered = vec![
            ControlPoint {
                input: 1.0,
                output: 0.0,
            },
            ControlPoint {
                input: 0.0,
                output: 1.0,
            },
        ];
        assert!(Curve::new(Constant::new(0.0), unordered).is_err());

        let duplicated = vec![
            ControlPoint {
                input: 0.5,
                output: 0.0,
            },
            ControlPoint {
                input: 0.5,
                output: 1.0,
            },
        ];
        assert!(Curve::new(Constant::new(0.0), duplicated).is_err());
    }

    #[test]
    fn test_curve_nan_propagates() {
        let curve = Curve::new(
            Constant::new(f64::NAN),
            vec![
                ControlPoint {
                    input: 0.0,
                    output: 0.0,
                },
                ControlPoint {
                    input: 1.0,
                    output: 1.0,
                },
            ],
        )
        .unwrap();
        assert!(curve.sample([0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_turbulence_deterministic_and_displacing() {
        let t1 = Turbulence::new(Perlin::new(7), 42, 0.5, 3, 1.0).unwrap();
        let t2 = Turbulence::new(Perlin::new(7), 42, 0.5, 3, 1.0).unwrap();
        let plain = Perlin::new(7);

        let p = [1.3, 2.7];
        assert_eq!(t1.sample(p), t2.sample(p));
        // Displacement moves the query off the plain sample.
        assert_ne!(t1.sample(p), plain.sample(p));
    }

    #[test]
    fn test_turbulence_zero_power_is_identity() {
        let t = Turbulence::new(Perlin::new(7), 42, 0.0, 3, 1.0).unwrap();
        let plain = Perlin::new(7);
        let p = [1.3, 2.7];
        assert_eq!(t.sample(p), plain.sample(p));
        let p3 = [1.3, 2.7, -0.4];
        assert_eq!(t.sample(p3), plain.sample(p3));
    }

    #[test]
    fn test_turbulence_rejects_zero_roughness() {
        assert!(Turbulence::new(Perlin::new(7), 42, 0.5, 0, 1.0).is_err());
    }

    #[test]
    fn test_scale_point() {
        let base = Perlin::new(3);
        let scaled = ScalePoint::new(Perlin::new(3), 2.0);
        assert_eq!(scaled.sample([1.5, 2.5]), base.sample([3.0, 5.0]));
    }

    #[test]
    fn test_translate_point() {
        let base = Perlin::new(3);
        let moved = TranslatePoint::new(Perlin::new(3), &[1.0, -2.0]).unwrap();
        assert_eq!(moved.sample([0.5, 0.5]), base.sample([1.5, -1.5]));
    }

    #[test]
    fn test_translate_rejects_bad_offsets() {
        assert!(TranslatePoint::new(Constant::new(0.0), &[1.0]).is_err());
        assert!(TranslatePoint::new(Constant::new(0.0), &[1.0; 5]).is_err());
        assert!(TranslatePoint::new(Constant::new(0.0), &[1.0, f64::NAN]).is_err());
    }
}
