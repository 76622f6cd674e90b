//! Dimension-erased sampler handles.
//!
//! A [`Sampler`] wraps a shared, immutable noise graph node behind its
//! dimensionality. Composition methods check operand dimensionality up
//! front and fail fast with [`ConfigError`]; after construction, sampling
//! is total and lock-free from any number of threads.

use std::fmt;
use std::sync::Arc;

use crate::combine::{Add, Blend, Max, Min, Multiply, Select};
use crate::error::ConfigError;
use crate::modifier::{
    Abs, Clamp, ControlPoint, Curve, Invert, ScaleBias, ScalePoint, TranslatePoint, Turbulence,
};
use crate::noise::{Constant, NoiseField, Point2, Point3, Point4};

/// Shared handle to an evaluable field node.
pub type SharedField<P> = Arc<dyn NoiseField<P> + Send + Sync>;

/// Supported coordinate dimensionalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Two dimensions.
    D2,
    /// Three dimensions.
    D3,
    /// Four dimensions.
    D4,
}

impl Dimension {
    /// Number of coordinates per query point.
    pub fn arity(self) -> usize {
        match self {
            Dimension::D2 => 2,
            Dimension::D3 => 3,
            Dimension::D4 => 4,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::D2 => write!(f, "2d"),
            Dimension::D3 => write!(f, "3d"),
            Dimension::D4 => write!(f, "4d"),
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::D2),
            3 => Ok(Dimension::D3),
            4 => Ok(Dimension::D4),
            other => Err(ConfigError::UnsupportedDimensions(other)),
        }
    }
}

/// A built sampler: the root of an immutable evaluation graph.
///
/// Cloning is cheap (`Arc`), so one sampler can feed several composite
/// parents; the graph becomes a DAG with shared ownership and the node
/// lives as long as its longest-lived holder. Cycles are unrepresentable:
/// composites only ever reference already-built samplers.
#[derive(Clone)]
pub enum Sampler {
    /// A 2D field.
    D2(SharedField<Point2>),
    /// A 3D field.
    D3(SharedField<Point3>),
    /// A 4D field.
    D4(SharedField<Point4>),
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sampler({})", self.dimension())
    }
}

#[inline]
fn coord(point: &[f64], index: usize) -> f64 {
    point.get(index).copied().unwrap_or(0.0)
}

impl Sampler {
    /// Wrap a 2D field.
    pub fn from_2d<N>(field: N) -> Self
    where
        N: NoiseField<Point2> + Send + Sync + 'static,
    {
        Sampler::D2(Arc::new(field))
    }

    /// Wrap a 3D field.
    pub fn from_3d<N>(field: N) -> Self
    where
        N: NoiseField<Point3> + Send + Sync + 'static,
    {
        Sampler::D3(Arc::new(field))
    }

    /// Wrap a 4D field.
    pub fn from_4d<N>(field: N) -> Self
    where
        N: NoiseField<Point4> + Send + Sync + 'static,
    {
        Sampler::D4(Arc::new(field))
    }

    /// A constant field of the given dimensionality.
    pub fn constant(dimension: Dimension, value: f64) -> Self {
        match dimension {
            Dimension::D2 => Sampler::from_2d(Constant::new(value)),
            Dimension::D3 => Sampler::from_3d(Constant::new(value)),
            Dimension::D4 => Sampler::from_4d(Constant::new(value)),
        }
    }

    /// This sampler's dimensionality.
    pub fn dimension(&self) -> Dimension {
        match self {
            Sampler::D2(_) => Dimension::D2,
            Sampler::D3(_) => Dimension::D3,
            Sampler::D4(_) => Dimension::D4,
        }
    }

    /// Sample at a coordinate slice.
    ///
    /// Evaluation is total: missing trailing coordinates read as 0.0 and
    /// extra coordinates are ignored, so a mismatched slice length is never
    /// an error. Non-finite coordinates propagate as NaN.
    pub fn sample(&self, point: &[f64]) -> f64 {
        match self {
            Sampler::D2(f) => f.sample([coord(point, 0), coord(point, 1)]),
            Sampler::D3(f) => f.sample([coord(point, 0), coord(point, 1), coord(point, 2)]),
            Sampler::D4(f) => f.sample([
                coord(point, 0),
                coord(point, 1),
                coord(point, 2),
                coord(point, 3),
            ]),
        }
    }

    /// Sample with two coordinates (missing axes read as 0.0).
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        self.sample(&[x, y])
    }

    /// Sample with three coordinates.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(&[x, y, z])
    }

    /// Sample with four coordinates.
    pub fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(&[x, y, z, w])
    }

    fn into_2d(self) -> Result<SharedField<Point2>, ConfigError> {
        match self {
            Sampler::D2(f) => Ok(f),
            other => Err(ConfigError::DimensionMismatch {
                expected: Dimension::D2,
                actual: other.dimension(),
            }),
        }
    }

    fn into_3d(self) -> Result<SharedField<Point3>, ConfigError> {
        match self {
            Sampler::D3(f) => Ok(f),
            other => Err(ConfigError::DimensionMismatch {
                expected: Dimension::D3,
                actual: other.dimension(),
            }),
        }
    }

    fn into_4d(self) -> Result<SharedField<Point4>, ConfigError> {
        match self {
            Sampler::D4(f) => Ok(f),
            other => Err(ConfigError::DimensionMismatch {
                expected: Dimension::D4,
                actual: other.dimension(),
            }),
        }
    }

    // -----------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------

    /// Clamp the output to `[min, max]`.
    pub fn clamp(self, min: f64, max: f64) -> Result<Sampler, ConfigError> {
        Ok(match self {
            Sampler::D2(f) => Sampler::from_2d(Clamp::new(f, min, max)?),
            Sampler::D3(f) => Sampler::from_3d(Clamp::new(f, min, max)?),
            Sampler::D4(f) => Sampler::from_4d(Clamp::new(f, min, max)?),
        })
    }

    /// Absolute value of the output.
    pub fn abs(self) -> Sampler {
        match self {
            Sampler::D2(f) => Sampler::from_2d(Abs::new(f)),
            Sampler::D3(f) => Sampler::from_3d(Abs::new(f)),
            Sampler::D4(f) => Sampler::from_4d(Abs::new(f)),
        }
    }

    /// Negate the output.
    pub fn invert(self) -> Sampler {
        match self {
            Sampler::D2(f) => Sampler::from_2d(Invert::new(f)),
            Sampler::D3(f) => Sampler::from_3d(Invert::new(f)),
            Sampler::D4(f) => Sampler::from_4d(Invert::new(f)),
        }
    }

    /// `output * scale + bias`.
    pub fn scale_bias(self, scale: f64, bias: f64) -> Sampler {
        match self {
            Sampler::D2(f) => Sampler::from_2d(ScaleBias::new(f, scale, bias)),
            Sampler::D3(f) => Sampler::from_3d(ScaleBias::new(f, scale, bias)),
            Sampler::D4(f) => Sampler::from_4d(ScaleBias::new(f, scale, bias)),
        }
    }

    /// Remap the output through a monotonic control-point table.
    pub fn curve(self, control_points: Vec<ControlPoint>) -> Result<Sampler, ConfigError> {
        Ok(match self {
            Sampler::D2(f) => Sampler::from_2d(Curve::new(f, control_points)?),
            Sampler::D3(f) => Sampler::from_3d(Curve::new(f, control_points)?),
            Sampler::D4(f) => Sampler::from_4d(Curve::new(f, control_points)?),
        })
    }

    /// Perturb the query coordinate with auxiliary noise before sampling.
    pub fn turbulence(
        self,
        seed: u64,
        power: f64,
        roughness: u32,
        frequency: f64,
    ) -> Result<Sampler, ConfigError> {
        Ok(match self {
            Sampler::D2(f) => {
                Sampler::from_2d(Turbulence::new(f, seed, power, roughness, frequency)?)
            }
            Sampler::D3(f) => {
                Sampler::from_3d(Turbulence::new(f, seed, power, roughness, frequency)?)
            }
            Sampler::D4(f) => {
                Sampler::from_4d(Turbulence::new(f, seed, power, roughness, frequency)?)
            }
        })
    }

    /// Scale the query coordinate uniformly before sampling.
    pub fn scale_point(self, factor: f64) -> Sampler {
        match self {
            Sampler::D2(f) => Sampler::from_2d(ScalePoint::new(f, factor)),
            Sampler::D3(f) => Sampler::from_3d(ScalePoint::new(f, factor)),
            Sampler::D4(f) => Sampler::from_4d(ScalePoint::new(f, factor)),
        }
    }

    /// Translate the query coordinate before sampling. The offset arity
    /// must match this sampler's dimensionality.
    pub fn translate_point(self, offset: &[f64]) -> Result<Sampler, ConfigError> {
        if offset.len() != self.dimension().arity() {
            return Err(ConfigError::InvalidParameter(format!(
                "translate offsets must have {} components for a {} sampler, got {}",
                self.dimension().arity(),
                self.dimension(),
                offset.len()
            )));
        }
        Ok(match self {
            Sampler::D2(f) => Sampler::from_2d(TranslatePoint::new(f, offset)?),
            Sampler::D3(f) => Sampler::from_3d(TranslatePoint::new(f, offset)?),
            Sampler::D4(f) => Sampler::from_4d(TranslatePoint::new(f, offset)?),
        })
    }

    // -----------------------------------------------------------------
    // Combiners
    // -----------------------------------------------------------------

    fn uniform_dimension(
        kind: &'static str,
        inputs: &[Sampler],
    ) -> Result<Dimension, ConfigError> {
        if inputs.len() < 2 {
            return Err(ConfigError::MissingInputs {
                kind,
                required: 2,
                provided: inputs.len(),
            });
        }
        let dimension = inputs[0].dimension();
        for input in &inputs[1..] {
            if input.dimension() != dimension {
                return Err(ConfigError::DimensionMismatch {
                    expected: dimension,
                    actual: input.dimension(),
                });
            }
        }
        Ok(dimension)
    }

    /// Sum of all inputs (at least two, same dimensionality).
    pub fn add(inputs: Vec<Sampler>) -> Result<Sampler, ConfigError> {
        match Self::uniform_dimension("add", &inputs)? {
            Dimension::D2 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_2d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_2d(Add::new(fields)?))
            }
            Dimension::D3 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_3d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_3d(Add::new(fields)?))
            }
            Dimension::D4 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_4d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_4d(Add::new(fields)?))
            }
        }
    }

    /// Product of all inputs (at least two, same dimensionality).
    pub fn multiply(inputs: Vec<Sampler>) -> Result<Sampler, ConfigError> {
        match Self::uniform_dimension("multiply", &inputs)? {
            Dimension::D2 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_2d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_2d(Multiply::new(fields)?))
            }
            Dimension::D3 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_3d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_3d(Multiply::new(fields)?))
            }
            Dimension::D4 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_4d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_4d(Multiply::new(fields)?))
            }
        }
    }

    /// Minimum over all inputs (at least two, same dimensionality).
    pub fn min(inputs: Vec<Sampler>) -> Result<Sampler, ConfigError> {
        match Self::uniform_dimension("min", &inputs)? {
            Dimension::D2 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_2d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_2d(Min::new(fields)?))
            }
            Dimension::D3 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_3d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_3d(Min::new(fields)?))
            }
            Dimension::D4 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_4d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_4d(Min::new(fields)?))
            }
        }
    }

    /// Maximum over all inputs (at least two, same dimensionality).
    pub fn max(inputs: Vec<Sampler>) -> Result<Sampler, ConfigError> {
        match Self::uniform_dimension("max", &inputs)? {
            Dimension::D2 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_2d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_2d(Max::new(fields)?))
            }
            Dimension::D3 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_3d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_3d(Max::new(fields)?))
            }
            Dimension::D4 => {
                let fields = inputs
                    .into_iter()
                    .map(Sampler::into_4d)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Sampler::from_4d(Max::new(fields)?))
            }
        }
    }

    /// Linear blend of `a` and `b` by `weight`'s output at the same
    /// coordinate.
    pub fn blend(a: Sampler, b: Sampler, weight: Sampler) -> Result<Sampler, ConfigError> {
        match a.dimension() {
            Dimension::D2 => Ok(Sampler::from_2d(Blend::new(
                a.into_2d()?,
                b.into_2d()?,
                weight.into_2d()?,
            ))),
            Dimension::D3 => Ok(Sampler::from_3d(Blend::new(
                a.into_3d()?,
                b.into_3d()?,
                weight.into_3d()?,
            ))),
            Dimension::D4 => Ok(Sampler::from_4d(Blend::new(
                a.into_4d()?,
                b.into_4d()?,
                weight.into_4d()?,
            ))),
        }
    }

    /// Select `a` or `b` by comparing `control`'s output against the
    /// threshold.
    pub fn select(
        a: Sampler,
        b: Sampler,
        control: Sampler,
        threshold: f64,
    ) -> Result<Sampler, ConfigError> {
        match a.dimension() {
            Dimension::D2 => Ok(Sampler::from_2d(Select::new(
                a.into_2d()?,
                b.into_2d()?,
                control.into_2d()?,
                threshold,
            )?)),
            Dimension::D3 => Ok(Sampler::from_3d(Select::new(
                a.into_3d()?,
                b.into_3d()?,
                control.into_3d()?,
                threshold,
            )?)),
            Dimension::D4 => Ok(Sampler::from_4d(Select::new(
                a.into_4d()?,
                b.into_4d()?,
                control.into_4d()?,
                threshold,
            )?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Perlin;

    #[test]
    fn test_dimension_try_from() {
        assert_eq!(Dimension::try_from(2).unwrap(), Dimension::D2);
        assert_eq!(Dimension::try_from(3).unwrap(), Dimension::D3);
        assert_eq!(Dimension::try_from(4).unwrap(), Dimension::D4);
        assert!(matches!(
            Dimension::try_from(5),
            Err(ConfigError::UnsupportedDimensions(5))
        ));
        assert!(Dimension::try_from(0).is_err());
    }

    #[test]
    fn test_sample_pads_and_truncates() {
        let s = Sampler::from_3d(Perlin::new(42));
        // Missing z reads as 0.0
        assert_eq!(s.sample(&[1.3, 2.7]), s.sample(&[1.3, 2.7, 0.0]));
        // Extra coordinates are ignored
        assert_eq!(s.sample(&[1.3, 2.7, 0.5, 9.9]), s.sample(&[1.3, 2.7, 0.5]));
        assert_eq!(s.sample2(1.3, 2.7), s.sample3(1.3, 2.7, 0.0));
    }

    #[test]
    fn test_combiner_dimension_mismatch() {
        let a = Sampler::from_2d(Perlin::new(1));
        let b = Sampler::from_3d(Perlin::new(2));
        let err = Sampler::add(vec![a, b]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionMismatch {
                expected: Dimension::D2,
                actual: Dimension::D3,
            }
        ));
    }

    #[test]
    fn test_combiner_arity() {
        let a = Sampler::from_2d(Perlin::new(1));
        assert!(matches!(
            Sampler::min(vec![a]),
            Err(ConfigError::MissingInputs { .. })
        ));
    }

    #[test]
    fn test_blend_dimension_mismatch() {
        let a = Sampler::from_2d(Perlin::new(1));
        let b = Sampler::from_2d(Perlin::new(2));
        let weight = Sampler::from_4d(Perlin::new(3));
        assert!(Sampler::blend(a, b, weight).is_err());
    }

    #[test]
    fn test_shared_input_reuse() {
        // The same node can feed several parents without rebuilding.
        let shared = Sampler::from_2d(Perlin::new(9));
        let doubled = Sampler::add(vec![shared.clone(), shared.clone()]).unwrap();
        let expected = 2.0 * shared.sample(&[0.4, 0.9]);
        assert_eq!(doubled.sample(&[0.4, 0.9]), expected);
    }

    #[test]
    fn test_translate_point_arity_checked() {
        let s = Sampler::from_2d(Perlin::new(1));
        assert!(s.clone().translate_point(&[1.0, 2.0]).is_ok());
        let s = Sampler::from_2d(Perlin::new(1));
        assert!(s.translate_point(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_concurrent_sampling_matches_serial() {
        let sampler = std::sync::Arc::new(
            Sampler::from_2d(Perlin::new(42))
                .turbulence(7, 0.5, 3, 1.0)
                .unwrap(),
        );

        let serial: Vec<f64> = (0..64)
            .map(|i| sampler.sample(&[i as f64 * 0.13, i as f64 * 0.29]))
            .collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sampler = std::sync::Arc::clone(&sampler);
                std::thread::spawn(move || {
                    (0..64)
                        .map(|i| sampler.sample(&[i as f64 * 0.13, i as f64 * 0.29]))
                        .collect::<Vec<f64>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), serial);
        }
    }
}
