//! N-ary combiner samplers.
//!
//! Combiners evaluate each input independently at the query coordinate and
//! fold the results. There is no caching of intermediate results: a shared
//! sub-sampler feeding two inputs is simply sampled twice.

use crate::error::ConfigError;
use crate::noise::NoiseField;

fn require_inputs<N>(kind: &'static str, inputs: Vec<N>) -> Result<Vec<N>, ConfigError> {
    if inputs.len() < 2 {
        return Err(ConfigError::MissingInputs {
            kind,
            required: 2,
            provided: inputs.len(),
        });
    }
    Ok(inputs)
}

/// Sum of all inputs.
#[derive(Clone)]
pub struct Add<N> {
    inputs: Vec<N>,
}

impl<N> Add<N> {
    /// Create an addition combiner over at least two inputs.
    pub fn new(inputs: Vec<N>) -> Result<Self, ConfigError> {
        Ok(Self {
            inputs: require_inputs("add", inputs)?,
        })
    }
}

impl<P: Copy, N: NoiseField<P>> NoiseField<P> for Add<N> {
    fn sample(&self, point: P) -> f64 {
        self.inputs.iter().map(|n| n.sample(point)).sum()
    }
}

/// Product of all inputs.
#[derive(Clone)]
pub struct Multiply<N> {
    inputs: Vec<N>,
}

impl<N> Multiply<N> {
    /// Create a multiplication combiner over at least two inputs.
    pub fn new(inputs: Vec<N>) -> Result<Self, ConfigError> {
        Ok(Self {
            inputs: require_inputs("multiply", inputs)?,
        })
    }
}

impl<P: Copy, N: NoiseField<P>> NoiseField<P> for Multiply<N> {
    fn sample(&self, point: P) -> f64 {
        self.inputs.iter().map(|n| n.sample(point)).product()
    }
}

/// Minimum over all inputs.
///
/// A NaN from any input propagates as NaN (unlike `f64::min`, which would
/// silently prefer the other operand).
#[derive(Clone)]
pub struct Min<N> {
    inputs: Vec<N>,
}

impl<N> Min<N> {
    /// Create a minimum combiner over at least two inputs.
    pub fn new(inputs: Vec<N>) -> Result<Self, ConfigError> {
        Ok(Self {
            inputs: require_inputs("min", inputs)?,
        })
    }
}

impl<P: Copy, N: NoiseField<P>> NoiseField<P> for Min<N> {
    fn sample(&self, point: P) -> f64 {
        let mut result = f64::INFINITY;
        for input in &self.inputs {
            let s = input.sample(point);
            if s.is_nan() {
                return f64::NAN;
            }
            result = result.min(s);
        }
        result
    }
}

/// Maximum over all inputs.
///
/// A NaN from any input propagates as NaN.
#[derive(Clone)]
pub struct Max<N> {
    inputs: Vec<N>,
}

impl<N> Max<N> {
    /// Create a maximum combiner over at least two inputs.
    pub fn new(inputs: Vec<N>) -> Result<Self, ConfigError> {
        Ok(Self {
            inputs: require_inputs("max", inputs)?,
        })
    }
}

impl<P: Copy, N: NoiseField<P>> NoiseField<P> for Max<N> {
    fn sample(&self, point: P) -> f64 {
        let mut result = f64::NEG_INFINITY;
        for input in &self.inputs {
            let s = input.sample(point);
            if s.is_nan() {
                return f64::NAN;
            }
            result = result.max(s);
        }
        result
    }
}

/// Linear blend of `a` and `b` by the weight sampler's output.
///
/// The weight is expected in [0, 1] but is deliberately not clamped; callers
/// wanting extrapolation get it, callers wanting safety clamp the weight
/// sampler themselves.
#[derive(Clone)]
pub struct Blend<A, B, W> {
    a: A,
    b: B,
    weight: W,
}

impl<A, B, W> Blend<A, B, W> {
    /// Create a blend combiner.
    pub fn new(a: A, b: B, weight: W) -> Self {
        Self { a, b, weight }
    }
}

impl<P: Copy, A, B, W> NoiseField<P> for Blend<A, B, W>
where
    A: NoiseField<P>,
    B: NoiseField<P>,
    W: NoiseField<P>,
{
    fn sample(&self, point: P) -> f64 {
        let t = self.weight.sample(point);
        let a = self.a.sample(point);
        let b = self.b.sample(point);
        a + t * (b - a)
    }
}

/// Select `a` or `b` by comparing a control sampler against a threshold.
///
/// `a` is chosen while the control value is below the threshold. A NaN
/// control value propagates as NaN rather than silently picking a side.
#[derive(Clone)]
pub struct Select<A, B, C> {
    a: A,
    b: B,
    control: C,
    threshold: f64,
}

impl<A, B, C> Select<A, B, C> {
    /// Create a threshold-select combiner. Fails when the threshold is
    /// non-finite.
    pub fn new(a: A, b: B, control: C, threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidParameter(format!(
                "select threshold must be finite, got {}",
                threshold
            )));
        }
        Ok(Self {
            a,
            b,
            control,
            threshold,
        })
    }
}

impl<P: Copy, A, B, C> NoiseField<P> for Select<A, B, C>
where
    A: NoiseField<P>,
    B: NoiseField<P>,
    C: NoiseField<P>,
{
    fn sample(&self, point: P) -> f64 {
        let control = self.control.sample(point);
        if control.is_nan() {
            return f64::NAN;
        }
        if control < self.threshold {
            self.a.sample(point)
        } else {
            self.b.sample(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{Constant, Perlin, Simplex};

    #[test]
    fn test_add_matches_sum_of_inputs() {
        let a = Perlin::new(1);
        let b = Simplex::new(2);
        let combined = Add::new(vec![
            Box::new(Perlin::new(1)) as Box<dyn NoiseField<[f64; 2]>>,
            Box::new(Simplex::new(2)),
        ])
        .unwrap();

        for i in 0..100 {
            let p = [i as f64 * 0.17, i as f64 * 0.29];
            assert_eq!(combined.sample(p), a.sample(p) + b.sample(p));
        }
    }

    #[test]
    fn test_multiply_matches_product_of_inputs() {
        let a = Perlin::new(1);
        let b = Simplex::new(2);
        let combined = Multiply::new(vec![
            Box::new(Perlin::new(1)) as Box<dyn NoiseField<[f64; 2]>>,
            Box::new(Simplex::new(2)),
        ])
        .unwrap();

        for i in 0..100 {
            let p = [i as f64 * 0.17, i as f64 * 0.29];
            assert_eq!(combined.sample(p), a.sample(p) * b.sample(p));
        }
    }

    #[test]
    fn test_min_max_match_pointwise() {
        let a = Perlin::new(1);
        let b = Simplex::new(2);
        let min = Min::new(vec![
            Box::new(Perlin::new(1)) as Box<dyn NoiseField<[f64; 2]>>,
            Box::new(Simplex::new(2)),
        ])
        .unwrap();
        let max = Max::new(vec![
            Box::new(Perlin::new(1)) as Box<dyn NoiseField<[f64; 2]>>,
            Box::new(Simplex::new(2)),
        ])
        .unwrap();

        for i in 0..100 {
            let p = [i as f64 * 0.17, i as f64 * 0.29];
            let (va, vb) = (a.sample(p), b.sample(p));
            assert_eq!(min.sample(p), va.min(vb));
            assert_eq!(max.sample(p), va.max(vb));
        }
    }

    #[test]
    fn test_arity_enforced() {
        let single = vec![Constant::new(1.0)];
        assert!(matches!(
            Add::new(single.clone()),
            Err(ConfigError::MissingInputs {
                kind: "add",
                required: 2,
                provided: 1,
            })
        ));
        assert!(Multiply::new(single.clone()).is_err());
        assert!(Min::new(single.clone()).is_err());
        assert!(Max::new(single).is_err());
        assert!(Min::new(Vec::<Constant>::new()).is_err());
    }

    #[test]
    fn test_blend_endpoints_and_midpoint() {
        let blend = Blend::new(Constant::new(-1.0), Constant::new(1.0), Constant::new(0.0));
        assert_eq!(blend.sample([0.0, 0.0]), -1.0);

        let blend = Blend::new(Constant::new(-1.0), Constant::new(1.0), Constant::new(1.0));
        assert_eq!(blend.sample([0.0, 0.0]), 1.0);

        let blend = Blend::new(Constant::new(-1.0), Constant::new(1.0), Constant::new(0.5));
        assert_eq!(blend.sample([0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_blend_weight_not_clamped() {
        let blend = Blend::new(Constant::new(0.0), Constant::new(1.0), Constant::new(2.0));
        assert_eq!(blend.sample([0.0, 0.0]), 2.0);
    }

    #[test]
    fn test_select_picks_by_threshold() {
        let below = Select::new(
            Constant::new(-1.0),
            Constant::new(1.0),
            Constant::new(-0.5),
            0.0,
        )
        .unwrap();
        assert_eq!(below.sample([0.0, 0.0]), -1.0);

        let above = Select::new(
            Constant::new(-1.0),
            Constant::new(1.0),
            Constant::new(0.5),
            0.0,
        )
        .unwrap();
        assert_eq!(above.sample([0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_select_rejects_non_finite_threshold() {
        assert!(Select::new(
            Constant::new(0.0),
            Constant::new(1.0),
            Constant::new(0.0),
            f64::NAN
        )
        .is_err());
    }

    #[test]
    fn test_nan_propagation() {
        let nan = Constant::new(f64::NAN);
        let one = Constant::new(1.0);

        let min = Min::new(vec![nan, one]).unwrap();
        assert!(min.sample([0.0, 0.0]).is_nan());

        let max = Max::new(vec![one, nan]).unwrap();
        assert!(max.sample([0.0, 0.0]).is_nan());

        let add = Add::new(vec![nan, one]).unwrap();
        assert!(add.sample([0.0, 0.0]).is_nan());

        let select = Select::new(one, one, nan, 0.0).unwrap();
        assert!(select.sample([0.0, 0.0]).is_nan());
    }
}
