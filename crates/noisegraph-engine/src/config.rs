//! Construction-time configuration for [`build_sampler`](crate::build_sampler).

use crate::fractal::FractalMode;
use crate::modifier::ControlPoint;
use crate::noise::{DistanceFunction, WorleyReturn};
use crate::perm::DEFAULT_TABLE_SIZE;
use crate::sampler::Sampler;

/// Algorithm kinds buildable through the uniform construction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// A constant value at every coordinate.
    Constant,
    /// Value noise.
    Value,
    /// Perlin gradient noise.
    Perlin,
    /// Simplex noise.
    Simplex,
    /// Worley (cellular) noise.
    Worley,
    /// Multi-octave fractal combination of a primitive template.
    Fractal,
    /// Absolute value of one input.
    Abs,
    /// Negation of one input.
    Invert,
    /// Clamp one input to `[lower_bound, upper_bound]`.
    Clamp,
    /// `input * scale + bias`.
    ScaleBias,
    /// Remap one input through a monotonic control-point table.
    Curve,
    /// Perturb the query coordinate with auxiliary noise.
    Turbulence,
    /// Scale the query coordinate uniformly.
    ScalePoint,
    /// Translate the query coordinate per axis.
    TranslatePoint,
    /// Sum of all inputs.
    Add,
    /// Product of all inputs.
    Multiply,
    /// Minimum over all inputs.
    Min,
    /// Maximum over all inputs.
    Max,
    /// Linear blend of two inputs by a weight sampler.
    Blend,
    /// Threshold-select between two inputs by a control sampler.
    Select,
}

/// Primitive kinds usable as a fractal generator template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// Value noise.
    Value,
    /// Perlin gradient noise (default).
    #[default]
    Perlin,
    /// Simplex noise.
    Simplex,
    /// Worley (cellular) noise.
    Worley,
}

/// Options recognized by [`build_sampler`](crate::build_sampler).
///
/// Every kind accepts a seed, even the fully deterministic ones, so the
/// composition interface stays uniform. Fields irrelevant to a kind are
/// ignored. Defaults match common fractal-noise practice: frequency 1.0,
/// 4 octaves, lacunarity 2.0, persistence 0.5.
#[derive(Clone)]
pub struct SamplerConfig {
    /// Seed; absent means "draw from OS entropy at build time".
    pub seed: Option<u64>,
    /// Frequency applied to query coordinates (primitives, fractal,
    /// turbulence displacers).
    pub frequency: f64,
    /// Octave count (fractal).
    pub octaves: u32,
    /// Per-octave frequency multiplier (fractal).
    pub lacunarity: f64,
    /// Per-octave amplitude multiplier (fractal).
    pub persistence: f64,
    /// Combination mode (fractal).
    pub fractal_mode: FractalMode,
    /// Primitive template (fractal).
    pub generator: GeneratorKind,
    /// Input samplers (modifiers take one; combiners at least two; blend
    /// takes `[a, b, weight]`, select takes `[a, b, control]`).
    pub inputs: Vec<Sampler>,
    /// Constant value (constant).
    pub value: f64,
    /// Lower clamp bound (clamp).
    pub lower_bound: f64,
    /// Upper clamp bound (clamp).
    pub upper_bound: f64,
    /// Control points (curve).
    pub control_points: Vec<ControlPoint>,
    /// Selection threshold (select).
    pub threshold: f64,
    /// Displacement magnitude (turbulence).
    pub power: f64,
    /// Displacer octave count (turbulence).
    pub roughness: u32,
    /// Output multiplier (scale_bias).
    pub scale: f64,
    /// Output offset (scale_bias).
    pub bias: f64,
    /// Coordinate multiplier (scale_point).
    pub factor: f64,
    /// Coordinate offsets, one per axis (translate_point).
    pub offset: Vec<f64>,
    /// Distance metric (worley).
    pub distance: DistanceFunction,
    /// Return selection (worley).
    pub return_type: WorleyReturn,
    /// Feature point jitter in [0, 1] (worley).
    pub jitter: f64,
    /// Permutation table size; must be a power of two in [4, 65536].
    pub table_size: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frequency: 1.0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            fractal_mode: FractalMode::Fbm,
            generator: GeneratorKind::Perlin,
            inputs: Vec::new(),
            value: 0.0,
            lower_bound: -1.0,
            upper_bound: 1.0,
            control_points: Vec::new(),
            threshold: 0.0,
            power: 1.0,
            roughness: 3,
            scale: 1.0,
            bias: 0.0,
            factor: 1.0,
            offset: Vec::new(),
            distance: DistanceFunction::Euclidean,
            return_type: WorleyReturn::F1,
            jitter: 1.0,
            table_size: DEFAULT_TABLE_SIZE,
        }
    }
}

impl SamplerConfig {
    /// Create a config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the octave count.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Set the lacunarity.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Set the persistence.
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Set the fractal mode.
    pub fn with_fractal_mode(mut self, mode: FractalMode) -> Self {
        self.fractal_mode = mode;
        self
    }

    /// Set the fractal generator template.
    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Set the input samplers.
    pub fn with_inputs(mut self, inputs: Vec<Sampler>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set a single input sampler.
    pub fn with_input(mut self, input: Sampler) -> Self {
        self.inputs = vec![input];
        self
    }

    /// Set the constant value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the clamp bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Set the curve control points.
    pub fn with_control_points(mut self, control_points: Vec<ControlPoint>) -> Self {
        self.control_points = control_points;
        self
    }

    /// Set the selection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the turbulence power.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Set the turbulence roughness (displacer octaves).
    pub fn with_roughness(mut self, roughness: u32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Set the output scale and bias.
    pub fn with_scale_bias(mut self, scale: f64, bias: f64) -> Self {
        self.scale = scale;
        self.bias = bias;
        self
    }

    /// Set the coordinate scale factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Set the coordinate offsets.
    pub fn with_offset(mut self, offset: Vec<f64>) -> Self {
        self.offset = offset;
        self
    }

    /// Set the Worley distance function.
    pub fn with_distance_function(mut self, distance: DistanceFunction) -> Self {
        self.distance = distance;
        self
    }

    /// Set the Worley return type.
    pub fn with_return_type(mut self, return_type: WorleyReturn) -> Self {
        self.return_type = return_type;
        self
    }

    /// Set the Worley jitter.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set the permutation table size.
    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }
}
