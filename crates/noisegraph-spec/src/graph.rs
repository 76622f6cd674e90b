//! Sampler graph description types.
//!
//! A `GraphSpec` is a deterministic tree of sampler nodes: primitive noise
//! leaves combined through modifier and combiner nodes. Composite nodes own
//! their inputs directly, so a description can never contain a cycle.

use serde::{Deserialize, Serialize};

/// A complete sampler graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSpec {
    /// Coordinate dimensionality of every node in the graph (2, 3, or 4).
    pub dimensions: u8,
    /// Default seed. Nodes without an explicit seed derive theirs from this
    /// value and their position in the tree. Absent means "draw from OS
    /// entropy at build time".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Root node of the graph.
    pub root: SamplerNode,
}

/// A single node: an optional seed plus the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerNode {
    /// Explicit seed for this node. Every operation accepts one, including
    /// the fully deterministic ones, so nodes stay interchangeable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// The node operation.
    #[serde(flatten)]
    pub op: SamplerOp,
}

/// Graph node operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum SamplerOp {
    // ---------------------------------------------------------------------
    // Primitive leaves
    // ---------------------------------------------------------------------
    /// A constant value at every coordinate.
    Constant { value: f64 },

    /// Value noise: smoothed lattice-corner values.
    Value {
        #[serde(default = "default_frequency")]
        frequency: f64,
    },

    /// Perlin gradient noise.
    Perlin {
        #[serde(default = "default_frequency")]
        frequency: f64,
    },

    /// Simplex noise on a simplicial lattice.
    Simplex {
        #[serde(default = "default_frequency")]
        frequency: f64,
    },

    /// Worley (cellular) noise: distances to per-cell feature points.
    Worley {
        #[serde(default = "default_frequency")]
        frequency: f64,
        #[serde(default = "default_jitter")]
        jitter: f64,
        #[serde(default)]
        distance: DistanceMetric,
        #[serde(default)]
        return_type: CellReturn,
    },

    /// Multi-octave fractal combination of a primitive template.
    Fractal {
        generator: PrimitiveKind,
        #[serde(default)]
        mode: FractalMode,
        #[serde(default = "default_octaves")]
        octaves: u32,
        #[serde(default = "default_frequency")]
        frequency: f64,
        #[serde(default = "default_lacunarity")]
        lacunarity: f64,
        #[serde(default = "default_persistence")]
        persistence: f64,
    },

    // ---------------------------------------------------------------------
    // Modifiers
    // ---------------------------------------------------------------------
    /// Absolute value of the input.
    Abs { input: Box<SamplerNode> },

    /// Negation of the input.
    Invert { input: Box<SamplerNode> },

    /// Clamp the input to `[min, max]`.
    Clamp {
        input: Box<SamplerNode>,
        min: f64,
        max: f64,
    },

    /// `input * scale + bias`.
    ScaleBias {
        input: Box<SamplerNode>,
        scale: f64,
        bias: f64,
    },

    /// Remap the input through a monotonic control-point table.
    Curve {
        input: Box<SamplerNode>,
        control_points: Vec<CurvePoint>,
    },

    /// Perturb the query coordinate with auxiliary noise before sampling.
    Turbulence {
        input: Box<SamplerNode>,
        #[serde(default = "default_power")]
        power: f64,
        #[serde(default = "default_roughness")]
        roughness: u32,
        #[serde(default = "default_frequency")]
        frequency: f64,
    },

    /// Scale the query coordinate uniformly before sampling the input.
    ScalePoint {
        input: Box<SamplerNode>,
        factor: f64,
    },

    /// Translate the query coordinate before sampling the input. The offset
    /// arity must match the graph dimensionality.
    TranslatePoint {
        input: Box<SamplerNode>,
        offset: Vec<f64>,
    },

    // ---------------------------------------------------------------------
    // Combiners
    // ---------------------------------------------------------------------
    /// Sum of all inputs (at least two).
    Add { inputs: Vec<SamplerNode> },

    /// Product of all inputs (at least two).
    Multiply { inputs: Vec<SamplerNode> },

    /// Minimum over all inputs (at least two).
    Min { inputs: Vec<SamplerNode> },

    /// Maximum over all inputs (at least two).
    Max { inputs: Vec<SamplerNode> },

    /// Linear blend of `a` and `b` by the weight sampler's output.
    Blend {
        a: Box<SamplerNode>,
        b: Box<SamplerNode>,
        weight: Box<SamplerNode>,
    },

    /// Select `a` or `b` by comparing the control sampler against a
    /// threshold.
    Select {
        a: Box<SamplerNode>,
        b: Box<SamplerNode>,
        control: Box<SamplerNode>,
        #[serde(default)]
        threshold: f64,
    },
}

/// Primitive algorithm kinds usable as fractal generator templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Value noise.
    Value,
    /// Perlin gradient noise.
    Perlin,
    /// Simplex noise.
    Simplex,
    /// Worley/cellular noise.
    Worley,
}

/// Fractal combination modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    /// Fractal Brownian motion: weighted sum of octaves.
    #[default]
    Fbm,
    /// Sum of absolute octave values, rescaled.
    Billow,
    /// Sum of inverted-absolute-value ridges.
    Ridged,
}

/// Distance metrics for Worley noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean distance (default).
    #[default]
    Euclidean,
    /// Manhattan distance.
    Manhattan,
    /// Chebyshev distance.
    Chebyshev,
}

/// What a Worley node returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellReturn {
    /// Distance to the nearest feature point (F1).
    #[default]
    F1,
    /// Distance to the second nearest feature point (F2).
    F2,
    /// F2 - F1 (cell edges).
    F2MinusF1,
    /// (F1 + F2) / 2 (soft cells).
    F1PlusF2,
}

/// One control point of a curve remap table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input value this point anchors.
    pub input: f64,
    /// Output value at the anchor.
    pub output: f64,
}

fn default_frequency() -> f64 {
    1.0
}

fn default_jitter() -> f64 {
    1.0
}

fn default_octaves() -> u32 {
    4
}

fn default_lacunarity() -> f64 {
    2.0
}

fn default_persistence() -> f64 {
    0.5
}

fn default_power() -> f64 {
    1.0
}

fn default_roughness() -> u32 {
    3
}
