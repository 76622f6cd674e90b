//! Noisegraph coherent-noise sampling engine.
//!
//! Smooth, pseudo-random scalar fields over 2D/3D/4D continuous coordinate
//! spaces, plus a composition pipeline for combining fields into derived
//! fields: value, Perlin, simplex, and Worley primitives, unary modifiers,
//! n-ary combiners, and a multi-octave fractal combinator.
//!
//! # Direct API
//!
//! Primitives and wrappers are plain structs composed through the
//! [`NoiseField`] trait:
//!
//! ```
//! use noisegraph_engine::{Fractal, FractalMode, NoiseField, Perlin};
//!
//! let fbm = Fractal::new(42, 4, 1.0, 2.0, 0.5, FractalMode::Fbm, |seed, frequency| {
//!     Ok(Perlin::new(seed).with_frequency(frequency))
//! })
//! .unwrap();
//!
//! let value = fbm.sample([1.5, 2.5]);
//! assert!(value.is_finite());
//! ```
//!
//! # Uniform construction boundary
//!
//! [`build_sampler`] assembles dimension-erased [`Sampler`] handles from an
//! [`AlgorithmKind`] and a [`SamplerConfig`]; handles compose into graphs
//! with dimensionality checked at build time:
//!
//! ```
//! use noisegraph_engine::{AlgorithmKind, Dimension, SamplerConfig, build_sampler};
//!
//! let perlin = build_sampler(
//!     AlgorithmKind::Perlin,
//!     Dimension::D2,
//!     &SamplerConfig::new().with_seed(42),
//! )
//! .unwrap();
//!
//! let clamped = build_sampler(
//!     AlgorithmKind::Clamp,
//!     Dimension::D2,
//!     &SamplerConfig::new().with_input(perlin).with_bounds(-0.5, 0.5),
//! )
//! .unwrap();
//!
//! let v = clamped.sample(&[120.2, 42.8]);
//! assert!((-0.5..=0.5).contains(&v));
//! ```
//!
//! # Determinism
//!
//! Equal seeds and equal configuration produce bit-identical output across
//! rebuilds and process runs:
//!
//! - all construction-time randomness flows through a PCG32
//!   [`DeterministicRng`];
//! - gradient and feature-point selection draw exclusively from a seeded
//!   Fisher-Yates [`PermutationTable`];
//! - sub-seeds (fractal octaves, turbulence axes, graph nodes) use a pinned
//!   BLAKE3 derivation.
//!
//! An absent seed is resolved from OS entropy exactly once, at construction.
//!
//! # Concurrency
//!
//! Built samplers are immutable. [`Sampler`] is `Send + Sync` and cheap to
//! clone, so one graph can be evaluated from any number of threads without
//! locking. Evaluation performs no I/O, never suspends, and never fails:
//! non-finite coordinates propagate as NaN.

pub mod build;
pub mod combine;
pub mod config;
pub mod error;
pub mod fractal;
pub mod modifier;
pub mod noise;
pub mod perm;
pub mod rng;
pub mod sampler;

// Re-export main types for convenience
pub use build::{build_graph, build_sampler};
pub use combine::{Add, Blend, Max, Min, Multiply, Select};
pub use config::{AlgorithmKind, GeneratorKind, SamplerConfig};
pub use error::ConfigError;
pub use fractal::{Fractal, FractalMode};
pub use modifier::{
    Abs, Clamp, ControlPoint, Curve, Invert, ScaleBias, ScalePoint, TranslatePoint, Turbulence,
};
pub use noise::{
    Constant, DistanceFunction, NoiseField, Perlin, Point2, Point3, Point4, Simplex, Value,
    Worley, WorleyReturn,
};
pub use perm::PermutationTable;
pub use rng::DeterministicRng;
pub use sampler::{Dimension, Sampler, SharedField};
