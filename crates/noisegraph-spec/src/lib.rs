//! Noisegraph graph description types.
//!
//! This crate defines the serialisable authoring form of a sampler pipeline:
//! a deterministic tree of noise, modifier, and combiner nodes. It contains
//! plain data types only; interpretation, validation, and evaluation live in
//! the `noisegraph-engine` crate.
//!
//! # Example
//!
//! ```
//! use noisegraph_spec::{GraphSpec, SamplerNode, SamplerOp};
//!
//! let spec = GraphSpec {
//!     dimensions: 2,
//!     seed: Some(42),
//!     root: SamplerNode {
//!         seed: None,
//!         op: SamplerOp::Perlin { frequency: 2.0 },
//!     },
//! };
//!
//! let json = serde_json::to_string(&spec).unwrap();
//! let parsed: GraphSpec = serde_json::from_str(&json).unwrap();
//! assert_eq!(parsed, spec);
//! ```

mod graph;

pub use graph::{
    CellReturn, CurvePoint, DistanceMetric, FractalMode, GraphSpec, PrimitiveKind, SamplerNode,
    SamplerOp,
};
