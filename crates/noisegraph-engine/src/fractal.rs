//! Multi-octave fractal combination.
//!
//! A [`Fractal`] layers several instances of a primitive sampler at
//! increasing frequency and decreasing amplitude. Unlike a plain octave sum
//! over one sampler, every octave gets its own seed, so octaves are
//! decorrelated even at coincident lattice points.

use crate::error::ConfigError;
use crate::noise::NoiseField;
use crate::rng::DeterministicRng;

/// Fractal combination modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalMode {
    /// Fractal Brownian motion: weighted sum of raw octave values.
    #[default]
    Fbm,
    /// Sum of `2|s| - 1` per octave: bulbous, cloud-like shapes.
    Billow,
    /// Sum of `1 - |s|` ridges per octave, remapped to [-1, 1]: sharp crests.
    Ridged,
}

#[derive(Clone)]
struct Octave<N> {
    noise: N,
    amplitude: f64,
}

/// Multi-octave fractal combinator over a generator template.
///
/// Octave `i` uses:
/// - seed `DeterministicRng::derive_seed(seed, i)` (the pinned BLAKE3
///   derivation, so independent rebuilds agree),
/// - frequency `frequency * lacunarity^i`, baked into the generator built by
///   the factory closure,
/// - amplitude `persistence^i`.
///
/// The weighted sum is normalized by the total amplitude, so fBm and billow
/// outputs stay within [-1, 1] whenever the generator does; ridged output is
/// remapped into the same interval.
#[derive(Clone)]
pub struct Fractal<N> {
    octaves: Vec<Octave<N>>,
    mode: FractalMode,
    max_amplitude: f64,
}

impl<N> Fractal<N> {
    /// Build a fractal combinator.
    ///
    /// `generator` is called once per octave with `(octave_seed, octave_frequency)`
    /// and returns the primitive instance for that octave.
    ///
    /// Fails with [`ConfigError`] when `octaves` is zero or any numeric
    /// parameter is non-finite or non-positive.
    pub fn new<F>(
        seed: u64,
        octaves: u32,
        frequency: f64,
        lacunarity: f64,
        persistence: f64,
        mode: FractalMode,
        mut generator: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(u64, f64) -> Result<N, ConfigError>,
    {
        if octaves == 0 {
            return Err(ConfigError::InvalidParameter(
                "octaves must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("frequency", frequency),
            ("lacunarity", lacunarity),
            ("persistence", persistence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        let mut built = Vec::with_capacity(octaves as usize);
        let mut amplitude = 1.0;
        let mut octave_frequency = frequency;
        let mut max_amplitude = 0.0;

        for i in 0..octaves {
            let octave_seed = DeterministicRng::derive_seed(seed, i);
            built.push(Octave {
                noise: generator(octave_seed, octave_frequency)?,
                amplitude,
            });
            max_amplitude += amplitude;
            amplitude *= persistence;
            octave_frequency *= lacunarity;
        }

        Ok(Self {
            octaves: built,
            mode,
            max_amplitude,
        })
    }

    /// Number of octaves.
    pub fn octaves(&self) -> usize {
        self.octaves.len()
    }

    /// The combination mode.
    pub fn mode(&self) -> FractalMode {
        self.mode
    }
}

impl<P: Copy, N: NoiseField<P>> NoiseField<P> for Fractal<N> {
    fn sample(&self, point: P) -> f64 {
        let mut total = 0.0;

        for octave in &self.octaves {
            let s = octave.noise.sample(point);
            let v = match self.mode {
                FractalMode::Fbm => s,
                FractalMode::Billow => 2.0 * s.abs() - 1.0,
                FractalMode::Ridged => 1.0 - s.abs(),
            };
            total += v * octave.amplitude;
        }

        let normalized = total / self.max_amplitude;
        match self.mode {
            // Ridges accumulate in [0, 1]; bring them back to [-1, 1].
            FractalMode::Ridged => normalized * 2.0 - 1.0,
            _ => normalized,
        }
    }
}
