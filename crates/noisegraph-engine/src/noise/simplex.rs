//! Simplex noise implementation.
//!
//! Based on Stefan Gustavson's reference implementation: a skewed simplicial
//! lattice (triangles, tetrahedra, 4-simplices) instead of a cubic one, for
//! better isotropy and fewer evaluated corners per dimensionality.

use super::{NoiseField, Point2, Point3, Point4, all_finite, fast_floor};
use crate::perm::PermutationTable;

/// Simplex noise.
///
/// Output range is roughly [-1, 1] in every dimensionality.
#[derive(Clone)]
pub struct Simplex {
    perm: PermutationTable,
    frequency: f64,
}

impl Simplex {
    /// Skewing factor for 2D.
    const F2: f64 = 0.3660254037844386; // (sqrt(3) - 1) / 2
    /// Unskewing factor for 2D.
    const G2: f64 = 0.21132486540518713; // (3 - sqrt(3)) / 6
    /// Skewing factor for 3D.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D.
    const G3: f64 = 1.0 / 6.0;
    /// Skewing factor for 4D.
    const F4: f64 = 0.30901699437494745; // (sqrt(5) - 1) / 4
    /// Unskewing factor for 4D.
    const G4: f64 = 0.1381966011250105; // (5 - sqrt(5)) / 20

    /// Gradient vectors for 2D.
    const GRAD2: [[f64; 2]; 12] = [
        [1.0, 1.0],
        [-1.0, 1.0],
        [1.0, -1.0],
        [-1.0, -1.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
        [0.0, 1.0],
        [0.0, -1.0],
    ];

    /// Gradient vectors for 3D.
    const GRAD3: [[f64; 3]; 12] = [
        [1.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0],
        [1.0, -1.0, 0.0],
        [-1.0, -1.0, 0.0],
        [1.0, 0.0, 1.0],
        [-1.0, 0.0, 1.0],
        [1.0, 0.0, -1.0],
        [-1.0, 0.0, -1.0],
        [0.0, 1.0, 1.0],
        [0.0, -1.0, 1.0],
        [0.0, 1.0, -1.0],
        [0.0, -1.0, -1.0],
    ];

    /// Gradient vectors for 4D.
    const GRAD4: [[f64; 4]; 32] = [
        [0.0, 1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, -1.0],
        [0.0, 1.0, -1.0, 1.0],
        [0.0, 1.0, -1.0, -1.0],
        [0.0, -1.0, 1.0, 1.0],
        [0.0, -1.0, 1.0, -1.0],
        [0.0, -1.0, -1.0, 1.0],
        [0.0, -1.0, -1.0, -1.0],
        [1.0, 0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0, -1.0],
        [1.0, 0.0, -1.0, 1.0],
        [1.0, 0.0, -1.0, -1.0],
        [-1.0, 0.0, 1.0, 1.0],
        [-1.0, 0.0, 1.0, -1.0],
        [-1.0, 0.0, -1.0, 1.0],
        [-1.0, 0.0, -1.0, -1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0, -1.0],
        [1.0, -1.0, 0.0, 1.0],
        [1.0, -1.0, 0.0, -1.0],
        [-1.0, 1.0, 0.0, 1.0],
        [-1.0, 1.0, 0.0, -1.0],
        [-1.0, -1.0, 0.0, 1.0],
        [-1.0, -1.0, 0.0, -1.0],
        [1.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, -1.0, 0.0],
        [1.0, -1.0, 1.0, 0.0],
        [1.0, -1.0, -1.0, 0.0],
        [-1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, -1.0, 0.0],
        [-1.0, -1.0, 1.0, 0.0],
        [-1.0, -1.0, -1.0, 0.0],
    ];

    /// Create a new simplex noise sampler with the given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_table(PermutationTable::with_seed(seed))
    }

    /// Create a new simplex noise sampler over an existing permutation table.
    pub fn with_table(perm: PermutationTable) -> Self {
        Self {
            perm,
            frequency: 1.0,
        }
    }

    /// Set the frequency applied to query coordinates.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    #[inline]
    fn grad2(hash: usize, x: f64, y: f64) -> f64 {
        let g = &Self::GRAD2[hash % 12];
        g[0] * x + g[1] * y
    }

    #[inline]
    fn grad3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let g = &Self::GRAD3[hash % 12];
        g[0] * x + g[1] * y + g[2] * z
    }

    #[inline]
    fn grad4(hash: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let g = &Self::GRAD4[hash & 31];
        g[0] * x + g[1] * y + g[2] * z + g[3] * w
    }

    /// Contribution of one simplex corner: `(falloff - d^2)^4 * grad`.
    #[inline]
    fn corner2(falloff: f64, hash: usize, x: f64, y: f64) -> f64 {
        let t = falloff - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * Self::grad2(hash, x, y)
        }
    }

    #[inline]
    fn corner3(falloff: f64, hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let t = falloff - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * Self::grad3(hash, x, y, z)
        }
    }

    #[inline]
    fn corner4(falloff: f64, hash: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let t = falloff - x * x - y * y - z * z - w * w;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * Self::grad4(hash, x, y, z, w)
        }
    }
}

impl NoiseField<Point2> for Simplex {
    fn sample(&self, point: Point2) -> f64 {
        if !all_finite(&point) {
            return f64::NAN;
        }
        let x = point[0] * self.frequency;
        let y = point[1] * self.frequency;

        // Skew the input space to determine which simplex cell we're in
        let s = (x + y) * Self::F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);

        // Unskew the cell origin back to (x, y) space
        let t = (i + j) as f64 * Self::G2;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);

        // The 2D simplex is an equilateral triangle; pick the one we're in.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + Self::G2;
        let y1 = y0 - j1 as f64 + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let gi0 = self.perm.hash2(i, j);
        let gi1 = self.perm.hash2(i + i1, j + j1);
        let gi2 = self.perm.hash2(i + 1, j + 1);

        let n0 = Self::corner2(0.5, gi0, x0, y0);
        let n1 = Self::corner2(0.5, gi1, x1, y1);
        let n2 = Self::corner2(0.5, gi2, x2, y2);

        // Scale to return values in the interval [-1, 1]
        70.0 * (n0 + n1 + n2)
    }
}

impl NoiseField<Point3> for Simplex {
    fn sample(&self, point: Point3) -> f64 {
        if !all_finite(&point) {
            return f64::NAN;
        }
        let x = point[0] * self.frequency;
        let y = point[1] * self.frequency;
        let z = point[2] * self.frequency;

        let s = (x + y + z) * Self::F3;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);

        let t = (i + j + k) as f64 * Self::G3;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);

        // Rank the coordinates to pick the tetrahedron traversal order.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + Self::G3;
        let y1 = y0 - j1 as f64 + Self::G3;
        let z1 = z0 - k1 as f64 + Self::G3;
        let x2 = x0 - i2 as f64 + 2.0 * Self::G3;
        let y2 = y0 - j2 as f64 + 2.0 * Self::G3;
        let z2 = z0 - k2 as f64 + 2.0 * Self::G3;
        let x3 = x0 - 1.0 + 3.0 * Self::G3;
        let y3 = y0 - 1.0 + 3.0 * Self::G3;
        let z3 = z0 - 1.0 + 3.0 * Self::G3;

        let gi0 = self.perm.hash3(i, j, k);
        let gi1 = self.perm.hash3(i + i1, j + j1, k + k1);
        let gi2 = self.perm.hash3(i + i2, j + j2, k + k2);
        let gi3 = self.perm.hash3(i + 1, j + 1, k + 1);

        let n0 = Self::corner3(0.6, gi0, x0, y0, z0);
        let n1 = Self::corner3(0.6, gi1, x1, y1, z1);
        let n2 = Self::corner3(0.6, gi2, x2, y2, z2);
        let n3 = Self::corner3(0.6, gi3, x3, y3, z3);

        // Scale to return values in the interval [-1, 1]
        32.0 * (n0 + n1 + n2 + n3)
    }
}

impl NoiseField<Point4> for Simplex {
    fn sample(&self, point: Point4) -> f64 {
        if !all_finite(&point) {
            return f64::NAN;
        }
        let x = point[0] * self.frequency;
        let y = point[1] * self.frequency;
        let z = point[2] * self.frequency;
        let w = point[3] * self.frequency;

        let s = (x + y + z + w) * Self::F4;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let l = fast_floor(w + s);

        let t = (i + j + k + l) as f64 * Self::G4;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);
        let w0 = w - (l as f64 - t);

        // Rank the coordinates by magnitude to order the simplex traversal.
        let mut rank_x = 0;
        let mut rank_y = 0;
        let mut rank_z = 0;
        let mut rank_w = 0;
        if x0 > y0 {
            rank_x += 1;
        } else {
            rank_y += 1;
        }
        if x0 > z0 {
            rank_x += 1;
        } else {
            rank_z += 1;
        }
        if x0 > w0 {
            rank_x += 1;
        } else {
            rank_w += 1;
        }
        if y0 > z0 {
            rank_y += 1;
        } else {
            rank_z += 1;
        }
        if y0 > w0 {
            rank_y += 1;
        } else {
            rank_w += 1;
        }
        if z0 > w0 {
            rank_z += 1;
        } else {
            rank_w += 1;
        }

        let i1 = i64::from(rank_x >= 3);
        let j1 = i64::from(rank_y >= 3);
        let k1 = i64::from(rank_z >= 3);
        let l1 = i64::from(rank_w >= 3);
        let i2 = i64::from(rank_x >= 2);
        let j2 = i64::from(rank_y >= 2);
        let k2 = i64::from(rank_z >= 2);
        let l2 = i64::from(rank_w >= 2);
        let i3 = i64::from(rank_x >= 1);
        let j3 = i64::from(rank_y >= 1);
        let k3 = i64::from(rank_z >= 1);
        let l3 = i64::from(rank_w >= 1);

        let x1 = x0 - i1 as f64 + Self::G4;
        let y1 = y0 - j1 as f64 + Self::G4;
        let z1 = z0 - k1 as f64 + Self::G4;
        let w1 = w0 - l1 as f64 + Self::G4;
        let x2 = x0 - i2 as f64 + 2.0 * Self::G4;
        let y2 = y0 - j2 as f64 + 2.0 * Self::G4;
        let z2 = z0 - k2 as f64 + 2.0 * Self::G4;
        let w2 = w0 - l2 as f64 + 2.0 * Self::G4;
        let x3 = x0 - i3 as f64 + 3.0 * Self::G4;
        let y3 = y0 - j3 as f64 + 3.0 * Self::G4;
        let z3 = z0 - k3 as f64 + 3.0 * Self::G4;
        let w3 = w0 - l3 as f64 + 3.0 * Self::G4;
        let x4 = x0 - 1.0 + 4.0 * Self::G4;
        let y4 = y0 - 1.0 + 4.0 * Self::G4;
        let z4 = z0 - 1.0 + 4.0 * Self::G4;
        let w4 = w0 - 1.0 + 4.0 * Self::G4;

        let gi0 = self.perm.hash4(i, j, k, l);
        let gi1 = self.perm.hash4(i + i1, j + j1, k + k1, l + l1);
        let gi2 = self.perm.hash4(i + i2, j + j2, k + k2, l + l2);
        let gi3 = self.perm.hash4(i + i3, j + j3, k + k3, l + l3);
        let gi4 = self.perm.hash4(i + 1, j + 1, k + 1, l + 1);

        let n0 = Self::corner4(0.6, gi0, x0, y0, z0, w0);
        let n1 = Self::corner4(0.6, gi1, x1, y1, z1, w1);
        let n2 = Self::corner4(0.6, gi2, x2, y2, z2, w2);
        let n3 = Self::corner4(0.6, gi3, x3, y3, z3, w3);
        let n4 = Self::corner4(0.6, gi4, x4, y4, z4, w4);

        // Scale to return values in the interval [-1, 1]
        27.0 * (n0 + n1 + n2 + n3 + n4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_deterministic() {
        let noise1 = Simplex::new(42);
        let noise2 = Simplex::new(42);

        for i in 0..100 {
            let x = i as f64 * 0.1;
            let y = i as f64 * 0.13;
            assert_eq!(noise1.sample([x, y]), noise2.sample([x, y]));
            assert_eq!(noise1.sample([x, y, 1.1]), noise2.sample([x, y, 1.1]));
            assert_eq!(
                noise1.sample([x, y, 1.1, 0.3]),
                noise2.sample([x, y, 1.1, 0.3])
            );
        }
    }

    #[test]
    fn test_simplex_range_2d() {
        let noise = Simplex::new(42);
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for i in 0..500 {
            for j in 0..500 {
                let v = noise.sample([i as f64 * 0.02, j as f64 * 0.02]);
                min = min.min(v);
                max = max.max(v);
            }
        }

        assert!(min >= -1.5);
        assert!(max <= 1.5);
    }

    #[test]
    fn test_simplex_range_3d_4d() {
        let noise = Simplex::new(42);
        for i in 0..2000 {
            let x = i as f64 * 0.037;
            let y = i as f64 * 0.051;
            let z = i as f64 * 0.029;
            let w = i as f64 * 0.023;
            let v3 = noise.sample([x, y, z]);
            let v4 = noise.sample([x, y, z, w]);
            assert!((-1.5..=1.5).contains(&v3), "3d out of range: {}", v3);
            assert!((-1.5..=1.5).contains(&v4), "4d out of range: {}", v4);
        }
    }

    #[test]
    fn test_simplex_different_seeds() {
        let noise1 = Simplex::new(42);
        let noise2 = Simplex::new(43);

        let mut different = false;
        for i in 0..10 {
            let x = i as f64 * 0.1 + 0.05;
            if noise1.sample([x, x * 1.3]) != noise2.sample([x, x * 1.3]) {
                different = true;
                break;
            }
        }
        assert!(different);
    }

    #[test]
    fn test_simplex_nan_propagation() {
        let noise = Simplex::new(1);
        assert!(noise.sample([f64::NAN, 0.5]).is_nan());
        assert!(noise.sample([0.5, f64::INFINITY, 0.5]).is_nan());
        assert!(noise.sample([0.5, 0.5, 0.5, f64::NAN]).is_nan());
    }
}
