//! Flat, shape-checked grid storage.
//!
//! Cells are ordered with `x` running fastest (`cell = x + y * nx`), the same ordering the
//! lattice nodes use. Vector and distribution fields keep every cell's components in one
//! contiguous slice so per-cell kernels can work on `&[Float]` views.

use crate::error::{CollisionError, Result};
use crate::prelude_crate::*;

pub(crate) fn check_shape(expected: [usize; 2], found: [usize; 2]) -> Result<()> {
    if expected != found {
        return Err(CollisionError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        });
    }
    Ok(())
}

fn check_directions(n: [usize; 2], q: usize) -> Result<()> {
    if q == 0 {
        return Err(CollisionError::ShapeMismatch {
            expected: vec![n[0], n[1], 1],
            found: vec![n[0], n[1], 0],
        });
    }
    Ok(())
}

fn check_length(n: [usize; 2], components: usize, length: usize) -> Result<()> {
    let expected = n[0] * n[1] * components;
    if expected != length {
        return Err(CollisionError::ShapeMismatch {
            expected: vec![n[0], n[1], components],
            found: vec![length],
        });
    }
    Ok(())
}

// ------------------------------------------------------------------- STRUCT: ScalarField

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    n: [usize; 2],
    data: Vec<Float>,
}

impl ScalarField {
    pub fn new(n: [usize; 2], data: Vec<Float>) -> Result<Self> {
        check_length(n, 1, data.len())?;
        Ok(ScalarField { n, data })
    }

    /// # Examples
    /// ```
    /// # use lbcollision::field::ScalarField;
    /// let field = ScalarField::filled([4, 3], 0.5);
    ///
    /// assert_eq!(field.get_n(), [4, 3]);
    /// assert_eq!(field.get(3, 2), 0.5);
    /// ```
    pub fn filled(n: [usize; 2], value: Float) -> Self {
        ScalarField {
            n,
            data: vec![value; n[0] * n[1]],
        }
    }
}

impl ScalarField {
    pub fn get_n(&self) -> [usize; 2] {
        self.n
    }

    pub fn get_nx(&self) -> usize {
        self.n[0]
    }

    pub fn get_ny(&self) -> usize {
        self.n[1]
    }

    pub fn get(&self, x: usize, y: usize) -> Float {
        self.data[x + y * self.n[0]]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Float) {
        let nx = self.n[0];
        self.data[x + y * nx] = value;
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }

    pub fn min(&self) -> Float {
        self.data.iter().copied().fold(Float::INFINITY, Float::min)
    }

    pub fn max(&self) -> Float {
        self.data.iter().copied().fold(Float::NEG_INFINITY, Float::max)
    }

    pub fn mean(&self) -> Float {
        self.data.iter().sum::<Float>() / self.data.len() as Float
    }

    /// Overwrites every cell lying on `boundary_face` with `value`.
    ///
    /// # Examples
    /// ```
    /// # use lbcollision::BoundaryFace;
    /// # use lbcollision::field::ScalarField;
    /// let mut field = ScalarField::filled([4, 4], 1.0);
    ///
    /// field.fill_face(BoundaryFace::North, 0.1);
    ///
    /// assert_eq!(field.get(2, 3), 0.1);
    /// assert_eq!(field.get(2, 2), 1.0);
    /// ```
    pub fn fill_face(&mut self, boundary_face: BoundaryFace, value: Float) {
        let [nx, ny] = self.n;
        if nx == 0 || ny == 0 {
            return;
        }
        match boundary_face {
            West => (0..ny).for_each(|y| self.set(0, y, value)),
            East => (0..ny).for_each(|y| self.set(nx - 1, y, value)),
            South => (0..nx).for_each(|x| self.set(x, 0, value)),
            North => (0..nx).for_each(|x| self.set(x, ny - 1, value)),
        }
    }
}

// ------------------------------------------------------------------- STRUCT: VectorField

#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    n: [usize; 2],
    d: usize,
    data: Vec<Float>,
}

impl VectorField {
    pub fn new(n: [usize; 2], data: Vec<Float>) -> Result<Self> {
        check_length(n, 2, data.len())?;
        Ok(VectorField { n, d: 2, data })
    }

    pub fn filled(n: [usize; 2], value: [Float; 2]) -> Self {
        VectorField {
            n,
            d: 2,
            data: value.repeat(n[0] * n[1]),
        }
    }
}

impl VectorField {
    pub fn get_n(&self) -> [usize; 2] {
        self.n
    }

    pub fn get_d(&self) -> usize {
        self.d
    }

    /// # Examples
    /// ```
    /// # use lbcollision::field::VectorField;
    /// let mut field = VectorField::filled([3, 3], [0.0, 0.0]);
    ///
    /// field.set(1, 2, [0.1, -0.2]);
    ///
    /// assert_eq!(field.get(1, 2), &[0.1, -0.2]);
    /// assert_eq!(field.get(2, 1), &[0.0, 0.0]);
    /// ```
    pub fn get(&self, x: usize, y: usize) -> &[Float] {
        let cell = x + y * self.n[0];
        &self.data[cell * self.d..(cell + 1) * self.d]
    }

    pub fn set(&mut self, x: usize, y: usize, value: [Float; 2]) {
        let cell = x + y * self.n[0];
        self.data[cell * self.d..(cell + 1) * self.d].copy_from_slice(&value);
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }
}

// ------------------------------------------------------------- STRUCT: DistributionField

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionField {
    n: [usize; 2],
    q: usize,
    data: Vec<Float>,
}

impl DistributionField {
    /// Fails when `q` is zero or `data` does not hold `q` populations per cell.
    pub fn new(n: [usize; 2], q: usize, data: Vec<Float>) -> Result<Self> {
        check_directions(n, q)?;
        check_length(n, q, data.len())?;
        Ok(DistributionField { n, q, data })
    }

    pub fn zeros(n: [usize; 2], q: usize) -> Result<Self> {
        check_directions(n, q)?;
        Ok(DistributionField {
            n,
            q,
            data: vec![0.0; n[0] * n[1] * q],
        })
    }
}

impl DistributionField {
    pub fn get_n(&self) -> [usize; 2] {
        self.n
    }

    pub fn get_q(&self) -> usize {
        self.q
    }

    pub fn get(&self, x: usize, y: usize, i: usize) -> Float {
        self.data[(x + y * self.n[0]) * self.q + i]
    }

    pub fn set(&mut self, x: usize, y: usize, i: usize, value: Float) {
        let index = (x + y * self.n[0]) * self.q + i;
        self.data[index] = value;
    }

    /// The `q` populations of cell `(x, y)`.
    pub fn get_cell(&self, x: usize, y: usize) -> &[Float] {
        let cell = x + y * self.n[0];
        &self.data[cell * self.q..(cell + 1) * self.q]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, f: &[Float]) {
        let cell = x + y * self.n[0];
        self.data[cell * self.q..(cell + 1) * self.q].copy_from_slice(f);
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }

    pub fn total_mass(&self) -> Float {
        self.data.iter().sum()
    }
}
