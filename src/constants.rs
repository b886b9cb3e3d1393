pub type Float = f64;

pub const DELTA_T: Float = 1.0;

pub const DELTA_X: Float = 1.0;

pub const LATTICE_DENSITY: Float = 1.0;

/// Inverse of the squared lattice sound speed for `dx = dt = 1`.
pub const CS_2_INV: Float = 3.0;

/// Upper bound of the entropic step length before refinement.
pub const ALPHA_MAX: Float = 2.0;

pub const DEFAULT_MAX_DELTA_H: Float = 1e-12;

pub const DEFAULT_MAX_ENTROPIC_ITERATIONS: usize = 100;
