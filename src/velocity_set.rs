// ------------------------------------------------------------------------------- MODULES

mod d2q5;
mod d2q9;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude_crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VelocitySet {
    D2Q9 = 0,
    D2Q5 = 1,
}

impl VelocitySet {
    pub fn get_velocity_set_parameters(&self) -> Parameters {
        match self {
            D2Q9 => Parameters {
                velocity_set: D2Q9,
                d: d2q9::D,
                q: d2q9::Q,
                c: &d2q9::C,
                w: &d2q9::W,
            },
            D2Q5 => Parameters {
                velocity_set: D2Q5,
                d: d2q5::D,
                q: d2q5::Q,
                c: &d2q5::C,
                w: &d2q5::W,
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "d2q9" => Some(D2Q9),
            "d2q5" => Some(D2Q5),
            _ => None,
        }
    }
}

/// Read-only lattice tables. Every instance points at the same `'static` data,
/// so copies are cheap and nothing is ever mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub(crate) velocity_set: VelocitySet,
    pub(crate) d: usize,
    pub(crate) q: usize,
    pub(crate) c: &'static [[i32; 2]],
    pub(crate) w: &'static [Float],
}

impl Default for Parameters {
    fn default() -> Self {
        D2Q9.get_velocity_set_parameters()
    }
}

impl Parameters {
    pub fn test_default(q: usize) -> Self {
        match q {
            9 => Default::default(),
            5 => D2Q5.get_velocity_set_parameters(),
            _ => panic!("Unsupported velocity set: D2Q{q}"),
        }
    }
}

impl Parameters {
    pub fn get_velocity_set(&self) -> VelocitySet {
        self.velocity_set
    }

    pub fn get_d(&self) -> usize {
        self.d
    }

    /// # Examples
    /// ```
    /// # use lbcollision::velocity_set::VelocitySet;
    /// let vel_set_params = VelocitySet::D2Q9.get_velocity_set_parameters();
    ///
    /// assert_eq!(vel_set_params.get_q(), 9);
    /// ```
    pub fn get_q(&self) -> usize {
        self.q
    }

    pub fn get_c(&self) -> &'static [[i32; 2]] {
        self.c
    }

    pub fn get_w(&self) -> &'static [Float] {
        self.w
    }
}
