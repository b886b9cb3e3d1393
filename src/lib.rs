pub mod cli;
pub mod collision;
pub mod constants;
pub mod error;
pub mod field;
pub mod functions;
mod io;
pub mod kernel;
mod prelude_crate;
pub mod velocity_set;

pub mod prelude {
    pub use crate::BoundaryFace;
    pub use crate::collision::{
        self, NonConvergence, RelaxationField, RelaxationKind, RelaxationPolicy, Solver,
    };
    pub use crate::constants::Float;
    pub use crate::error::CollisionError;
    pub use crate::field::{DistributionField, ScalarField, VectorField};
    pub use crate::functions;
    pub use crate::velocity_set::VelocitySet::{self, *};
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BoundaryFace {
    West = 0,
    East = 1,
    South = 2,
    North = 3,
}

pub const FACES_2D: [BoundaryFace; 4] = [
    BoundaryFace::West,
    BoundaryFace::East,
    BoundaryFace::South,
    BoundaryFace::North,
];
