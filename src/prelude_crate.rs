pub(crate) use crate::cli;
pub(crate) use crate::constants::*;
pub(crate) use crate::field::{ScalarField, VectorField};
pub(crate) use crate::functions;
pub(crate) use crate::prelude::*;
pub(crate) use crate::velocity_set;
pub(crate) use crate::velocity_set::Parameters as VelocitySetParameters;
pub(crate) use crate::{BoundaryFace::*, FACES_2D};
