use crate::constants::Float;

pub(super) const D: usize = 2;

pub(super) const Q: usize = 5;

pub(super) const C: [[i32; D]; Q] = [[0, 0], [1, 0], [-1, 0], [0, 1], [0, -1]];

pub(super) const W: [Float; Q] = [2.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0];
