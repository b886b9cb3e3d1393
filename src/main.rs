use lbcollision::prelude::*;

fn main() {
    collision::load();
}
