mod date_point;
mod random;
pub(crate) mod sequence_generators;
mod trail;

pub use date_point::*;
pub(crate) use random::Random;
pub(crate) use trail::Trail;
