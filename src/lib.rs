pub mod big_int;
pub mod ops;

pub use big_int::{
    signed::{BigInt as BigIInt, SigNum, Sign},
    unsigned::BigInt as BigUInt,
    MathError,
};

mod util {
    pub mod rng;
}
