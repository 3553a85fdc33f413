use itertools::Either;
use std::fmt::Debug;

use super::digits::Digit;

pub trait Primitive: Copy + Eq + Ord + Debug {
    type Pos: UNum<Neg = Self::Neg>;
    type Neg: INum<Pos = Self::Pos>;

    fn select_sign(self) -> Either<Self::Pos, Self::Neg>;
}
pub trait UNum: Primitive {
    /// the decimal digits in little endian order, without trailing zeros.
    /// zero decomposes to an empty iterator
    fn le_digits(self) -> impl Iterator<Item = Digit>;
}
pub trait INum: Primitive {
    fn is_negative(self) -> bool;
    fn abs(self) -> Self::Pos;
}

macro_rules! implPrim {
    ($pos_type: tt, $neg_type: tt) => {
        impl Primitive for $pos_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Left(self)
            }
        }
        impl Primitive for $neg_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Right(self)
            }
        }
        impl UNum for $pos_type {
            fn le_digits(mut self) -> impl Iterator<Item = Digit> {
                std::iter::from_fn(move || {
                    (self != 0).then(|| {
                        let digit = Digit::new((self % 10) as u8);
                        self /= 10;
                        digit
                    })
                })
            }
        }
        impl INum for $neg_type {
            fn is_negative(self) -> bool {
                self.is_negative()
            }
            fn abs(self) -> $pos_type {
                self.unsigned_abs()
            }
        }
    };
}

implPrim!(u8, i8);
implPrim!(u16, i16);
implPrim!(u32, i32);
implPrim!(u64, i64);
implPrim!(u128, i128);
implPrim!(usize, isize);
