// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        digits::Digit,
        unsigned::{radix, radix::Radix, FromStrErr},
        MathError,
    },
    ops::{DivMod, Pow, PowAssign},
    BigUInt,
};

use itertools::Either;
use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    ops::{
        Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, RangeInclusive, Rem, RemAssign, Sub,
        SubAssign,
    },
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Sign {
    Negative = -1,
    Positive = 1,
}
impl From<Sign> for SigNum {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Negative => Self::Negative,
            Sign::Positive => Self::Positive,
        }
    }
}
impl From<SigNum> for Sign {
    fn from(value: SigNum) -> Self {
        match value {
            SigNum::Negative => Self::Negative,
            SigNum::Zero | SigNum::Positive => Self::Positive,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum SigNum {
    Negative = -1,
    #[default]
    Zero = 0,
    Positive = 1,
}
impl From<SigNum> for i8 {
    fn from(value: SigNum) -> Self {
        value.into_i8()
    }
}
impl SigNum {
    const fn into_i8(self) -> i8 {
        self as i8
    }
    /// needs to be -1, 0 or 1
    const fn from_i8(value: i8) -> Self {
        match value {
            -1 => Self::Negative,
            0 => Self::Zero,
            1 => Self::Positive,
            _ => panic!("signum out of range"),
        }
    }
    pub const fn from_uint(is_zero: bool) -> Self {
        if is_zero {
            Self::Zero
        } else {
            Self::Positive
        }
    }
    pub const fn is_negative(self) -> bool {
        self.into_i8().is_negative()
    }
    pub const fn is_positive(self) -> bool {
        self.into_i8().is_positive()
    }
    pub const fn is_zero(self) -> bool {
        self.into_i8() == 0
    }
    #[must_use]
    pub const fn negate(self) -> Self {
        self.const_mul(Self::Negative)
    }
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_i8(self.into_i8().abs())
    }
    #[must_use]
    pub const fn const_mul(self, rhs: Self) -> Self {
        Self::from_i8(self.into_i8() * rhs.into_i8())
    }
    pub const fn is_different(self, other: Self) -> bool {
        !self.is_negative() ^ !other.is_negative()
    }
}
impl Neg for SigNum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
impl Mul for SigNum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.const_mul(rhs)
    }
}
impl MulAssign for SigNum {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct BigInt {
    /// the sign of the number, `Zero` exactly when the magnitude is zero
    pub(super) signum: SigNum,
    /// the magnitude, digits in LE order
    pub(super) unsigned: BigUInt,
}

impl Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number {{ {} ",
            match self.signum {
                SigNum::Negative => "-",
                SigNum::Zero => "",
                SigNum::Positive => "+",
            }
        )?;
        self.unsigned.inner_debug(f)?;
        write!(f, " }}")
    }
}
impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "",
            &self.unsigned.format_radix(Radix::DECIMAL),
        )
    }
}
impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "0x",
            &self.unsigned.format_radix(Radix::HEXADECIMAL).to_lowercase(),
        )
    }
}
impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "0X",
            &self.unsigned.format_radix(Radix::HEXADECIMAL),
        )
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signum.cmp(&other.signum).then_with(|| match self.signum {
            SigNum::Negative => other.unsigned.cmp(&self.unsigned),
            SigNum::Zero => Ordering::Equal,
            SigNum::Positive => self.unsigned.cmp(&other.unsigned),
        })
    }
}

impl From<BigUInt> for BigInt {
    fn from(value: BigUInt) -> Self {
        value.with_sign(Sign::Positive)
    }
}
impl FromIterator<Digit> for BigInt {
    /// the iter should contain the digits in little endian order
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        BigUInt::from_iter(iter).into()
    }
}
impl<PRIMITIVE: super::primitive::Primitive> From<PRIMITIVE> for BigInt {
    fn from(value: PRIMITIVE) -> Self {
        use super::primitive::{INum, UNum};
        match value.select_sign() {
            Either::Left(pos) => BigUInt::from_digits(UNum::le_digits(pos)).into(),
            Either::Right(neg) => {
                let sign = if INum::is_negative(neg) {
                    Sign::Negative
                } else {
                    Sign::Positive
                };
                BigUInt::from_digits(UNum::le_digits(INum::abs(neg))).with_sign(sign)
            }
        }
    }
}

impl FromStr for BigInt {
    type Err = FromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, rest) = strip_sign(s);
        let sign = sign.unwrap_or(Sign::Positive);

        rest.parse::<BigUInt>()
            .map(|it| it.with_sign(sign))
            .map_err(|err| offset_digit_position(err, s.len() - rest.len()))
    }
}

fn strip_sign(s: &str) -> (Option<Sign>, &str) {
    match s.chars().next() {
        Some('-') => (Some(Sign::Negative), &s[1..]),
        Some('+') => (Some(Sign::Positive), &s[1..]),
        None | Some(_) => (None, s),
    }
}
fn offset_digit_position(mut err: FromStrErr, offset: usize) -> FromStrErr {
    if let FromStrErr::UnknownDigit { digit: _, position } = &mut err {
        *position += offset;
    }
    err
}

impl BigInt {
    pub fn zero() -> Self {
        Self::default()
    }
    pub fn one() -> Self {
        BigUInt::one().into()
    }
    pub fn new(sign: impl Into<Sign>, unsigned: impl Into<BigUInt>) -> Self {
        let unsigned = unsigned.into();
        Self {
            signum: Self::get_new_signum(&unsigned, || sign.into()),
            unsigned,
        }
    }
    pub fn from_digit(value: Digit) -> Self {
        BigUInt::from_digit(value).into()
    }
    pub fn from_digits(iter: impl IntoIterator<Item = Digit>) -> Self {
        BigUInt::from_digits(iter).into()
    }
    pub fn split_sign(self) -> (SigNum, BigUInt) {
        (self.signum, self.unsigned)
    }

    /// generate a new random number with at least `digits.start()` and at most
    /// `digits.end()` decimal digits and a random sign
    pub fn new_random(digits: RangeInclusive<usize>, mut rng: impl rand::RngCore) -> Self {
        let sign = if rng.next_u32() % 2 == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        BigUInt::new_random(digits, rng).with_sign(sign)
    }

    fn get_new_signum(unsigned: &BigUInt, sign: impl FnOnce() -> Sign) -> SigNum {
        if unsigned.is_zero() {
            SigNum::Zero
        } else {
            sign().into()
        }
    }

    /// parses a number with an optional leading `-`/`+` under the given radix
    pub fn from_str_radix(source: &str, radix: u8) -> Result<Self, FromStrErr> {
        let (sign, rest) = strip_sign(source);
        let sign = sign.unwrap_or(Sign::Positive);

        BigUInt::from_str_radix(rest, radix)
            .map(|it| it.with_sign(sign))
            .map_err(|err| offset_digit_position(err, source.len() - rest.len()))
    }
    pub fn to_str_radix(&self, radix: u8) -> Result<String, radix::Error> {
        self.unsigned.to_str_radix(radix).map(|digits| {
            if self.is_negative() {
                format!("-{digits}")
            } else {
                digits
            }
        })
    }

    pub const fn abs(&self) -> &BigUInt {
        &self.unsigned
    }
    pub fn into_abs(self) -> BigUInt {
        self.unsigned
    }
    pub const fn signum(&self) -> SigNum {
        self.signum
    }
    pub const fn is_negative(&self) -> bool {
        self.signum.is_negative()
    }
    pub const fn is_positive(&self) -> bool {
        self.signum.is_positive()
    }
    pub const fn is_zero(&self) -> bool {
        self.signum.is_zero()
    }
    pub fn is_one(&self) -> bool {
        self.signum.is_positive() && self.unsigned.is_one()
    }
    pub fn is_even(&self) -> bool {
        self.unsigned.is_even()
    }
    /// the number of decimal digits of the magnitude, 1 for zero
    pub fn digits(&self) -> usize {
        self.unsigned.digits()
    }

    pub fn set_sign(&mut self, sign: impl Into<Sign>) {
        self.signum = Self::get_new_signum(&self.unsigned, || sign.into());
    }
    pub fn negate(&mut self) {
        self.signum = -self.signum;
    }
    pub fn abs_assign(&mut self) {
        self.signum = self.signum.abs();
    }
    pub fn take_sign(&mut self) -> SigNum {
        let signum = self.signum;
        self.signum = self.signum.abs();
        signum
    }

    pub(crate) fn add(lhs: &Self, rhs: &Self) -> Self {
        if lhs.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return lhs.clone();
        }
        if lhs.signum == rhs.signum {
            return Self::new(lhs.signum, BigUInt::add(&lhs.unsigned, &rhs.unsigned));
        }
        // differing signs: subtract the smaller magnitude from the bigger one,
        // which carries the result's sign
        match lhs.unsigned.cmp(&rhs.unsigned) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::new(lhs.signum, BigUInt::sub(&lhs.unsigned, &rhs.unsigned)),
            Ordering::Less => Self::new(rhs.signum, BigUInt::sub(&rhs.unsigned, &lhs.unsigned)),
        }
    }
    pub(crate) fn sub(lhs: &Self, rhs: &Self) -> Self {
        let mut rhs = rhs.clone();
        rhs.negate();
        Self::add(lhs, &rhs)
    }
    pub(crate) fn mul(lhs: &Self, rhs: &Self) -> Self {
        let signum = lhs.signum * rhs.signum;
        if signum.is_zero() {
            return Self::zero();
        }
        Self::new(signum, BigUInt::mul(&lhs.unsigned, &rhs.unsigned))
    }
    fn div(lhs: &Self, rhs: &Self) -> Self {
        Self::checked_div_mod(lhs, rhs)
            .expect("can't divide by zero")
            .0
    }
    fn rem(lhs: &Self, rhs: &Self) -> Self {
        Self::checked_div_mod(lhs, rhs)
            .expect("can't divide by zero")
            .1
    }
    pub fn checked_div(lhs: &Self, rhs: &Self) -> Result<Self, MathError> {
        Self::checked_div_mod(lhs, rhs).map(|it| it.0)
    }
    pub fn checked_rem(lhs: &Self, rhs: &Self) -> Result<Self, MathError> {
        Self::checked_div_mod(lhs, rhs).map(|it| it.1)
    }
    /// floor division with the matching remainder, so that
    /// `lhs == quotient * rhs + remainder` with the remainder on the
    /// divisor's side of zero
    pub fn checked_div_mod(lhs: &Self, rhs: &Self) -> Result<(Self, Self), MathError> {
        let (q_mag, r_mag) = BigUInt::checked_div_mod(&lhs.unsigned, &rhs.unsigned)?;
        let signum_q = lhs.signum * rhs.signum;
        Ok(if r_mag.is_zero() {
            (Self::new(signum_q, q_mag), Self::zero())
        } else if signum_q.is_negative() {
            // inexact with differing signs: round towards negative infinity
            // and move the remainder onto the divisor's side
            (
                Self::new(signum_q, BigUInt::add(&q_mag, &BigUInt::one())),
                Self::new(rhs.signum, BigUInt::sub(&rhs.unsigned, &r_mag)),
            )
        } else {
            (Self::new(signum_q, q_mag), Self::new(rhs.signum, r_mag))
        })
    }

    /// raises `self` to `exponent` in place.
    ///
    /// an exponent of 0 always gives one, `0^0` included
    pub fn pow_assign(&mut self, exponent: usize) {
        let signum = if self.signum.is_negative() && exponent % 2 == 1 {
            SigNum::Negative
        } else {
            SigNum::Positive
        };
        self.unsigned.pow_assign(exponent);
        self.signum = if self.unsigned.is_zero() {
            SigNum::Zero
        } else {
            signum
        };
    }

    /// replaces `self` with the largest number `x` with `x^degree <= self`
    pub fn root_assign(&mut self, degree: usize) -> Result<(), MathError> {
        if self.is_negative() {
            return Err(MathError::RootOfNegative);
        }
        self.unsigned.root_assign(degree)?;
        self.signum = self.unsigned.signum();
        Ok(())
    }
    pub fn nth_root(&self, degree: usize) -> Result<Self, MathError> {
        let mut out = self.clone();
        out.root_assign(degree)?;
        Ok(out)
    }

    /// `n!` as a new number, `0! == 1`
    pub fn factorial(n: i32) -> Result<Self, MathError> {
        if n.is_negative() {
            return Err(MathError::NegativeFactorial);
        }
        let mut out = BigUInt::one();
        for i in 2..=n.unsigned_abs() {
            out = BigUInt::mul(&out, &BigUInt::from(i));
        }
        Ok(out.into())
    }
}

impl Neg for BigInt {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

macro_rules! implBigMath {
    ($($assign_trait:tt)::*, $assign_func:ident, $($trait:tt)::*, $func:ident, $inner_func:ident) => {
        impl $($trait)::* for BigInt {
            type Output = BigInt;
            fn $func(self, rhs: BigInt) -> BigInt {
                BigInt::$inner_func(&self, &rhs)
            }
        }
        impl $($trait)::*<&BigInt> for BigInt {
            type Output = BigInt;
            fn $func(self, rhs: &BigInt) -> BigInt {
                BigInt::$inner_func(&self, rhs)
            }
        }
        impl $($trait)::*<BigInt> for &BigInt {
            type Output = BigInt;
            fn $func(self, rhs: BigInt) -> BigInt {
                BigInt::$inner_func(self, &rhs)
            }
        }
        impl $($trait)::* for &BigInt {
            type Output = BigInt;
            fn $func(self, rhs: &BigInt) -> BigInt {
                BigInt::$inner_func(self, rhs)
            }
        }
        impl $($assign_trait)::* for BigInt {
            fn $assign_func(&mut self, rhs: BigInt) {
                $($assign_trait)::*::$assign_func(self, &rhs);
            }
        }
        impl $($assign_trait)::*<&BigInt> for BigInt {
            fn $assign_func(&mut self, rhs: &BigInt) {
                *self = BigInt::$inner_func(&*self, rhs);
            }
        }
    };
}
implBigMath!(AddAssign, add_assign, Add, add, add);
implBigMath!(SubAssign, sub_assign, Sub, sub, sub);
implBigMath!(MulAssign, mul_assign, Mul, mul, mul);
implBigMath!(DivAssign, div_assign, Div, div, div);
implBigMath!(RemAssign, rem_assign, Rem, rem, rem);

impl DivMod for BigInt {
    type Output = Self;
    fn div_mod(self, rhs: Self) -> (Self, Self) {
        DivMod::div_mod(&self, &rhs)
    }
}
impl DivMod<&Self> for BigInt {
    type Output = Self;
    fn div_mod(self, rhs: &Self) -> (Self, Self) {
        DivMod::div_mod(&self, rhs)
    }
}
impl DivMod<BigInt> for &BigInt {
    type Output = BigInt;
    fn div_mod(self, rhs: BigInt) -> (BigInt, BigInt) {
        DivMod::div_mod(self, &rhs)
    }
}
impl DivMod for &BigInt {
    type Output = BigInt;
    fn div_mod(self, rhs: Self) -> (BigInt, BigInt) {
        BigInt::checked_div_mod(self, rhs).expect("can't divide by zero")
    }
}

impl Pow<usize> for BigInt {
    type Output = Self;
    fn pow(mut self, rhs: usize) -> Self {
        self.pow_assign(rhs);
        self
    }
}
impl Pow<usize> for &BigInt {
    type Output = BigInt;
    fn pow(self, rhs: usize) -> BigInt {
        Pow::pow(self.clone(), rhs)
    }
}
impl PowAssign<usize> for BigInt {
    fn pow_assign(&mut self, rhs: usize) {
        Self::pow_assign(self, rhs);
    }
}
