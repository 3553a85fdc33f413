// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{digits::Digit, math_algos, MathError},
    ops::{DivMod, Pow, PowAssign},
    BigIInt, Sign, SigNum,
};

use itertools::Itertools;
use rand::RngCore;
use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    ops::{
        Add, AddAssign, Div, DivAssign, Mul, MulAssign, RangeInclusive, Rem, RemAssign, Sub,
        SubAssign,
    },
    str::FromStr,
};

pub mod radix {
    use std::fmt;

    /// a validated digit basis in `2..=36`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Radix(u8);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Error {
        TooSmall(u8),
        TooBig(u8),
    }
    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::TooSmall(radix) => write!(f, "radix {radix} is smaller than 2"),
                Self::TooBig(radix) => write!(f, "radix {radix} is bigger than 36"),
            }
        }
    }
    impl std::error::Error for Error {}

    impl Radix {
        pub const MIN: Self = Self(2);
        pub const DECIMAL: Self = Self(10);
        pub const HEXADECIMAL: Self = Self(16);
        pub const MAX: Self = Self(36);

        pub const fn get(self) -> u8 {
            self.0
        }
    }
    impl TryFrom<u8> for Radix {
        type Error = Error;

        fn try_from(value: u8) -> Result<Self, Error> {
            match value {
                0..=1 => Err(Error::TooSmall(value)),
                2..=36 => Ok(Self(value)),
                _ => Err(Error::TooBig(value)),
            }
        }
    }
}
use radix::Radix;

#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum FromStrErr {
    UnknownDigit { digit: char, position: usize },
    #[from]
    UnsupportedRadix(radix::Error),
    Empty,
}
impl fmt::Display for FromStrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDigit { digit, position } => {
                write!(f, "unknown digit {digit:?} at position {position}")
            }
            Self::UnsupportedRadix(err) => fmt::Display::fmt(err, f),
            Self::Empty => write!(f, "no digits given"),
        }
    }
}
impl std::error::Error for FromStrErr {}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    /// the digits in LE order; at least one, the most significant one only
    /// zero for the canonical zero
    pub(super) digits: Vec<Digit>,
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number {{ ")?;
        self.inner_debug(f)?;
        write!(f, " }}")
    }
}
impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.format_radix(Radix::DECIMAL))
    }
}
impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.format_radix(Radix::HEXADECIMAL).to_lowercase())
    }
}
impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0X", &self.format_radix(Radix::HEXADECIMAL))
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        for elem in self.digits.iter().zip_longest(other.digits.iter()).rev() {
            match elem {
                itertools::EitherOrBoth::Both(lhs, rhs) => {
                    let ord = lhs.cmp(rhs);
                    if ord.is_ne() {
                        return ord;
                    }
                }
                itertools::EitherOrBoth::Right(_) => return Ordering::Less,
                itertools::EitherOrBoth::Left(_) => return Ordering::Greater,
            }
        }
        Ordering::Equal
    }
}

// From helper
fn strip_radix(s: &str) -> (Option<u8>, &str) {
    let mut chars = s.chars();
    if chars.next() != Some('0') {
        return (None, s);
    }
    match chars.next() {
        Some('b' | 'B') => (Some(2), &s[2..]),
        Some('o' | 'O') => (Some(8), &s[2..]),
        Some('d' | 'D') => (Some(10), &s[2..]),
        Some('x' | 'X') => (Some(16), &s[2..]),
        None | Some(_) => (None, s),
    }
}

// From traits
impl From<BigIInt> for BigInt {
    fn from(value: BigIInt) -> Self {
        value.unsigned
    }
}
impl FromIterator<Digit> for BigInt {
    /// the iter should contain the digits in little endian order
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        Self::from_digits(iter)
    }
}
cfg_if::cfg_if! {
    if #[cfg(all(
        feature = "uintFromAbsIPrimitive",
        feature = "uintFromAssertIPrimitive"
    ))] {
        compile_error!("feature \"uintFromAbsIPrimitive\" and feature \"uintFromAssertIPrimitive\" cannot be enabled at the same time");
    } else if #[cfg(any(
        feature = "uintFromAbsIPrimitive",
        feature = "uintFromAssertIPrimitive"
    ))] {
        use crate::big_int::primitive::INum;
        use itertools::Either;
        impl<PRIMITIVE: super::primitive::Primitive> From<PRIMITIVE> for BigInt {
            fn from(value: PRIMITIVE) -> Self {
                Self::from_digits(match value.select_sign() {
                    Either::Left(pos) => super::primitive::UNum::le_digits(pos),
                    Either::Right(neg) => {
                        #[cfg(feature = "uintFromAssertIPrimitive")]
                        assert!(!neg.is_negative(), "tried to get BigUInt from {value:?} < 0");
                        super::primitive::UNum::le_digits(neg.abs())
                    }
                })
            }
        }
    } else {
        impl<POSITIVE: super::primitive::UNum> From<POSITIVE> for BigInt {
            fn from(pos: POSITIVE) -> Self {
                Self::from_digits(pos.le_digits())
            }
        }
    }
}

impl FromStr for BigInt {
    type Err = FromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (radix, rest) = strip_radix(s);

        Self::from_str_radix(rest, radix.unwrap_or(10)).map_err(|mut err| {
            if let FromStrErr::UnknownDigit { digit: _, position } = &mut err {
                *position += s.len() - rest.len();
            }
            err
        })
    }
}

impl BigInt {
    // construction
    pub fn zero() -> Self {
        Self {
            digits: vec![Digit::ZERO],
        }
    }
    pub fn one() -> Self {
        Self {
            digits: vec![Digit::ONE],
        }
    }
    pub fn from_digit(value: Digit) -> Self {
        Self {
            digits: vec![value],
        }
    }
    /// builds a number from its digits in little endian order
    pub fn from_digits(iter: impl IntoIterator<Item = Digit>) -> Self {
        let mut num = Self {
            digits: iter.into_iter().collect(),
        };
        num.truncate_leading_zeros();
        num
    }
    pub fn with_sign(self, sign: Sign) -> BigIInt {
        BigIInt::new(sign, self)
    }
    /// generate a new random number with at least `digits.start()` and at most
    /// `digits.end()` decimal digits; the leading digit is never zero
    pub fn new_random(digits: RangeInclusive<usize>, mut rng: impl RngCore) -> Self {
        let len = digits.start()
            + crate::util::rng::next_below(digits.end() - digits.start() + 1, &mut rng);
        if len == 0 {
            return Self::zero();
        }
        let mut out = (1..len)
            .map(|_| Digit::new(crate::util::rng::next_below(10, &mut rng) as u8))
            .collect_vec();
        out.push(Digit::new(1 + crate::util::rng::next_below(9, &mut rng) as u8));
        Self { digits: out }
    }

    /// parses a magnitude with digits `0-9`, `a-z`/`A-Z` under the given radix.
    /// leading zeros are skipped, an empty digit sequence is an error
    pub fn from_str_radix(source: &str, radix: u8) -> Result<Self, FromStrErr> {
        let radix = Radix::try_from(radix)?;
        let mut digits = source.chars().enumerate().peekable();
        if digits.peek().is_none() {
            return Err(FromStrErr::Empty);
        }
        digits.peeking_take_while(|(_, it)| *it == '0').for_each(drop);
        if digits.peek().is_none() {
            return Ok(Self::zero());
        }

        if radix == Radix::DECIMAL {
            let mut parsed = Vec::new();
            for (i, digit) in digits {
                match digit.to_digit(10) {
                    Some(value) => parsed.push(Digit::new(value as u8)),
                    None => return Err(FromStrErr::UnknownDigit { digit, position: i }),
                }
            }
            parsed.reverse();
            Ok(Self::from_digits(parsed))
        } else {
            // accumulate with the crate's own primitives: num = num * radix + digit
            let base = Self::from(radix.get());
            let mut num = Self::zero();
            for (i, digit) in digits {
                match digit.to_digit(u32::from(radix.get())) {
                    Some(value) => {
                        num = math_algos::mul::schoolbook(&num, &base);
                        math_algos::add::assign(&mut num, &Self::from(value as u8));
                    }
                    None => return Err(FromStrErr::UnknownDigit { digit, position: i }),
                }
            }
            Ok(num)
        }
    }

    pub fn to_str_radix(&self, radix: u8) -> Result<String, radix::Error> {
        Radix::try_from(radix).map(|radix| self.format_radix(radix))
    }
    pub(super) fn format_radix(&self, radix: Radix) -> String {
        if radix == Radix::DECIMAL {
            return self.digits.iter().rev().map(|it| it.to_char()).collect();
        }
        if self.is_zero() {
            return "0".to_owned();
        }
        let base = Self::from(radix.get());
        let mut symbols = Vec::new();
        let mut left = self.clone();
        while !left.is_zero() {
            let (next, remainder) = math_algos::div::long_division(&left, &base);
            left = next;
            let value = remainder
                .try_to_usize()
                .expect("remainder is below the radix");
            symbols.push(
                char::from_digit(value as u32, u32::from(radix.get()))
                    .expect("remainder is below the radix")
                    .to_ascii_uppercase(),
            );
        }
        symbols.iter().rev().collect()
    }

    // inner utils
    pub(super) fn truncate_leading_zeros(&mut self) {
        while self.digits.len() > 1 && self.digits.last().is_some_and(|it| it.is_zero()) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.digits.push(Digit::ZERO);
        }
    }
    pub(super) fn inner_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (pos, elem) in self.digits.iter().rev().with_position() {
            write!(f, "{elem:?}")?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "]")
    }

    // getter
    pub fn le_digits(&self) -> impl ExactSizeIterator<Item = Digit> + DoubleEndedIterator + '_ {
        self.digits.iter().copied()
    }
    /// the number of decimal digits, 1 for zero
    pub fn digits(&self) -> usize {
        self.digits.len()
    }
    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0].is_zero()
    }
    pub fn is_one(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == Digit::ONE
    }
    pub fn is_even(&self) -> bool {
        self.digits.first().is_some_and(|it| it.is_even())
    }
    pub fn signum(&self) -> SigNum {
        SigNum::from_uint(self.is_zero())
    }
    /// the value as `usize`, when it fits
    pub fn try_to_usize(&self) -> Option<usize> {
        self.digits.iter().rev().try_fold(0usize, |acc, digit| {
            acc.checked_mul(10)?.checked_add(usize::from(digit.get()))
        })
    }

    // math
    pub(crate) fn add(lhs: &Self, rhs: &Self) -> Self {
        let mut out = lhs.clone();
        math_algos::add::assign(&mut out, rhs);
        out
    }
    /// # Panics
    /// when the result would be negative
    pub(crate) fn sub(lhs: &Self, rhs: &Self) -> Self {
        assert!(lhs >= rhs, "result would be negative");
        let mut out = lhs.clone();
        math_algos::sub::assign_smaller(&mut out, rhs);
        out
    }
    pub(crate) fn mul(lhs: &Self, rhs: &Self) -> Self {
        if lhs.is_one() {
            return rhs.clone();
        }
        if rhs.is_one() {
            return lhs.clone();
        }
        math_algos::mul::schoolbook(lhs, rhs)
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
    /// quotient and remainder of the magnitudes in one pass
    pub fn checked_div_mod(lhs: &Self, rhs: &Self) -> Result<(Self, Self), MathError> {
        if rhs.is_zero() {
            return Err(MathError::DivideByZero);
        }
        Ok(match lhs.cmp(rhs) {
            Ordering::Less => (Self::zero(), lhs.clone()),
            Ordering::Equal => (Self::one(), Self::zero()),
            Ordering::Greater => math_algos::div::long_division(lhs, rhs),
        })
    }

    /// raises `self` to `exponent` in place.
    ///
    /// an exponent of 0 always gives one, `0^0` included
    pub fn pow_assign(&mut self, exponent: usize) {
        if exponent == 0 {
            *self = Self::one();
            return;
        }
        if self.is_zero() || self.is_one() {
            return;
        }
        // halve the exponent down to 1 recording each step, then replay the
        // steps backwards starting from the base
        let mut actions = Vec::new();
        let mut left = exponent;
        while left > 1 {
            if left % 2 == 0 {
                actions.push(PowAction::Square);
                left /= 2;
            } else {
                actions.push(PowAction::MulBase);
                left -= 1;
            }
        }
        let base = self.clone();
        for action in actions.iter().rev() {
            *self = match action {
                PowAction::Square => math_algos::mul::schoolbook(self, self),
                PowAction::MulBase => math_algos::mul::schoolbook(self, &base),
            };
        }
    }

    /// replaces `self` with the largest number `x` with `x^degree <= self`.
    ///
    /// each result digit, most significant first, is found by binary search
    /// over `0..=9`, re-exponentiating the candidate for every probe
    pub fn root_assign(&mut self, degree: usize) -> Result<(), MathError> {
        if degree == 0 {
            return Err(MathError::RootDegreeZero);
        }
        if degree == 1 || self.is_zero() || self.is_one() {
            return Ok(());
        }
        let result_len = self.digits.len().div_ceil(degree);
        let mut digits = vec![Digit::ZERO; result_len];
        for position in (0..result_len).rev() {
            let mut low = 0;
            let mut high = Digit::MAX.get();
            let mut best = 0;
            while low <= high {
                let mid = (low + high) / 2;
                digits[position] = Digit::new(mid);
                let mut candidate = Self::from_digits(digits.iter().copied());
                candidate.pow_assign(degree);
                if candidate <= *self {
                    best = mid;
                    low = mid + 1;
                } else if mid == 0 {
                    break;
                } else {
                    high = mid - 1;
                }
            }
            digits[position] = Digit::new(best);
        }
        *self = Self::from_digits(digits);
        Ok(())
    }
    pub fn nth_root(&self, degree: usize) -> Result<Self, MathError> {
        let mut out = self.clone();
        out.root_assign(degree)?;
        Ok(out)
    }
}

enum PowAction {
    Square,
    MulBase,
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
