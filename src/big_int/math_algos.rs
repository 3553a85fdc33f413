use itertools::Itertools;

use super::{digits::Digit, unsigned::BigInt};

pub mod add {
    use super::*;

    /// calculates `lhs` += `rhs` on magnitudes
    pub fn assign(lhs: &mut BigInt, rhs: &BigInt) {
        let orig_lhs_len = lhs.digits.len();
        lhs.digits.extend(rhs.digits.iter().copied().skip(orig_lhs_len));

        let mut carry = false;
        for elem in lhs
            .digits
            .iter_mut()
            .zip_longest(rhs.digits.iter().take(orig_lhs_len))
        {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs was extended"),
                E::Left(_digit) if !carry => {
                    break;
                }
                E::Left(digit) => (digit, Digit::ZERO),
                E::Both(digit, rhs) => (digit, *rhs),
            };
            (*lhs_digit, carry) = lhs_digit.carrying_add(rhs_digit, carry);
        }
        if carry {
            lhs.digits.push(Digit::ONE);
        }
        lhs.truncate_leading_zeros();
    }
}

pub mod sub {
    use super::*;

    /// calculates `lhs` -= `rhs` on magnitudes, `lhs` needs to be the bigger number
    pub fn assign_smaller(lhs: &mut BigInt, rhs: &BigInt) {
        debug_assert!(*lhs >= *rhs, "lhs is smaller than rhs");

        let mut borrow = false;
        for elem in lhs.digits.iter_mut().zip_longest(rhs.digits.iter()) {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs is always bigger"),
                E::Left(_digit) if !borrow => {
                    break;
                }
                E::Left(digit) => (digit, Digit::ZERO),
                E::Both(digit, rhs) => (digit, *rhs),
            };
            (*lhs_digit, borrow) = lhs_digit.borrowing_sub(rhs_digit, borrow);
        }
        debug_assert!(!borrow, "borrow left over");

        lhs.truncate_leading_zeros();
    }
}

pub mod mul {
    use super::*;

    /// the full double loop schoolbook product of two magnitudes.
    ///
    /// every digit pair is accumulated at its target position and carried
    /// right away, so a cell never leaves `u8` range
    pub fn schoolbook(lhs: &BigInt, rhs: &BigInt) -> BigInt {
        if lhs.is_zero() || rhs.is_zero() {
            return BigInt::zero();
        }
        let mut cells = vec![0u8; lhs.digits.len() + rhs.digits.len()];
        for (i, lhs_digit) in lhs.digits.iter().enumerate() {
            for (j, rhs_digit) in rhs.digits.iter().enumerate() {
                cells[i + j] += lhs_digit.get() * rhs_digit.get();
                if cells[i + j] >= Digit::BASE {
                    cells[i + j + 1] += cells[i + j] / Digit::BASE;
                    cells[i + j] %= Digit::BASE;
                }
            }
        }

        let mut digits = Vec::with_capacity(cells.len());
        let mut carry = 0;
        for cell in cells {
            let full = cell + carry;
            digits.push(Digit::new(full % Digit::BASE));
            carry = full / Digit::BASE;
        }
        debug_assert_eq!(carry, 0, "product outgrew its buffer");
        BigInt::from_digits(digits)
    }
}

pub mod div {
    use super::*;

    /// computes (`lhs` / `rhs`, `lhs` % `rhs`) on magnitudes in one pass.
    ///
    /// restoring long division: each quotient digit, highest position first,
    /// is found by repeatedly subtracting the divisor shifted to that position
    /// from the running remainder until it no longer fits
    pub fn long_division(lhs: &BigInt, rhs: &BigInt) -> (BigInt, BigInt) {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if lhs < rhs {
            return (BigInt::zero(), lhs.clone());
        }

        let quotient_len = lhs.digits.len() - rhs.digits.len() + 1;
        let mut quotient = vec![Digit::ZERO; quotient_len];
        let mut remainder = lhs.clone();
        for position in (0..quotient_len).rev() {
            let shifted = shift_digits(rhs, position);
            let mut count = 0;
            while remainder >= shifted {
                sub::assign_smaller(&mut remainder, &shifted);
                count += 1;
            }
            debug_assert!(count < Digit::BASE, "remainder was not restored");
            quotient[position] = Digit::new(count);
        }
        (BigInt::from_digits(quotient), remainder)
    }

    /// `value` * 10^`offset`
    fn shift_digits(value: &BigInt, offset: usize) -> BigInt {
        BigInt::from_digits(
            std::iter::repeat(Digit::ZERO)
                .take(offset)
                .chain(value.digits.iter().copied()),
        )
    }
}
