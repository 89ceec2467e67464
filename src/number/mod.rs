mod add;
mod div;
mod mul;
mod neg;
mod rem;
mod sub;

use crate::{impl_from, impl_from_cast, VMError};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl_from! {
    i64, Number, Number::Int;
    f64, Number, Number::Float;
}

impl_from_cast! {
    i32 as i64, Number, Number::Int;
    u32 as i64, Number, Number::Int;
    f32 as f64, Number, Number::Float;
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => {
                write!(f, "{}", i)
            }
            Number::Float(v) => {
                write!(f, "{}", v)
            }
        }
    }
}

impl PartialEq for Number {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (&Number::Int(a), &Number::Int(b)) => a == b,
            (&Number::Float(a), &Number::Float(b)) => a == b,
            (&Number::Int(a), &Number::Float(b)) => a as f64 == b,
            (&Number::Float(a), &Number::Int(b)) => a == b as f64,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(b),
            (Number::Int(a), Number::Float(b)) => (*a as f64).partial_cmp(b),
            (Number::Float(a), Number::Int(b)) => a.partial_cmp(&(*b as f64)),
        }
    }
}

impl Number {
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i.is_negative(),
            Number::Float(f) => f.is_sign_negative(),
        }
    }

    pub fn pow(self, e: Self) -> Result<Self, VMError> {
        let v = match (self, e) {
            (Number::Int(i), Number::Int(e)) => {
                if e.is_negative() {
                    if e < i32::MIN as i64 {
                        return Err(VMError::UnsupportedOperation(format!(
                            "Cannot perform {i} ** {e}, exponent is smaller than {}",
                            i32::MIN
                        )));
                    }
                    (i as f64).powi(e as i32).into()
                } else {
                    if e > u32::MAX as i64 {
                        return Err(VMError::UnsupportedOperation(format!(
                            "Cannot perform {i} ** {e}, exponent is larger than {}",
                            u32::MAX
                        )));
                    }
                    match i.checked_pow(e as u32) {
                        Some(v) => v.into(),
                        None => {
                            return Err(VMError::UnsupportedOperation(format!(
                                "Overflow performing {i} ** {e}"
                            )))
                        }
                    }
                }
            }
            (Number::Int(i), Number::Float(e)) => (i as f64).powf(e).into(),
            (Number::Float(f), Number::Int(e)) => {
                if e < i32::MIN as i64 || e > i32::MAX as i64 {
                    return Err(VMError::UnsupportedOperation(format!(
                        "Cannot perform {f} ** {e}, exponent does not fit in i32"
                    )));
                }
                f.powi(e as i32).into()
            }
            (Number::Float(f), Number::Float(e)) => f.powf(e).into(),
        };
        Ok(v)
    }

    #[inline]
    pub fn to_float(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    #[inline]
    pub fn to_int(self) -> i64 {
        match self {
            Number::Int(i) => i,
            Number::Float(f) => f as i64,
        }
    }

    #[inline]
    pub fn to_usize(self) -> Result<usize, VMError> {
        if self.is_negative() {
            return Err(VMError::ConversionError(
                "Cannot convert negative to UINT".to_string(),
            ));
        }
        let u = match self {
            Number::Int(i) => i as usize,
            Number::Float(f) => f as usize,
        };
        Ok(u)
    }
}
