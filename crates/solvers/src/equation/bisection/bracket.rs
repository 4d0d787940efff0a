use thiserror::Error;

/// Errors that can occur when validating bracket endpoints.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
    /// Residual signs do not bracket a root.
    #[error("no sign change")]
    NoSignChange,
}

/// The sign of a residual, as used to pick which half of a bracket to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive or zero.
    Positive,
    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Current bracket bounds.
///
/// Only the residual sign at the left end is stored; the right end always has
/// the opposite sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// Creates a bracket from ordered bounds and their residual signs.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NoSignChange`] if both signs agree.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
        })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Replaces the endpoint whose residual shares the sign of `x`'s residual.
    ///
    /// For an increasing function this is the familiar rule: a positive
    /// residual moves the upper bound down, a negative one moves the lower
    /// bound up.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if self.left_sign == sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

/// Ordered, finite, non-degenerate bracket endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns a [`BracketError`] if an endpoint is non-finite or the width is zero.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        let (left, right) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { left, right })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}
