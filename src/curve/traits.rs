//! Small traits shared by the point representations.

/// Types with a neutral element for the group law.
pub trait Identity {
    /// Returns the identity element.
    fn identity() -> Self;
}

/// Checks whether a representation describes a point on the curve.
///
/// This is a precondition check, not a constant-time operation.
pub trait ValidityCheck {
    /// Returns `true` if the coordinates satisfy the curve equation.
    fn is_valid(&self) -> bool;
}
