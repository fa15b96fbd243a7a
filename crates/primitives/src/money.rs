//! Integer money arithmetic in minor currency units.
//!
//! All prices on the wire and in local storage are integers (fils/cents),
//! never floats. Percentage size modifiers are expressed in basis points so
//! the adjusted unit price stays exact integer math.

/// A monetary amount in minor currency units (e.g. fils, cents).
pub type MinorUnits = u64;

/// Basis points per whole (100%).
pub const BPS_PER_WHOLE: u64 = 10_000;

/// Apply a basis-point surcharge to a base amount, rounding half-up to the
/// minor unit.
///
/// `apply_modifier_bps(1000, 3000)` is `1000 × 1.30 = 1300`; a product that
/// lands on a half minor unit rounds away from zero.
#[must_use]
pub fn apply_modifier_bps(base: MinorUnits, modifier_bps: u64) -> MinorUnits {
    let scaled = base * (BPS_PER_WHOLE + modifier_bps);
    (scaled + BPS_PER_WHOLE / 2) / BPS_PER_WHOLE
}

/// Render a minor-unit amount as a decimal string, e.g. `1500` -> `"15.00"`.
#[must_use]
pub fn format_minor(amount: MinorUnits) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
