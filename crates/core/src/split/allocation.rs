//! Cent allocation using the Largest Remainder Method.
//!
//! Given the exact (unrounded) share of every line and the total they must
//! add up to, this module produces two-decimal amounts whose sum is EXACTLY
//! the total:
//! 1. Round every exact share down to the cent
//! 2. Measure the residual (total - sum of rounded shares) in cents
//! 3. Spread whole rounds of residual cents evenly over the lines, then hand
//!    the last partial round to the lines with the largest fractional parts
//!    (or, for a negative residual, take cents back starting from the lines
//!    with the smallest fractional parts, never below zero)
//!
//! Work grows with the number of lines, not with the size of the residual.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use splitledger_shared::types::TOLERANCE;
use splitledger_shared::types::money::{floor_money, round_money};

/// Allocates `total` across lines whose exact shares are `exact`.
///
/// Ties between equal fractional parts go to the earlier line.
pub(crate) fn largest_remainder(total: Decimal, exact: &[Decimal]) -> Vec<Decimal> {
    if exact.is_empty() {
        return vec![];
    }

    let mut rounded: Vec<Decimal> = exact.iter().map(|share| floor_money(*share)).collect();

    let sum_rounded: Decimal = rounded.iter().copied().sum();
    let units = (round_money(total - sum_rounded) / TOLERANCE).trunc();

    if units.is_zero() {
        return rounded;
    }

    // Fractional part lost by flooring each line; stable sorts keep earlier
    // lines ahead on ties
    let mut order: Vec<(usize, Decimal)> = exact
        .iter()
        .zip(rounded.iter())
        .enumerate()
        .map(|(i, (e, r))| (i, *e - *r))
        .collect();

    if units.is_sign_positive() {
        order.sort_by(|a, b| b.1.cmp(&a.1));
        let indices: Vec<usize> = order.into_iter().map(|(i, _)| i).collect();
        hand_out(&mut rounded, &indices, units);
    } else {
        order.sort_by(|a, b| a.1.cmp(&b.1));
        let indices: Vec<usize> = order.into_iter().map(|(i, _)| i).collect();
        take_back(&mut rounded, &indices, -units);
    }

    rounded
}

/// Adds `units` cents: an equal number to every line, then one more to each
/// of the first `units % n` lines in `order`.
fn hand_out(rounded: &mut [Decimal], order: &[usize], units: Decimal) {
    let lines = Decimal::from(order.len());
    let per_line = (units / lines).trunc();
    let extra = (units - per_line * lines).to_usize().unwrap_or(0);

    let bulk = per_line * TOLERANCE;
    for (position, idx) in order.iter().enumerate() {
        rounded[*idx] += bulk;
        if position < extra {
            rounded[*idx] += TOLERANCE;
        }
    }
}

/// Removes `units` cents, spreading them over the lines that still hold at
/// least a cent. Each round removes an equal share from every such line,
/// capped at what the line holds; once fewer cents than lines remain, one
/// cent comes off each of the first lines in `order`.
fn take_back(rounded: &mut [Decimal], order: &[usize], mut units: Decimal) {
    let mut active: Vec<usize> = order.to_vec();

    while units > Decimal::ZERO {
        active.retain(|idx| rounded[*idx] >= TOLERANCE);
        if active.is_empty() {
            break;
        }

        let lines = Decimal::from(active.len());
        let per_line = (units / lines).trunc();

        if per_line.is_zero() {
            let count = units.to_usize().unwrap_or(0);
            for idx in active.iter().take(count) {
                rounded[*idx] -= TOLERANCE;
            }
            break;
        }

        for idx in &active {
            let available = (rounded[*idx] / TOLERANCE).trunc();
            let taken = per_line.min(available);
            rounded[*idx] -= taken * TOLERANCE;
            units -= taken;
        }
    }
}
