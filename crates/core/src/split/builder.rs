//! Split builder: divides an expense total among its participants.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use splitledger_shared::PercentageRounding;
use splitledger_shared::types::UserId;
use splitledger_shared::types::money::{floor_money, round_money, within_tolerance};
use tracing::debug;

use super::allocation::largest_remainder;
use super::error::SplitError;
use super::types::{SplitLine, SplitPolicy, SplitValue};

/// Builds the split lines of an expense.
///
/// The builder is a pure function of its inputs. The only state it carries is
/// the rounding mode used for percentage splits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitBuilder {
    percentage_rounding: PercentageRounding,
}

impl SplitBuilder {
    /// Creates a builder with the given percentage rounding mode.
    #[must_use]
    pub const fn new(percentage_rounding: PercentageRounding) -> Self {
        Self {
            percentage_rounding,
        }
    }

    /// Returns the rounding mode used for percentage splits.
    #[must_use]
    pub const fn percentage_rounding(self) -> PercentageRounding {
        self.percentage_rounding
    }

    /// Builds split lines for `total` under `policy`.
    ///
    /// - EQUAL: every share is `total / n` rounded down to the cent and the
    ///   leftover cents all go to the FIRST participant in `participants`.
    ///   `values` is ignored.
    /// - EXACT: `values` holds one amount per participant, used as-is. The
    ///   amounts must sum to `total` within one cent.
    /// - PERCENTAGE: `values` holds one percentage per participant. The
    ///   percentages must sum to 100 within 0.01. Each line is
    ///   `total * pct / 100` at two decimals, see [`PercentageRounding`].
    ///
    /// Lines come back in the order of `participants`.
    ///
    /// # Errors
    ///
    /// Returns `SplitError` if the inputs do not describe a valid division of
    /// `total`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitledger_core::split::{SplitBuilder, SplitPolicy};
    /// use splitledger_shared::types::UserId;
    ///
    /// let lines = SplitBuilder::default()
    ///     .build(SplitPolicy::Equal, dec!(10.00), &[UserId(1), UserId(2), UserId(3)], None)
    ///     .unwrap();
    /// let amounts: Vec<_> = lines.iter().map(|l| l.amount).collect();
    /// assert_eq!(amounts, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
    /// ```
    pub fn build(
        &self,
        policy: SplitPolicy,
        total: Decimal,
        participants: &[UserId],
        values: Option<&[SplitValue]>,
    ) -> Result<Vec<SplitLine>, SplitError> {
        if total <= Decimal::ZERO {
            return Err(SplitError::NonPositiveTotal(total));
        }
        validate_participants(participants)?;

        let values = if policy.requires_values() {
            resolve_values(policy, participants, values)?
        } else {
            Vec::new()
        };

        let lines = match policy {
            SplitPolicy::Equal => split_equal(total, participants)?,
            SplitPolicy::Exact => split_exact(total, participants, &values)?,
            SplitPolicy::Percentage => self.split_percentage(total, participants, &values)?,
        };

        debug!(
            policy = %policy,
            total = %total,
            participants = lines.len(),
            "split built"
        );

        Ok(lines)
    }

    /// Builds split lines from a policy name as received from a caller.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnknownPolicy` if `policy` is not recognised, or
    /// any error [`SplitBuilder::build`] returns.
    pub fn build_named(
        &self,
        policy: &str,
        total: Decimal,
        participants: &[UserId],
        values: Option<&[SplitValue]>,
    ) -> Result<Vec<SplitLine>, SplitError> {
        let policy: SplitPolicy = policy.parse()?;
        self.build(policy, total, participants, values)
    }

    fn split_percentage(
        &self,
        total: Decimal,
        participants: &[UserId],
        percentages: &[Decimal],
    ) -> Result<Vec<SplitLine>, SplitError> {
        for (participant, pct) in participants.iter().zip(percentages) {
            if pct.is_sign_negative() && !pct.is_zero() {
                return Err(SplitError::NegativePercentage(*participant));
            }
        }

        let pct_sum = checked_sum(percentages)?;
        if !within_tolerance(pct_sum, Decimal::ONE_HUNDRED) {
            return Err(SplitError::PercentageMismatch { actual: pct_sum });
        }

        // Scale the percentage down first so only one product can overflow
        let exact = percentages
            .iter()
            .map(|pct| {
                pct.checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|fraction| total.checked_mul(fraction))
                    .ok_or(SplitError::AmountOverflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Allocation sums the shares, which may exceed the total by 0.01%
        checked_sum(&exact)?;

        let amounts = match self.percentage_rounding {
            PercentageRounding::LargestRemainder => largest_remainder(total, &exact),
            PercentageRounding::Preserve => exact.into_iter().map(round_money).collect(),
        };

        Ok(participants
            .iter()
            .zip(amounts)
            .zip(percentages)
            .map(|((participant, amount), pct)| {
                SplitLine::with_percentage(*participant, amount, *pct)
            })
            .collect())
    }
}

fn checked_sum(values: &[Decimal]) -> Result<Decimal, SplitError> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
        .ok_or(SplitError::AmountOverflow)
}

fn validate_participants(participants: &[UserId]) -> Result<(), SplitError> {
    if participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(*participant) {
            return Err(SplitError::DuplicateParticipant(*participant));
        }
    }
    Ok(())
}

/// Lines up caller values with `participants`, one value per participant.
fn resolve_values(
    policy: SplitPolicy,
    participants: &[UserId],
    values: Option<&[SplitValue]>,
) -> Result<Vec<Decimal>, SplitError> {
    let values = values.ok_or(SplitError::MissingValues(policy))?;

    let wanted: HashSet<UserId> = participants.iter().copied().collect();
    let mut by_participant: HashMap<UserId, Decimal> = HashMap::with_capacity(values.len());

    for entry in values {
        if !wanted.contains(&entry.participant) {
            return Err(SplitError::UnexpectedValue(entry.participant));
        }
        if by_participant
            .insert(entry.participant, entry.value)
            .is_some()
        {
            return Err(SplitError::DuplicateValue(entry.participant));
        }
    }

    participants
        .iter()
        .map(|participant| {
            by_participant
                .get(participant)
                .copied()
                .ok_or(SplitError::MissingValue(*participant))
        })
        .collect()
}

fn split_equal(total: Decimal, participants: &[UserId]) -> Result<Vec<SplitLine>, SplitError> {
    let count = Decimal::from(participants.len());
    let share = floor_money(total / count);
    let remainder = share
        .checked_mul(count)
        .and_then(|allocated| total.checked_sub(allocated))
        .ok_or(SplitError::AmountOverflow)?;

    Ok(participants
        .iter()
        .enumerate()
        .map(|(i, participant)| {
            let amount = if i == 0 { share + remainder } else { share };
            SplitLine::new(*participant, amount)
        })
        .collect())
}

fn split_exact(
    total: Decimal,
    participants: &[UserId],
    amounts: &[Decimal],
) -> Result<Vec<SplitLine>, SplitError> {
    for (participant, amount) in participants.iter().zip(amounts) {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SplitError::NegativeAmount(*participant));
        }
    }

    let sum = checked_sum(amounts)?;
    if !within_tolerance(sum, total) {
        return Err(SplitError::AmountMismatch {
            expected: total,
            actual: sum,
        });
    }

    Ok(participants
        .iter()
        .zip(amounts)
        .map(|(participant, amount)| SplitLine::new(*participant, *amount))
        .collect())
}
