//! Balance map: the net position of every participant.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::UserId;
use splitledger_shared::types::money::round_money;

/// Signed net balance per participant.
///
/// - Positive: the group owes this participant
/// - Negative: this participant owes the group
///
/// Iteration follows first-seen insertion order, so anything derived from a
/// balance map (simplified transfers, reports) is deterministic. Absent
/// participants read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceMap(IndexMap<UserId, Decimal>);

impl BalanceMap {
    /// Creates an empty balance map.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates a map listing every roster member at zero, in roster order.
    #[must_use]
    pub fn with_roster<I>(roster: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        let mut map = Self::new();
        for user in roster {
            map.0.entry(user).or_insert(Decimal::ZERO);
        }
        map
    }

    /// Returns the balance of `user`, zero if they never appeared.
    #[must_use]
    pub fn get(&self, user: UserId) -> Decimal {
        self.0.get(&user).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns true if `user` has an entry (even a zero one).
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.0.contains_key(&user)
    }

    /// Adds `amount` to the balance of `user`.
    pub fn credit(&mut self, user: UserId, amount: Decimal) {
        *self.0.entry(user).or_insert(Decimal::ZERO) += amount;
    }

    /// Subtracts `amount` from the balance of `user`.
    pub fn debit(&mut self, user: UserId, amount: Decimal) {
        *self.0.entry(user).or_insert(Decimal::ZERO) -= amount;
    }

    /// Iterates over `(participant, balance)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, Decimal)> + '_ {
        self.0.iter().map(|(user, balance)| (*user, *balance))
    }

    /// Returns the participants in first-seen order.
    pub fn participants(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.keys().copied()
    }

    /// Number of participants with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no participant has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances. Zero for a closed group.
    #[must_use]
    pub fn net_total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Returns a copy with every balance rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(user, balance)| (*user, round_money(*balance)))
                .collect(),
        )
    }
}

impl FromIterator<(UserId, Decimal)> for BalanceMap {
    /// Builds a map from pairs; repeated participants accumulate.
    fn from_iter<T: IntoIterator<Item = (UserId, Decimal)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (user, amount) in iter {
            map.credit(user, amount);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_participant_reads_zero() {
        let map = BalanceMap::new();
        assert_eq!(map.get(UserId(1)), Decimal::ZERO);
        assert!(!map.contains(UserId(1)));
    }

    #[test]
    fn test_credit_and_debit_accumulate() {
        let mut map = BalanceMap::new();
        map.credit(UserId(1), dec!(30));
        map.debit(UserId(1), dec!(10));
        map.debit(UserId(2), dec!(20));

        assert_eq!(map.get(UserId(1)), dec!(20));
        assert_eq!(map.get(UserId(2)), dec!(-20));
        assert_eq!(map.net_total(), Decimal::ZERO);
    }

    #[test]
    fn test_iteration_is_first_seen_order() {
        let mut map = BalanceMap::new();
        map.credit(UserId(3), dec!(1));
        map.credit(UserId(1), dec!(1));
        map.credit(UserId(2), dec!(1));
        map.credit(UserId(3), dec!(1));

        let order: Vec<UserId> = map.participants().collect();
        assert_eq!(order, vec![UserId(3), UserId(1), UserId(2)]);
    }

    #[test]
    fn test_with_roster_seeds_zeros() {
        let map = BalanceMap::with_roster([UserId(2), UserId(1), UserId(2)]);
        assert_eq!(map.len(), 2);
        assert!(map.contains(UserId(2)));
        assert_eq!(map.get(UserId(1)), Decimal::ZERO);
    }

    #[test]
    fn test_from_iterator_accumulates() {
        let map: BalanceMap = [(UserId(1), dec!(5)), (UserId(1), dec!(-2))]
            .into_iter()
            .collect();
        assert_eq!(map.get(UserId(1)), dec!(3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_rounded() {
        let map: BalanceMap = [(UserId(1), dec!(3.335)), (UserId(2), dec!(-3.335))]
            .into_iter()
            .collect();
        let rounded = map.rounded();
        assert_eq!(rounded.get(UserId(1)), dec!(3.34));
        assert_eq!(rounded.get(UserId(2)), dec!(-3.34));
    }

    #[test]
    fn test_serializes_as_object() {
        let map: BalanceMap = [(UserId(1), dec!(10.00))].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":"10.00"}"#);
    }
}
