use crate::bank::BankRecord;
use crate::ledger::InterestRecord;
use chrono::NaiveDate;
use std::collections::HashMap;

/// An interest record paired with at most one bank record. `bank` is `None`
/// when no extract row shares the match key.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    pub interest: InterestRecord,
    pub bank: Option<BankRecord>,
}

impl MatchedRow {
    pub fn is_matched(&self) -> bool {
        self.bank.is_some()
    }
}

/// Amounts are keyed by their centi-unit value so duplicate grouping and
/// join lookups are exact. Currency input carries at most two decimals.
fn amount_key(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

type GroupKey = (NaiveDate, i64);

/// Assign each position a zero-based rank among the positions sharing the
/// same (date, amount) key, in input order.
fn occurrence_indices(keys: &[GroupKey]) -> Vec<usize> {
    let mut seen: HashMap<GroupKey, usize> = HashMap::new();
    keys.iter()
        .map(|key| {
            let rank = seen.entry(*key).or_insert(0);
            let current = *rank;
            *rank += 1;
            current
        })
        .collect()
}

/// Left join of interest records to bank records on (date, amount,
/// occurrence index).
///
/// The occurrence index is the rank of a row within its (date, amount)
/// duplicate group, assigned independently on each side. Duplicate keys
/// therefore pair up one-to-one in input order instead of collapsing onto a
/// single bank row or multiplying out. Every interest record appears
/// exactly once in the result; each bank record is used at most once.
pub fn match_records(interest: &[InterestRecord], bank: &[BankRecord]) -> Vec<MatchedRow> {
    let bank_keys: Vec<GroupKey> = bank
        .iter()
        .map(|r| (r.date, amount_key(r.amount)))
        .collect();
    let bank_ranks = occurrence_indices(&bank_keys);

    let mut bank_lookup: HashMap<(NaiveDate, i64, usize), &BankRecord> = HashMap::new();
    for ((key, rank), record) in bank_keys.iter().zip(&bank_ranks).zip(bank) {
        bank_lookup.insert((key.0, key.1, *rank), record);
    }

    let interest_keys: Vec<GroupKey> = interest
        .iter()
        .map(|r| (r.date, amount_key(r.amount)))
        .collect();
    let interest_ranks = occurrence_indices(&interest_keys);

    interest
        .iter()
        .zip(interest_keys.iter().zip(&interest_ranks))
        .map(|(record, (key, rank))| MatchedRow {
            interest: record.clone(),
            bank: bank_lookup.get(&(key.0, key.1, *rank)).map(|r| (*r).clone()),
        })
        .collect()
}
