//! Business rule registry
//!
//! Rules are static descriptors grouped by operation kind. Each one pairs a
//! predicate over the pre-mutation account and the incoming payload with the
//! violation it reports. Transaction rules are further selected by allow-list
//! mode.
//!
//! | Operation | Mode | Rules (in order) |
//! |---|---|---|
//! | account | any | account-already-initialized |
//! | transaction | normal | account-not-initialized (terminal), card-not-active, insufficient-limit, high-frequency-small-interval, doubled-transaction |
//! | transaction | allow-list | card-not-active, insufficient-limit |
//! | allow-list | any | (none) |

use crate::types::{
    Account, AccountRequest, AllowListRequest, OperationKind, Transaction, Violation,
};

/// Width of the frequency/duplicate window in milliseconds
pub const WINDOW_MILLIS: i64 = 120_000;

/// Number of prior in-window transactions at which a new one is rejected
pub const HIGH_FREQUENCY_LIMIT: usize = 3;

/// Rule predicate: returns `true` when the rule is violated
pub type Predicate<P> = fn(Option<&Account>, &P) -> bool;

/// A single rule descriptor
#[derive(Debug)]
pub struct Rule<P> {
    /// Violation reported when the predicate holds
    pub violation: Violation,

    /// Stop evaluating the rule list when this rule is violated
    pub terminal: bool,

    is_violated: Predicate<P>,
}

impl<P> Rule<P> {
    pub const fn new(violation: Violation, is_violated: Predicate<P>) -> Self {
        Rule {
            violation,
            terminal: false,
            is_violated,
        }
    }

    /// Mark the rule as terminal
    pub const fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Evaluate the rule against the current account and an incoming payload
    pub fn is_violated(&self, account: Option<&Account>, payload: &P) -> bool {
        (self.is_violated)(account, payload)
    }
}

static ACCOUNT_RULES: [Rule<AccountRequest>; 1] =
    [Rule::new(Violation::AccountAlreadyInitialized, account_exists)];

static TRANSACTION_RULES: [Rule<Transaction>; 5] = [
    Rule::new(Violation::AccountNotInitialized, account_missing).terminal(),
    Rule::new(Violation::CardNotActive, card_not_active),
    Rule::new(Violation::InsufficientLimit, insufficient_limit),
    Rule::new(Violation::HighFrequencySmallInterval, high_frequency),
    Rule::new(Violation::DoubledTransaction, doubled_transaction),
];

static ALLOW_LIST_TRANSACTION_RULES: [Rule<Transaction>; 2] = [
    Rule::new(Violation::CardNotActive, card_not_active),
    Rule::new(Violation::InsufficientLimit, insufficient_limit),
];

static ALLOW_LIST_RULES: [Rule<AllowListRequest>; 0] = [];

/// Static mapping from operation kind (and mode) to its ordered rule list
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleRegistry;

impl RuleRegistry {
    pub fn account_rules(&self) -> &'static [Rule<AccountRequest>] {
        &ACCOUNT_RULES
    }

    /// Transaction rules for the given allow-list mode
    pub fn transaction_rules(&self, allow_mode: bool) -> &'static [Rule<Transaction>] {
        if allow_mode {
            &ALLOW_LIST_TRANSACTION_RULES
        } else {
            &TRANSACTION_RULES
        }
    }

    pub fn allow_list_rules(&self) -> &'static [Rule<AllowListRequest>] {
        &ALLOW_LIST_RULES
    }

    /// Violations (and their terminal flag) checked for an operation kind, in order
    pub fn describe(&self, kind: OperationKind, allow_mode: bool) -> Vec<(Violation, bool)> {
        fn labels<P>(rules: &[Rule<P>]) -> Vec<(Violation, bool)> {
            rules.iter().map(|r| (r.violation, r.terminal)).collect()
        }

        match kind {
            OperationKind::Account => labels(self.account_rules()),
            OperationKind::Transaction => labels(self.transaction_rules(allow_mode)),
            OperationKind::AllowList => labels(self.allow_list_rules()),
        }
    }
}

fn account_exists(account: Option<&Account>, _: &AccountRequest) -> bool {
    account.is_some()
}

fn account_missing(account: Option<&Account>, _: &Transaction) -> bool {
    account.is_none()
}

fn card_not_active(account: Option<&Account>, _: &Transaction) -> bool {
    account.is_some_and(|a| !a.active_card)
}

fn insufficient_limit(account: Option<&Account>, tx: &Transaction) -> bool {
    account.is_some_and(|a| i128::from(tx.amount) > i128::from(a.available_limit))
}

fn high_frequency(account: Option<&Account>, tx: &Transaction) -> bool {
    account.is_some_and(|a| within_window(a, tx).count() >= HIGH_FREQUENCY_LIMIT)
}

fn doubled_transaction(account: Option<&Account>, tx: &Transaction) -> bool {
    account.is_some_and(|a| {
        within_window(a, tx).any(|prior| prior.merchant == tx.merchant && prior.amount == tx.amount)
    })
}

/// Accepted transactions no more than `WINDOW_MILLIS` before `incoming`
///
/// The difference is not taken as an absolute value: input is expected in
/// non-decreasing time order, so a later-stamped prior is counted as in-window.
fn within_window<'a>(
    account: &'a Account,
    incoming: &'a Transaction,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    account
        .transactions
        .iter()
        .filter(move |prior| incoming.millis_since(prior) <= WINDOW_MILLIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 2, 13, 11, 0, 0).unwrap()
    }

    fn tx_at(merchant: &str, amount: u64, offset_millis: i64) -> Transaction {
        Transaction::new(
            merchant,
            amount,
            base_time() + Duration::milliseconds(offset_millis),
        )
    }

    fn account_with_history(history: Vec<Transaction>) -> Account {
        let mut account = Account::new(true, 1000);
        account.transactions = history;
        account
    }

    fn violated(rule: &Rule<Transaction>, account: &Account, tx: &Transaction) -> bool {
        rule.is_violated(Some(account), tx)
    }

    fn transaction_rule(violation: Violation) -> &'static Rule<Transaction> {
        RuleRegistry
            .transaction_rules(false)
            .iter()
            .find(|r| r.violation == violation)
            .unwrap()
    }

    #[test]
    fn test_rule_lists_are_ordered() {
        let registry = RuleRegistry;

        assert_eq!(
            registry.describe(OperationKind::Account, false),
            vec![(Violation::AccountAlreadyInitialized, false)]
        );
        assert_eq!(
            registry.describe(OperationKind::Transaction, false),
            vec![
                (Violation::AccountNotInitialized, true),
                (Violation::CardNotActive, false),
                (Violation::InsufficientLimit, false),
                (Violation::HighFrequencySmallInterval, false),
                (Violation::DoubledTransaction, false),
            ]
        );
        assert_eq!(
            registry.describe(OperationKind::Transaction, true),
            vec![
                (Violation::CardNotActive, false),
                (Violation::InsufficientLimit, false),
            ]
        );
        assert!(registry.describe(OperationKind::AllowList, true).is_empty());
    }

    #[test]
    fn test_account_exists_rule() {
        let rule = &RuleRegistry.account_rules()[0];
        let request = AccountRequest {
            active_card: true,
            available_limit: 100,
        };

        assert!(!rule.is_violated(None, &request));
        assert!(rule.is_violated(Some(&Account::new(true, 100)), &request));
    }

    #[test]
    fn test_account_missing_rule() {
        let rule = transaction_rule(Violation::AccountNotInitialized);
        let tx = tx_at("Burger King", 20, 0);

        assert!(rule.is_violated(None, &tx));
        assert!(!rule.is_violated(Some(&Account::new(true, 100)), &tx));
    }

    #[rstest]
    #[case::active(true, false)]
    #[case::inactive(false, true)]
    fn test_card_not_active_rule(#[case] active_card: bool, #[case] expected: bool) {
        let rule = transaction_rule(Violation::CardNotActive);
        let account = Account::new(active_card, 100);

        assert_eq!(violated(rule, &account, &tx_at("Burger King", 20, 0)), expected);
    }

    #[rstest]
    #[case::below_limit(999, false)]
    #[case::exactly_limit(1000, false)]
    #[case::above_limit(1001, true)]
    #[case::huge_amount(u64::MAX, true)]
    fn test_insufficient_limit_rule(#[case] amount: u64, #[case] expected: bool) {
        let rule = transaction_rule(Violation::InsufficientLimit);
        let account = Account::new(true, 1000);

        assert_eq!(violated(rule, &account, &tx_at("Burger King", amount, 0)), expected);
    }

    #[test]
    fn test_insufficient_limit_with_negative_limit() {
        let rule = transaction_rule(Violation::InsufficientLimit);
        let account = Account::new(true, -10);

        assert!(violated(rule, &account, &tx_at("Burger King", 0, 0)));
    }

    #[rstest]
    #[case::two_prior(2, false)]
    #[case::three_prior(3, true)]
    #[case::four_prior(4, true)]
    fn test_high_frequency_threshold(#[case] prior_count: i64, #[case] expected: bool) {
        let rule = transaction_rule(Violation::HighFrequencySmallInterval);
        let history = (0..prior_count)
            .map(|i| tx_at(&format!("Merchant {}", i), 10, i * 1000))
            .collect();
        let account = account_with_history(history);

        assert_eq!(
            violated(rule, &account, &tx_at("Another", 10, 60_000)),
            expected
        );
    }

    #[rstest]
    #[case::on_boundary(WINDOW_MILLIS, true)]
    #[case::past_boundary(WINDOW_MILLIS + 1, false)]
    #[case::priors_stamped_later(-30_000, true)]
    #[case::priors_stamped_far_later(-10 * WINDOW_MILLIS, true)]
    fn test_high_frequency_window_boundary(#[case] offset: i64, #[case] expected: bool) {
        let rule = transaction_rule(Violation::HighFrequencySmallInterval);
        let account = account_with_history(vec![
            tx_at("A", 10, 0),
            tx_at("B", 10, 0),
            tx_at("C", 10, 0),
        ]);

        assert_eq!(violated(rule, &account, &tx_at("D", 10, offset)), expected);
    }

    #[test]
    fn test_high_frequency_ignores_old_transactions() {
        let rule = transaction_rule(Violation::HighFrequencySmallInterval);
        let account = account_with_history(vec![
            tx_at("A", 10, 0),
            tx_at("B", 10, 1_000),
            tx_at("C", 10, 200_000),
            tx_at("D", 10, 201_000),
        ]);

        assert!(!violated(rule, &account, &tx_at("E", 10, 202_000)));
    }

    #[rstest]
    #[case::same_merchant_and_amount("Burger King", 20, 60_000, true)]
    #[case::different_amount("Burger King", 25, 60_000, false)]
    #[case::different_merchant("McDonald's", 20, 60_000, false)]
    #[case::outside_window("Burger King", 20, WINDOW_MILLIS + 1, false)]
    #[case::prior_stamped_later("Burger King", 20, -30_000, true)]
    #[case::prior_stamped_far_later("Burger King", 20, -10 * WINDOW_MILLIS, true)]
    fn test_doubled_transaction_rule(
        #[case] merchant: &str,
        #[case] amount: u64,
        #[case] offset: i64,
        #[case] expected: bool,
    ) {
        let rule = transaction_rule(Violation::DoubledTransaction);
        let account = account_with_history(vec![tx_at("Burger King", 20, 0)]);

        assert_eq!(
            violated(rule, &account, &tx_at(merchant, amount, offset)),
            expected
        );
    }

    #[test]
    fn test_doubled_transaction_matches_any_prior_not_just_latest() {
        let rule = transaction_rule(Violation::DoubledTransaction);
        let account = account_with_history(vec![
            tx_at("Burger King", 20, 0),
            tx_at("Habbib's", 90, 10_000),
        ]);

        assert!(violated(rule, &account, &tx_at("Burger King", 20, 20_000)));
    }
}
