use rust_decimal::Decimal;
use tracing::debug;

use crate::{errors::LedgerError, storage::RecordStore};

use super::record::{Bucket, BudgetRecord};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Owns the budget record and applies every state transition to it.
///
/// Each mutating operation changes the in-memory record and then writes the
/// whole record through the store. Validation or write failures leave the
/// record as it was.
pub struct Ledger {
    record: BudgetRecord,
    store: Box<dyn RecordStore>,
}

impl Ledger {
    /// Loads the record from `store`, falling back to defaults for unreadable data.
    pub fn open(store: Box<dyn RecordStore>) -> Result<Self, LedgerError> {
        let record = store.load()?;
        Ok(Self { record, store })
    }

    pub fn record(&self) -> &BudgetRecord {
        &self.record
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        self.store.save(&self.record)?;
        Ok(())
    }

    /// Projects income onto the three buckets using the current percentages.
    pub fn recalculate_balances(&mut self) {
        let income = self.record.income;
        for bucket in Bucket::ALL {
            *self.record.balance_mut(bucket) = income * self.record.percent(bucket);
        }
    }

    pub fn add_income(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = non_negative(amount);
        self.apply(|record| {
            record.total_income = record.total_income.saturating_add(amount);
            record.income = record.income.saturating_add(amount);
            debug!(%amount, income = %record.income, "income added");
        })
    }

    pub fn add_expense(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = non_negative(amount);
        self.apply(|record| {
            record.total_expenses = record.total_expenses.saturating_add(amount);
            debug!(%amount, total = %record.total_expenses, "expense added");
        })
    }

    /// Removes income; an amount above the lifetime total clamps both counters at zero.
    pub fn subtract_income(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = non_negative(amount);
        self.apply(|record| {
            if amount > record.total_income {
                record.total_income = Decimal::ZERO;
            } else {
                record.total_income -= amount;
            }
            record.income = non_negative(record.income - amount);
            debug!(%amount, income = %record.income, "income subtracted");
        })
    }

    pub fn subtract_expense(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = non_negative(amount);
        self.apply(|record| {
            if amount > record.total_expenses {
                record.total_expenses = Decimal::ZERO;
            } else {
                record.total_expenses -= amount;
            }
            debug!(%amount, total = %record.total_expenses, "expense subtracted");
        })
    }

    /// Moves up to `amount` of the bucket's current balance into next period.
    /// Returns the amount actually moved.
    pub fn push(&mut self, bucket: Bucket, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.apply(|record| {
            let moved = amount.clamp(Decimal::ZERO, record.balance(bucket));
            *record.balance_mut(bucket) -= moved;
            let next = record.next_mut(bucket);
            *next = next.saturating_add(moved);
            debug!(%bucket, %moved, "pushed to next period");
            moved
        })
    }

    /// Moves up to `amount` of the bucket's next-period balance back into the current period.
    /// Returns the amount actually moved.
    pub fn pull(&mut self, bucket: Bucket, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.apply(|record| {
            let moved = amount.clamp(Decimal::ZERO, record.next(bucket));
            let balance = record.balance_mut(bucket);
            *balance = balance.saturating_add(moved);
            *record.next_mut(bucket) -= moved;
            debug!(%bucket, %moved, "pulled from next period");
            moved
        })
    }

    /// Sets the allocation split from whole percentages, e.g. `50 30 20`.
    pub fn set_percentages(
        &mut self,
        needs: Decimal,
        wants: Decimal,
        savings: Decimal,
    ) -> Result<(), LedgerError> {
        for value in [needs, wants, savings] {
            if value < Decimal::ZERO || value > HUNDRED {
                return Err(LedgerError::PercentageOutOfRange { value });
            }
        }
        let fractions = [needs / HUNDRED, wants / HUNDRED, savings / HUNDRED];
        let sum: Decimal = fractions.iter().sum();
        if sum != Decimal::ONE {
            return Err(LedgerError::PercentageSumInvalid {
                total: needs + wants + savings,
            });
        }

        let [needs, wants, savings] = fractions;
        self.apply(|record| {
            record.percent_needs = needs;
            record.percent_wants = wants;
            record.percent_savings = savings;
            debug!(%needs, %wants, %savings, "allocation percentages updated");
        })
    }

    /// Wipes the record back to defaults. Callers are responsible for confirming first.
    pub fn reset(&mut self) -> Result<(), LedgerError> {
        self.apply(|record| {
            *record = BudgetRecord::default();
            debug!("budget record reset");
        })
    }

    /// Runs `change` and persists the result. If the write fails the
    /// in-memory record is restored, so memory never runs ahead of disk.
    fn apply<T>(&mut self, change: impl FnOnce(&mut BudgetRecord) -> T) -> Result<T, LedgerError> {
        let previous = self.record.clone();
        let outcome = change(&mut self.record);
        if let Err(err) = self.save() {
            self.record = previous;
            return Err(err);
        }
        Ok(outcome)
    }
}

fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
