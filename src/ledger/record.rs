use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept when recovering a split written as binary floats.
const PERCENT_SCALE: u32 = 10;

/// One of the three allocation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Needs, Bucket::Wants, Bucket::Savings];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Needs => "needs",
            Bucket::Wants => "wants",
            Bucket::Savings => "savings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Needs => "Needs",
            Bucket::Wants => "Wants",
            Bucket::Savings => "Savings",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "needs" => Ok(Bucket::Needs),
            "wants" => Ok(Bucket::Wants),
            "savings" => Ok(Bucket::Savings),
            _ => Err(()),
        }
    }
}

/// The single persisted budget entity.
///
/// Key names are stable identifiers in the on-disk JSON. Missing keys fall back
/// to their default value, so records written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetRecord {
    pub week: u32,
    pub income: Decimal,
    pub balance_needs: Decimal,
    pub balance_wants: Decimal,
    pub balance_savings: Decimal,
    pub next_needs: Decimal,
    pub next_wants: Decimal,
    pub next_savings: Decimal,
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub percent_needs: Decimal,
    pub percent_wants: Decimal,
    pub percent_savings: Decimal,
}

impl Default for BudgetRecord {
    fn default() -> Self {
        let (needs, wants, savings) = Self::default_percentages();
        Self {
            week: 0,
            income: Decimal::ZERO,
            balance_needs: Decimal::ZERO,
            balance_wants: Decimal::ZERO,
            balance_savings: Decimal::ZERO,
            next_needs: Decimal::ZERO,
            next_wants: Decimal::ZERO,
            next_savings: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            total_income: Decimal::ZERO,
            percent_needs: needs,
            percent_wants: wants,
            percent_savings: savings,
        }
    }
}

impl BudgetRecord {
    /// 50/30/20 split.
    pub fn default_percentages() -> (Decimal, Decimal, Decimal) {
        (
            Decimal::new(5, 1),
            Decimal::new(3, 1),
            Decimal::new(2, 1),
        )
    }

    pub fn balance(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Needs => self.balance_needs,
            Bucket::Wants => self.balance_wants,
            Bucket::Savings => self.balance_savings,
        }
    }

    pub fn next(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Needs => self.next_needs,
            Bucket::Wants => self.next_wants,
            Bucket::Savings => self.next_savings,
        }
    }

    pub fn percent(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Needs => self.percent_needs,
            Bucket::Wants => self.percent_wants,
            Bucket::Savings => self.percent_savings,
        }
    }

    pub(crate) fn balance_mut(&mut self, bucket: Bucket) -> &mut Decimal {
        match bucket {
            Bucket::Needs => &mut self.balance_needs,
            Bucket::Wants => &mut self.balance_wants,
            Bucket::Savings => &mut self.balance_savings,
        }
    }

    pub(crate) fn next_mut(&mut self, bucket: Bucket) -> &mut Decimal {
        match bucket {
            Bucket::Needs => &mut self.next_needs,
            Bucket::Wants => &mut self.next_wants,
            Bucket::Savings => &mut self.next_savings,
        }
    }

    fn monetary_fields_mut(&mut self) -> [&mut Decimal; 9] {
        [
            &mut self.income,
            &mut self.balance_needs,
            &mut self.balance_wants,
            &mut self.balance_savings,
            &mut self.next_needs,
            &mut self.next_wants,
            &mut self.next_savings,
            &mut self.total_expenses,
            &mut self.total_income,
        ]
    }

    pub fn percentages_valid(&self) -> bool {
        let unit = Decimal::ZERO..=Decimal::ONE;
        Bucket::ALL
            .iter()
            .all(|bucket| unit.contains(&self.percent(*bucket)))
            && self.percent_needs + self.percent_wants + self.percent_savings == Decimal::ONE
    }

    /// Repairs values a hand-edited or stale file may carry, returning a note per repair.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        let mut clamped = false;
        for field in self.monetary_fields_mut() {
            if field.is_sign_negative() && !field.is_zero() {
                *field = Decimal::ZERO;
                clamped = true;
            }
        }
        if clamped {
            notes.push("negative amounts clamped to zero");
        }
        if !self.percentages_valid() && self.round_percentages() {
            notes.push("allocation percentages rounded to an exact split");
        }
        if !self.percentages_valid() {
            let (needs, wants, savings) = Self::default_percentages();
            self.percent_needs = needs;
            self.percent_wants = wants;
            self.percent_savings = savings;
            notes.push("allocation percentages restored to defaults");
        }
        notes
    }

    /// Older files stored the split as floats, e.g. `0.33299999999999996`.
    /// Rounding recovers the intended split when it then sums to exactly one.
    fn round_percentages(&mut self) -> bool {
        let [needs, wants, savings] = Bucket::ALL
            .map(|bucket| self.percent(bucket).round_dp(PERCENT_SCALE).normalize());
        let unit = Decimal::ZERO..=Decimal::ONE;
        let in_range = [needs, wants, savings]
            .iter()
            .all(|value| unit.contains(value));
        if !in_range || needs + wants + savings != Decimal::ONE {
            return false;
        }
        self.percent_needs = needs;
        self.percent_wants = wants;
        self.percent_savings = savings;
        true
    }
}
