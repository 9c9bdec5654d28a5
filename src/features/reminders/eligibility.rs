//! Reminder eligibility
//!
//! A row is owed a reminder when it has a reminder date that is today or
//! earlier and its payment status reads "no". Everything else is skipped.

use chrono::NaiveDate;

use crate::features::ledger::InvoiceRecord;

/// Why a row was not reminded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingReminderDate,
    MissingPaymentStatus,
    /// Reminder date is after today
    NotYetDue,
    /// Payment status is anything other than "no"
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Skip(SkipReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Trim and lowercase a status cell
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Classify one row against `today`. Pure, no side effects.
pub fn classify(record: &InvoiceRecord, today: NaiveDate) -> Eligibility {
    let Some(reminder_date) = record.reminder_date else {
        return Eligibility::Skip(SkipReason::MissingReminderDate);
    };
    let Some(has_paid) = record.has_paid.as_deref() else {
        return Eligibility::Skip(SkipReason::MissingPaymentStatus);
    };

    if today < reminder_date {
        Eligibility::Skip(SkipReason::NotYetDue)
    } else if normalize(has_paid) != "no" {
        Eligibility::Skip(SkipReason::Settled)
    } else {
        Eligibility::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
    }

    fn record(reminder_date: Option<NaiveDate>, has_paid: Option<&str>) -> InvoiceRecord {
        InvoiceRecord {
            invoice_no: "INV-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            amount: "100".to_string(),
            due_date: Some(today()),
            reminder_date,
            has_paid: has_paid.map(String::from),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  No "), "no");
        assert_eq!(normalize("YES"), "yes");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_missing_fields_skip() {
        assert_eq!(
            classify(&record(None, Some("no")), today()),
            Eligibility::Skip(SkipReason::MissingReminderDate)
        );
        assert_eq!(
            classify(&record(Some(today()), None), today()),
            Eligibility::Skip(SkipReason::MissingPaymentStatus)
        );
        assert_eq!(
            classify(&record(None, None), today()),
            Eligibility::Skip(SkipReason::MissingReminderDate)
        );
    }

    #[test]
    fn test_paid_or_other_status_skip() {
        let yesterday = today() - Duration::days(1);
        for status in ["Yes", " YES ", "partial", "n", "nope"] {
            assert_eq!(
                classify(&record(Some(yesterday), Some(status)), today()),
                Eligibility::Skip(SkipReason::Settled),
                "status {status:?} should skip"
            );
        }
    }

    #[test]
    fn test_unpaid_status_variants_eligible() {
        let yesterday = today() - Duration::days(1);
        for status in ["no", "No", " NO ", "\tno\n"] {
            assert!(
                classify(&record(Some(yesterday), Some(status)), today()).is_eligible(),
                "status {status:?} should be eligible"
            );
        }
    }

    #[test]
    fn test_reminder_date_today_is_eligible() {
        assert_eq!(
            classify(&record(Some(today()), Some("no")), today()),
            Eligibility::Eligible
        );
    }

    #[test]
    fn test_reminder_date_tomorrow_not_eligible() {
        let tomorrow = today() + Duration::days(1);
        assert_eq!(
            classify(&record(Some(tomorrow), Some("no")), today()),
            Eligibility::Skip(SkipReason::NotYetDue)
        );
    }

    #[test]
    fn test_long_overdue_is_eligible() {
        let last_year = today() - Duration::days(365);
        assert!(classify(&record(Some(last_year), Some("no")), today()).is_eligible());
    }
}
