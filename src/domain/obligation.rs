use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A debt or income stream. Debts and incomes share one shape and differ only
/// in which collection they live in and the sign of their balance effect.
///
/// Field names and value shapes mirror the JSON the mobile app has always
/// persisted, so existing stored data round-trips untouched. The scheduling
/// fields stay raw strings on the wire (the forms write strings, older data
/// sometimes numbers); typed views live on the accessor methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Obligation {
    pub id: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "accountId", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(rename = "recurringFrequency", skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<String>,
    #[serde(rename = "recurringDay", skip_serializing_if = "Option::is_none")]
    pub recurring_day: Option<String>,
    #[serde(
        rename = "recurringDayOfMonth",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_string_or_number"
    )]
    pub recurring_day_of_month: Option<String>,
    #[serde(
        rename = "recurringMonth",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_string_or_number"
    )]
    pub recurring_month: Option<String>,
}

impl Obligation {
    /// Creates a one-time entry that falls due at a fixed instant.
    pub fn one_time(
        description: impl Into<String>,
        amount: f64,
        account_id: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            account_id: Some(account_id.into()),
            kind: Some(ObligationKind::OneTime.as_str().to_owned()),
            due_date: Some(due_date.to_rfc3339()),
            ..Self::default()
        }
    }

    /// Creates a recurring entry; combine with the `with_*` schedule builders.
    pub fn recurring(
        description: impl Into<String>,
        amount: f64,
        account_id: impl Into<String>,
        frequency: RecurringFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            account_id: Some(account_id.into()),
            kind: Some(ObligationKind::Recurring.as_str().to_owned()),
            recurring_frequency: Some(frequency.as_str().to_owned()),
            ..Self::default()
        }
    }

    /// Creates a manual entry, which the processing pass never touches.
    pub fn manual(
        description: impl Into<String>,
        amount: f64,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            account_id: Some(account_id.into()),
            kind: Some(ObligationKind::Manual.as_str().to_owned()),
            ..Self::default()
        }
    }

    /// Sets the weekday a weekly entry fires on (lowercase full name,
    /// e.g. `"monday"`).
    pub fn with_weekday(mut self, day: impl Into<String>) -> Self {
        self.recurring_day = Some(day.into());
        self
    }

    /// Sets the day of month (1–31) a monthly or yearly entry fires on.
    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.recurring_day_of_month = Some(day.to_string());
        self
    }

    /// Sets the month (1–12) a yearly entry fires in.
    pub fn with_month(mut self, month: u32) -> Self {
        self.recurring_month = Some(month.to_string());
        self
    }

    /// Typed view of the `type` field. Unknown or missing values classify as
    /// [`ObligationKind::Other`] and are left alone by the processing pass.
    pub fn kind(&self) -> ObligationKind {
        match self.kind.as_deref() {
            Some("one-time") => ObligationKind::OneTime,
            Some("recurring") => ObligationKind::Recurring,
            Some("manual") => ObligationKind::Manual,
            _ => ObligationKind::Other,
        }
    }

    /// Typed view of `recurringFrequency`; anything unrecognized is `None`.
    pub fn frequency(&self) -> Option<RecurringFrequency> {
        match self.recurring_frequency.as_deref() {
            Some("weekly") => Some(RecurringFrequency::Weekly),
            Some("monthly") => Some(RecurringFrequency::Monthly),
            Some("yearly") => Some(RecurringFrequency::Yearly),
            _ => None,
        }
    }

    /// Parses `dueDate` as an RFC 3339 instant. Malformed or missing dates
    /// yield `None`, which the processing pass treats as not yet due.
    pub fn due_instant(&self) -> Option<DateTime<Utc>> {
        self.due_date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Numeric `recurringDayOfMonth`; non-numeric values yield `None` and
    /// therefore never match a calendar date.
    pub fn recurring_day_of_month(&self) -> Option<u32> {
        self.recurring_day_of_month
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }

    /// Numeric `recurringMonth` (1–12), with the same lenient parse.
    pub fn recurring_month(&self) -> Option<u32> {
        self.recurring_month
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }
}

/// Classifies how an obligation is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObligationKind {
    /// Fires at most once, at or after `dueDate`, then leaves its collection.
    OneTime,
    /// Fires whenever the calendar matches; never removed automatically.
    Recurring,
    /// Settled by hand in the UI; never auto-processed.
    Manual,
    /// Unrecognized `type` value; retained untouched.
    Other,
}

impl ObligationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObligationKind::OneTime => "one-time",
            ObligationKind::Recurring => "recurring",
            ObligationKind::Manual => "manual",
            ObligationKind::Other => "other",
        }
    }
}

/// Supported recurrence cadences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            RecurringFrequency::Weekly => "weekly",
            RecurringFrequency::Monthly => "monthly",
            RecurringFrequency::Yearly => "yearly",
        }
    }
}

/// Older app builds stored day/month schedule fields as JSON numbers; newer
/// builds store strings. Accept both, normalizing to the string form.
fn de_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_json_round_trips_with_original_field_names() {
        let raw = r#"{
            "id": "debt-1",
            "description": "Car payment",
            "amount": 250.5,
            "accountId": "a1",
            "type": "recurring",
            "recurringFrequency": "monthly",
            "recurringDayOfMonth": "15"
        }"#;
        let parsed: Obligation = serde_json::from_str(raw).expect("legacy debt parses");
        assert_eq!(parsed.kind(), ObligationKind::Recurring);
        assert_eq!(parsed.frequency(), Some(RecurringFrequency::Monthly));
        assert_eq!(parsed.recurring_day_of_month(), Some(15));

        let serialized = serde_json::to_string(&parsed).expect("serialize");
        assert!(serialized.contains("\"accountId\":\"a1\""));
        assert!(serialized.contains("\"type\":\"recurring\""));
        assert!(serialized.contains("\"recurringDayOfMonth\":\"15\""));
        assert!(!serialized.contains("account_id"));
    }

    #[test]
    fn numeric_schedule_fields_are_accepted() {
        let raw = r#"{"id":"d2","amount":10,"recurringDayOfMonth":31,"recurringMonth":12}"#;
        let parsed: Obligation = serde_json::from_str(raw).expect("numeric fields parse");
        assert_eq!(parsed.recurring_day_of_month(), Some(31));
        assert_eq!(parsed.recurring_month(), Some(12));
    }

    #[test]
    fn unknown_type_classifies_as_other() {
        let entry = Obligation {
            kind: Some("installment".into()),
            ..Obligation::default()
        };
        assert_eq!(entry.kind(), ObligationKind::Other);
        assert_eq!(entry.frequency(), None);
    }

    #[test]
    fn malformed_due_date_is_never_due() {
        let entry = Obligation {
            due_date: Some("not-a-date".into()),
            ..Obligation::default()
        };
        assert_eq!(entry.due_instant(), None);
    }

    #[test]
    fn non_numeric_day_of_month_parses_to_none() {
        let entry = Obligation::recurring("rent", 900.0, "a1", RecurringFrequency::Monthly)
            .with_day_of_month(1);
        assert_eq!(entry.recurring_day_of_month(), Some(1));

        let broken = Obligation {
            recurring_day_of_month: Some("first".into()),
            ..entry
        };
        assert_eq!(broken.recurring_day_of_month(), None);
    }
}
