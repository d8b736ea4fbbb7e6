//! Common types shared across the support-bot.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ClassifyError;

/// Application error type.
pub type Err = anyhow::Error;
/// Application result type.
pub type Res<T> = Result<T, Err>;
/// Application result with no value.
pub type Void = Res<()>;

/// The support categories a request can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Charges, invoices, subscriptions, and refunds.
    #[serde(rename = "Billing & Payments Issue")]
    BillingAndPayments,
    /// Login, security, and personal account settings.
    #[serde(rename = "Account & Access Issue")]
    AccountAndAccess,
    /// Product malfunctions, errors, and troubleshooting.
    #[serde(rename = "Technical Support Issue")]
    TechnicalSupport,
    /// Anything too vague to place.
    #[serde(rename = "Needs Clarification")]
    NeedsClarification,
}

impl Category {
    /// Every category, in the order they are presented to the model.
    pub const ALL: [Category; 4] = [Category::BillingAndPayments, Category::AccountAndAccess, Category::TechnicalSupport, Category::NeedsClarification];

    /// The exact label used on the wire and in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::BillingAndPayments => "Billing & Payments Issue",
            Category::AccountAndAccess => "Account & Access Issue",
            Category::TechnicalSupport => "Technical Support Issue",
            Category::NeedsClarification => "Needs Clarification",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ClassifyError;

    /// Exact, case-sensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| ClassifyError::CategoryMismatch(s.to_string()))
    }
}

/// Raw structured reply from the model, before the category is validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReply {
    /// Category label as returned by the model.
    pub category: String,
}

/// Severity of a rendered notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral guidance.
    Info,
    /// The step completed.
    Success,
    /// Recoverable input problem.
    Warning,
    /// The step failed.
    Error,
}

/// A message for the form surface to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How the notice should be presented.
    pub level: NoticeLevel,
    /// Text to show.
    pub text: String,
}

impl Notice {
    /// Create an info notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    /// Create a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    /// Create a warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    /// Create an error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_from_str_is_exact() {
        let err = "billing & payments issue".parse::<Category>().unwrap_err();
        assert_eq!(err, ClassifyError::CategoryMismatch("billing & payments issue".to_string()));

        assert!(" Needs Clarification".parse::<Category>().is_err());
        assert!("Billing".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_labels() {
        let json = serde_json::to_string(&Category::AccountAndAccess).unwrap();
        assert_eq!(json, "\"Account & Access Issue\"");
    }
}
