//! Canned replies for each category.

use crate::base::types::Category;

/// Reply shown when the request is too vague to classify.
pub const CLARIFICATION_MESSAGE: &str = "Please provide more details.";

/// Reply shown for a label outside the known categories.
pub const UNRECOGNIZED_MESSAGE: &str = "Unable to process your request.";

/// What to show the user after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message shown to the user.
    pub text: String,
    /// Whether the contact form should be shown next.
    pub show_contact_form: bool,
}

/// Map a category to its reply.
pub fn respond(category: Category) -> Reply {
    match category {
        Category::BillingAndPayments | Category::AccountAndAccess | Category::TechnicalSupport => Reply {
            text: format!("Thank you for reaching out! Your issue has been classified under '{category}'. Please enter your Name and Phone Number to proceed."),
            show_contact_form: true,
        },
        Category::NeedsClarification => Reply {
            text: CLARIFICATION_MESSAGE.to_string(),
            show_contact_form: false,
        },
    }
}

/// Map a raw label to its reply, falling back to a generic failure for unknown labels.
pub fn respond_to_label(label: &str) -> Reply {
    match label.parse::<Category>() {
        Ok(category) => respond(category),
        Err(_) => Reply {
            text: UNRECOGNIZED_MESSAGE.to_string(),
            show_contact_form: false,
        },
    }
}
