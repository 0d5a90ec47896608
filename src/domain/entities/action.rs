use crate::domain::entities::rule::Rule;

/// A mutating action armed behind a confirmation dialog. Cleared on decline
/// or on the success path of the dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Edit {
        rule: Rule,
        new_price: String,
        overwrite: bool,
    },
    Delete {
        rule: Rule,
    },
}

impl PendingAction {
    pub fn message(&self) -> String {
        match self {
            PendingAction::Edit {
                rule,
                new_price,
                overwrite: false,
            } => format!(
                "Change ID {} from PRICE {} to PRICE {}?",
                rule.id, rule.price, new_price
            ),
            PendingAction::Edit {
                rule,
                new_price,
                overwrite: true,
            } => format!(
                "A rule with this ID already exists! Overwrite ID {} from PRICE {} to PRICE {}?",
                rule.id, rule.price, new_price
            ),
            PendingAction::Delete { rule } => {
                format!("Delete ID {} with PRICE {}?", rule.id, rule.price)
            }
        }
    }
}
