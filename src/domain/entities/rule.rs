use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub price: String,
}

/// One editable (id, price) input pair in the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDraft {
    pub id: String,
    pub price: String,
}

impl RuleDraft {
    pub fn clear(&mut self) {
        self.id.clear();
        self.price.clear();
    }
}

/// Full set of rules as returned by one fetch, in the order the backend
/// returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<Rule>,
}

impl RuleSet {
    pub fn entries(&self) -> &[Rule] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn price_of(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|rule| rule.id == id)
            .map(|rule| rule.price.as_str())
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(entries: Vec<Rule>) -> Self {
        RuleSet { entries }
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of rule id to price")
            }

            fn visit_map<A>(self, mut access: A) -> Result<RuleSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, price)) = access.next_entry::<String, String>()? {
                    entries.push(Rule { id, price });
                }
                Ok(RuleSet { entries })
            }
        }

        deserializer.deserialize_map(RuleSetVisitor)
    }
}
