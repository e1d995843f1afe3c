//! Actions for the account reducer
//!
//! [`Action`] is the closed set of transitions the reducer understands.
//! [`TaggedAction`] is the loose `{type, payload}` form that arrives from
//! text and JSON; resolving it is where unknown kinds and malformed amounts
//! are caught.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::amount::{coerce_amount, Amount, CoercionPolicy};
use crate::error::{BankError, Result};

/// A requested account transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "TaggedAction")]
pub enum Action {
    OpenAccount,
    Deposit(Amount),
    Withdraw(Amount),
    RequestLoan(Amount),
    PayLoan,
    CloseAccount,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::OpenAccount => ActionKind::OpenAccount,
            Action::Deposit(_) => ActionKind::Deposit,
            Action::Withdraw(_) => ActionKind::Withdraw,
            Action::RequestLoan(_) => ActionKind::RequestLoan,
            Action::PayLoan => ActionKind::PayLoan,
            Action::CloseAccount => ActionKind::CloseAccount,
        }
    }

    pub fn amount(&self) -> Option<Amount> {
        match self {
            Action::Deposit(amount) | Action::Withdraw(amount) | Action::RequestLoan(amount) => {
                Some(*amount)
            }
            Action::OpenAccount | Action::PayLoan | Action::CloseAccount => None,
        }
    }

    /// Build an action of the given kind; `amount` is ignored by kinds without a payload
    pub fn from_kind(kind: ActionKind, amount: Amount) -> Self {
        match kind {
            ActionKind::OpenAccount => Action::OpenAccount,
            ActionKind::Deposit => Action::Deposit(amount),
            ActionKind::Withdraw => Action::Withdraw(amount),
            ActionKind::RequestLoan => Action::RequestLoan(amount),
            ActionKind::PayLoan => Action::PayLoan,
            ActionKind::CloseAccount => Action::CloseAccount,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{}({})", self.kind(), amount),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Action kind without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    OpenAccount,
    Deposit,
    Withdraw,
    RequestLoan,
    PayLoan,
    CloseAccount,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::OpenAccount,
        ActionKind::Deposit,
        ActionKind::Withdraw,
        ActionKind::RequestLoan,
        ActionKind::PayLoan,
        ActionKind::CloseAccount,
    ];

    /// Canonical wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::OpenAccount => "openAccount",
            ActionKind::Deposit => "deposit",
            ActionKind::Withdraw => "withdraw",
            ActionKind::RequestLoan => "requestLoan",
            ActionKind::PayLoan => "payLoan",
            ActionKind::CloseAccount => "closeAccount",
        }
    }

    pub fn takes_payload(&self) -> bool {
        matches!(
            self,
            ActionKind::Deposit | ActionKind::Withdraw | ActionKind::RequestLoan
        )
    }
}

impl FromStr for ActionKind {
    type Err = BankError;

    /// Accepts the canonical tag in any case, with or without `-`/`_`
    /// separators, plus the short forms `open` and `close`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "open" => return Ok(ActionKind::OpenAccount),
            "close" => return Ok(ActionKind::CloseAccount),
            _ => {}
        }

        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.tag().to_lowercase() == normalized)
            .ok_or_else(|| BankError::UnknownAction(s.to_string()))
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// String-tagged action as it arrives from text or JSON
///
/// JSON shape: `{"type": "deposit", "payload": "200"}`. The payload may also
/// be a JSON number and is omitted for kinds that take none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedAction {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(
        default,
        deserialize_with = "deserialize_payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<String>,
}

impl TaggedAction {
    pub fn new(kind: impl Into<String>, payload: Option<String>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Parse one line of a script
    ///
    /// Accepts `deposit 200`, `deposit:200`, a bare kind like `payLoan`, or a
    /// JSON object. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if line.starts_with('{') {
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| BankError::InvalidInput(format!("{}: {}", line, e)));
        }

        let (kind, payload) = match line.split_once(|c: char| c == ':' || c.is_whitespace()) {
            Some((kind, rest)) => {
                let rest = rest.trim();
                (kind, (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (line, None),
        };

        Ok(Some(Self::new(kind, payload)))
    }

    /// Resolve into a typed [`Action`], coercing the payload under `policy`
    ///
    /// A missing payload coerces like empty text, i.e. to zero.
    pub fn resolve(&self, policy: CoercionPolicy) -> Result<Action> {
        let kind: ActionKind = self.kind.parse()?;
        let amount = if kind.takes_payload() {
            coerce_amount(self.payload.as_deref().unwrap_or(""), policy)?
        } else {
            Amount::ZERO
        };
        Ok(Action::from_kind(kind, amount))
    }
}

impl From<Action> for TaggedAction {
    fn from(action: Action) -> Self {
        Self::new(
            action.kind().tag(),
            action.amount().map(|amount| amount.to_string()),
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PayloadRepr {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_payload<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<PayloadRepr>::deserialize(deserializer)?;
    Ok(repr.map(|repr| match repr {
        PayloadRepr::Text(text) => text,
        PayloadRepr::Number(number) => number.to_string(),
    }))
}
