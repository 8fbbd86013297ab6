use crate::core::constants::EPSILON;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type PartyId = i64;

/// A member whose net balance is not settled yet.
///
/// Positive balances are owed money (creditors), negative balances owe money
/// (debtors).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub balance: f64,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>, balance: f64) -> Self {
        Party {
            id,
            name: name.into(),
            balance,
        }
    }

    pub fn is_creditor(&self) -> bool {
        self.balance > EPSILON
    }

    pub fn is_debtor(&self) -> bool {
        self.balance < -EPSILON
    }

    pub fn is_settled(&self) -> bool {
        self.balance.abs() <= EPSILON
    }
}
