//! 订单状态机
//!
//! 封闭状态集 + 穷举流转表。任何不在表内的流转（包括回退，如
//! shipped → paid）一律拒绝；`completed` / `cancelled` 为终态。
//!
//! | 当前 | 允许流转到 |
//! |------|-----------|
//! | pending | paid, cancelled |
//! | paid | shipped, cancelled |
//! | shipped | completed |
//! | completed | - |
//! | cancelled | - |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status — the only values ever persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The transition table
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending => {
                matches!(target, OrderStatus::Paid | OrderStatus::Cancelled)
            }
            OrderStatus::Paid => {
                matches!(target, OrderStatus::Shipped | OrderStatus::Cancelled)
            }
            OrderStatus::Shipped => matches!(target, OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => false,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn allowed_transitions_match_the_table() {
        let allowed = [
            (OrderStatus::Pending, OrderStatus::Paid),
            (OrderStatus::Pending, OrderStatus::Cancelled),
            (OrderStatus::Paid, OrderStatus::Shipped),
            (OrderStatus::Paid, OrderStatus::Cancelled),
            (OrderStatus::Shipped, OrderStatus::Completed),
        ];

        for from in ALL {
            for to in ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {} should be {}",
                    from,
                    to,
                    expected
                );
            }
        }
    }

    #[test]
    fn backwards_transitions_are_rejected() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Paid));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Shipped));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for to in ALL {
                assert!(!terminal.can_transition_to(to));
            }
        }
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn parse_round_trips() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
        // 大小写敏感：状态值是协议的一部分
        assert!("Pending".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }
}
