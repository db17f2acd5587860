use serde::{Deserialize, Serialize};

/// Роли пользователей. Единственная таблица рангов во всей системе:
/// все проверки доступа идут через `rank()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Operator,
    Manager,
    Admin,
}

impl Role {
    /// Числовой ранг (больше = больше прав).
    pub fn rank(&self) -> u8 {
        match self {
            Role::Client => 1,
            Role::Operator => 2,
            Role::Manager => 3,
            Role::Admin => 4,
        }
    }

    /// Оператор и выше.
    pub fn is_staff(&self) -> bool {
        self.rank() >= Role::Operator.rank()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Operator => "operator",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "client" => Some(Role::Client),
            "operator" => Some(Role::Operator),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Role::Client < Role::Operator);
        assert!(Role::Operator < Role::Manager);
        assert!(Role::Manager < Role::Admin);
        assert!(Role::Admin >= Role::Manager);
    }

    #[test]
    fn test_staff_threshold() {
        assert!(!Role::Client.is_staff());
        assert!(Role::Operator.is_staff());
        assert!(Role::Manager.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn test_code_round_trip() {
        for role in [Role::Client, Role::Operator, Role::Manager, Role::Admin] {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
        assert_eq!(Role::from_code("supervisor"), None);
    }
}
