//! Server account models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A MySQL user account, mirroring `mysql.user`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct UserInfo {
    /// Account user name.
    pub user: String,
    /// Host the account may connect from.
    pub host: String,
    /// `Y` if the account is locked.
    pub account_locked: String,
    /// `Y` if the password has expired.
    pub password_expired: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_catalog_field_names() {
        let user = UserInfo {
            user: "root".into(),
            host: "localhost".into(),
            account_locked: "N".into(),
            password_expired: "N".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user"], "root");
        assert_eq!(json["host"], "localhost");
        assert_eq!(json["account_locked"], "N");
        assert_eq!(json["password_expired"], "N");
    }
}
