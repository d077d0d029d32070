use uuid::Uuid;

use crate::{Error, UserId, STUB_UUID};

pub const BCRYPT_HASH_COST: u32 = 10;

/// Body of the login call. `device` is a free-form label shown in the
/// session list ("firefox on laptop").
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NewSession {
    pub email: String,
    pub password: String,
    pub device: String,
}

impl NewSession {
    pub fn new(email: String, password: String, device: String) -> NewSession {
        NewSession {
            email,
            password,
            device,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.email)?;
        crate::validate_string(&self.password)?;
        crate::validate_string(&self.device)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct AuthToken(pub Uuid);

impl AuthToken {
    pub fn stub() -> AuthToken {
        AuthToken(STUB_UUID)
    }
}

/// Admin-side user creation. The password never travels as cleartext:
/// `new` hashes it locally and only the hash is sent.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NewUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub initial_password_hash: String,
}

impl NewUser {
    pub fn new(id: UserId, username: String, email: String, password: &str) -> NewUser {
        NewUser {
            id,
            username,
            email,
            initial_password_hash: bcrypt::hash(password, BCRYPT_HASH_COST)
                .expect("failed hashing password"),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.email)?;
        crate::validate_string(&self.initial_password_hash)?;
        if self.username.is_empty()
            || !self
                .username
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::InvalidUsername(self.username.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            id: UserId::stub(),
            username: String::from(name),
            email: String::from("a@example.org"),
            initial_password_hash: String::from("$2b$fake"),
        }
    }

    #[test]
    fn username_validation() {
        assert_eq!(new_user("ada_l-42").validate(), Ok(()));
        assert_eq!(
            new_user("ada lovelace").validate(),
            Err(Error::InvalidUsername(String::from("ada lovelace")))
        );
        assert_eq!(
            new_user("").validate(),
            Err(Error::InvalidUsername(String::new()))
        );
    }
}
