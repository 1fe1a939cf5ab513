use std::fmt;

use common::{FieldRules, Rule, Validate};
use serde::{Deserialize, Deserializer, Serialize};

/// Account registration payload. Missing and `null` fields both bind as
/// empty so the rule table reports what is absent.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterAccountRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub nickname: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email_verification_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub img_verification_code: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Debug for RegisterAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAccountRequest")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("nickname", &self.nickname)
            .field("password", &"***")
            .field("email_verification_code", &self.email_verification_code)
            .field("img_verification_code", &self.img_verification_code)
            .finish()
    }
}

static REGISTER_ACCOUNT_RULES: [FieldRules<RegisterAccountRequest>; 5] = [
    FieldRules {
        field: "email",
        value: |r| r.email.as_str(),
        rules: &[Rule::Required],
        secret: false,
    },
    FieldRules {
        field: "nickname",
        value: |r| r.nickname.as_str(),
        rules: &[Rule::Required, Rule::Min(1), Rule::Max(20)],
        secret: false,
    },
    FieldRules {
        field: "password",
        value: |r| r.password.as_str(),
        rules: &[Rule::Required, Rule::Min(6), Rule::Max(20)],
        secret: true,
    },
    FieldRules {
        field: "email_verification_code",
        value: |r| r.email_verification_code.as_str(),
        rules: &[Rule::Required],
        secret: false,
    },
    FieldRules {
        field: "img_verification_code",
        value: |r| r.img_verification_code.as_str(),
        rules: &[Rule::Required],
        secret: false,
    },
];

impl Validate for RegisterAccountRequest {
    fn rule_table() -> &'static [FieldRules<Self>] {
        &REGISTER_ACCOUNT_RULES
    }
}

/// Public view of an accepted registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    pub email: String,
    pub phone: Option<String>,
    pub nickname: String,
}

impl From<&RegisterAccountRequest> for RegisteredAccount {
    fn from(req: &RegisterAccountRequest) -> Self {
        Self {
            email: req.email.clone(),
            phone: (!req.phone.is_empty()).then(|| req.phone.clone()),
            nickname: req.nickname.clone(),
        }
    }
}
