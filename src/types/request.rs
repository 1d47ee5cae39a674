use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct RegisterData {
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) password: String,
}

/// Form body of `POST /token`; `username` carries the email.
#[derive(Deserialize)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NewCar {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) car_type: String,
    pub(crate) company: String,
    pub(crate) dealer: String,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    #[serde(default)]
    pub(crate) images: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct CarUpdate {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) car_type: Option<String>,
    pub(crate) company: Option<String>,
    pub(crate) dealer: Option<String>,
    pub(crate) tags: Option<Vec<String>>,
    pub(crate) images: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CarQuery {
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) skip: u32,
    /// Zero means no limit.
    #[serde(default = "default_limit")]
    pub(crate) limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl Default for CarQuery {
    fn default() -> Self {
        Self {
            search: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}
