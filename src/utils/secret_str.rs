use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Test if the SecretString does not reveal the secret
///
/// ```compile_fail
/// use tablegate::utils::secret_str::SecretString;
/// let x: SecretString = "".into();
/// println!("{:?}", x);
/// ```
///
/// ```compile_fail
/// use tablegate::utils::secret_str::SecretString;
/// let x: SecretString = "".into();
/// println!("{}", x);
/// ```
#[derive(Clone, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    /// ```
    /// use tablegate::utils::secret_str::SecretString;
    ///
    /// let x: SecretString = "abc123".into();
    /// assert_eq!(x.reveal_secret(), "abc123");
    /// ```
    pub fn reveal_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, not bytes.
    ///
    /// ```
    /// use tablegate::utils::secret_str::SecretString;
    ///
    /// let x: SecretString = "ąčęėį".into();
    /// assert_eq!(x.char_len(), 5);
    /// ```
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for SecretString {
    fn from(secret: &str) -> Self {
        SecretString(secret.to_string())
    }
}

impl From<String> for SecretString {
    fn from(secret: String) -> Self {
        SecretString(secret)
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}
