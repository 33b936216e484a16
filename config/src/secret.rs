use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A secret string that supports serde in both directions.
///
/// [`SecretString`] deliberately does not implement [`Serialize`];
/// configuration values still need to round-trip through serde, so this
/// wrapper exposes the secret only at serialization time. Debug output stays
/// redacted.
#[derive(Debug, Clone)]
pub struct SerializableSecretString(SecretString);

impl ExposeSecret<String> for SerializableSecretString {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

impl From<String> for SerializableSecretString {
    fn from(value: String) -> Self {
        Self(SecretString::new(value))
    }
}

impl From<SecretString> for SerializableSecretString {
    fn from(value: SecretString) -> Self {
        Self(value)
    }
}

impl Serialize for SerializableSecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl<'de> Deserialize<'de> for SerializableSecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SerializableSecretString::from("hunter2".to_string());
        let rendered = format!("{secret:?}");

        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn exposes_the_wrapped_value() {
        let secret = SerializableSecretString::from("hunter2".to_string());

        assert_eq!(secret.expose_secret(), "hunter2");
    }
}
