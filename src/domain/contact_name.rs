//! src/domain/contact_name.rs

#[derive(Debug, Clone)]
pub struct ContactName(String);

impl ContactName {
    /// Any non-empty string is a name. The value is kept as typed.
    pub fn parse(s: String) -> Result<ContactName, String> {
        if s.is_empty() {
            return Err("Name is required".into());
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
