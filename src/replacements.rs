/// What to do with one component in [`Gurl::replace_components`](crate::Gurl)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Replacement<'a> {
    /// Leave the component as it is
    #[default]
    Keep,
    /// Substitute the given value
    Set(&'a str),
    /// Remove the component
    Clear,
}

/// Username and password replacements applied by a URL authority
///
/// Clearing a component wins over setting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Replacements<'a> {
    username: Option<&'a str>,
    clear_username: bool,
    password: Option<&'a str>,
    clear_password: bool,
}

impl<'a> Replacements<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the flat form `(username, clear_username, password, clear_password)`
    pub fn from_flags(
        username: Option<&'a str>,
        clear_username: bool,
        password: Option<&'a str>,
        clear_password: bool,
    ) -> Self {
        Self {
            username,
            clear_username,
            password,
            clear_password,
        }
    }

    #[must_use]
    pub fn set_username(mut self, username: &'a str) -> Self {
        self.username = Some(username);
        self
    }

    #[must_use]
    pub fn clear_username(mut self) -> Self {
        self.clear_username = true;
        self
    }

    #[must_use]
    pub fn set_password(mut self, password: &'a str) -> Self {
        self.password = Some(password);
        self
    }

    #[must_use]
    pub fn clear_password(mut self) -> Self {
        self.clear_password = true;
        self
    }

    pub fn username(&self) -> Replacement<'a> {
        resolve(self.username, self.clear_username)
    }

    pub fn password(&self) -> Replacement<'a> {
        resolve(self.password, self.clear_password)
    }
}

fn resolve(value: Option<&str>, clear: bool) -> Replacement<'_> {
    match (clear, value) {
        (true, _) => Replacement::Clear,
        (false, Some(value)) => Replacement::Set(value),
        (false, None) => Replacement::Keep,
    }
}
