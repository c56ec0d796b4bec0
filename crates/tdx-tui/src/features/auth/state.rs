use crate::common::TextField;

/// Which signed-out screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Username,
    Password,
}

/// Form state for the login and register screens.
///
/// Credentials live only here and are never persisted.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub mode: AuthMode,
    pub email: TextField,
    pub username: TextField,
    pub password: TextField,
    pub focus: AuthField,
    /// Inline error (red).
    pub error: Option<String>,
    /// Inline confirmation (green), e.g. after registering.
    pub notice: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::login()
    }
}

impl AuthState {
    /// Empty login form.
    pub fn login() -> Self {
        Self {
            mode: AuthMode::Login,
            email: TextField::new(),
            username: TextField::new(),
            password: TextField::masked(),
            focus: AuthField::Username,
            error: None,
            notice: None,
        }
    }

    /// Login form showing an error, used when a session is rejected.
    pub fn login_with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::login()
        }
    }

    pub fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Register => &[AuthField::Email, AuthField::Username, AuthField::Password],
        }
    }

    pub fn field(&self, field: AuthField) -> &TextField {
        match field {
            AuthField::Email => &self.email,
            AuthField::Username => &self.username,
            AuthField::Password => &self.password,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.cycle_focus(self.fields().len() - 1);
    }

    fn cycle_focus(&mut self, step: usize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + step) % fields.len()];
    }

    /// Switches between login and register, keeping typed values.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = self.fields()[0];
        self.error = None;
        self.notice = None;
    }

    /// Returns to the login form after a successful registration.
    pub fn registered(&mut self) {
        self.switch_mode(AuthMode::Login);
        self.email.clear();
        self.password.clear();
        self.notice = Some("Registration successful! Please login.".to_string());
    }
}
