//! Auth feature reducer.
//!
//! Handles form editing, local validation, and login/register results.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tdx_core::api::{ApiResult, validate_login, validate_registration};

use super::state::{AuthMode, AuthState};
use crate::effects::UiEffect;

pub fn handle_auth_key(auth: &mut AuthState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('r') if ctrl => {
            let next = match auth.mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
            auth.switch_mode(next);
            vec![]
        }
        KeyCode::Esc => match auth.mode {
            AuthMode::Register => {
                auth.switch_mode(AuthMode::Login);
                vec![]
            }
            AuthMode::Login => vec![UiEffect::Quit],
        },
        KeyCode::Tab | KeyCode::Down => {
            auth.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            auth.focus_prev();
            vec![]
        }
        KeyCode::Enter => submit(auth),
        _ => {
            auth.focused_mut().handle_key(key);
            vec![]
        }
    }
}

fn submit(auth: &mut AuthState) -> Vec<UiEffect> {
    auth.notice = None;
    let username = auth.username.value().trim().to_string();
    let password = auth.password.value().to_string();

    match auth.mode {
        AuthMode::Login => {
            if let Err(err) = validate_login(&username, &password) {
                auth.error = Some(err.to_string());
                return vec![];
            }
            auth.error = None;
            vec![UiEffect::Login { username, password }]
        }
        AuthMode::Register => {
            let email = auth.email.value().trim().to_string();
            if let Err(err) = validate_registration(&email, &username, &password) {
                auth.error = Some(err.to_string());
                return vec![];
            }
            auth.error = None;
            vec![UiEffect::Register {
                email,
                username,
                password,
            }]
        }
    }
}

/// Applies a login outcome. Returns true when the session was established.
pub fn handle_login_result(auth: &mut AuthState, result: ApiResult<()>) -> bool {
    match result {
        Ok(()) => {
            auth.username.clear();
            auth.password.clear();
            auth.error = None;
            true
        }
        Err(err) => {
            auth.error = Some(err.to_string());
            false
        }
    }
}

pub fn handle_register_result(auth: &mut AuthState, result: ApiResult<()>) {
    match result {
        Ok(()) => auth.registered(),
        Err(err) => auth.error = Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use tdx_core::api::ApiError;

    use super::*;
    use crate::features::auth::AuthField;

    fn press(auth: &mut AuthState, code: KeyCode) -> Vec<UiEffect> {
        handle_auth_key(auth, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(auth: &mut AuthState, text: &str) {
        for c in text.chars() {
            press(auth, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_login_submit_emits_effect() {
        let mut auth = AuthState::login();
        type_text(&mut auth, "alice");
        press(&mut auth, KeyCode::Tab);
        type_text(&mut auth, "pw");

        let effects = press(&mut auth, KeyCode::Enter);
        assert_eq!(
            effects,
            vec![UiEffect::Login {
                username: "alice".to_string(),
                password: "pw".to_string()
            }]
        );
    }

    #[test]
    fn test_register_with_missing_field_blocks_request() {
        let mut auth = AuthState::login();
        handle_auth_key(
            &mut auth,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(auth.mode, AuthMode::Register);
        assert_eq!(auth.focus, AuthField::Email);

        press(&mut auth, KeyCode::Tab);
        type_text(&mut auth, "alice");

        let effects = press(&mut auth, KeyCode::Enter);
        assert!(effects.is_empty());
        assert_eq!(
            auth.error.as_deref(),
            Some("Email, Username, and Password are required.")
        );
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut auth = AuthState::login();
        press(&mut auth, KeyCode::Tab);
        assert_eq!(auth.focus, AuthField::Password);
        press(&mut auth, KeyCode::Tab);
        assert_eq!(auth.focus, AuthField::Username);
        press(&mut auth, KeyCode::BackTab);
        assert_eq!(auth.focus, AuthField::Password);
    }

    #[test]
    fn test_register_success_returns_to_login_with_notice() {
        let mut auth = AuthState::login();
        auth.switch_mode(AuthMode::Register);
        auth.email.set("a@b.c");
        auth.username.set("alice");
        auth.password.set("pw");

        handle_register_result(&mut auth, Ok(()));

        assert_eq!(auth.mode, AuthMode::Login);
        assert_eq!(auth.username.value(), "alice");
        assert!(auth.password.is_empty());
        assert_eq!(
            auth.notice.as_deref(),
            Some("Registration successful! Please login.")
        );
    }

    #[test]
    fn test_login_failure_keeps_form() {
        let mut auth = AuthState::login();
        auth.username.set("alice");
        let ok = handle_login_result(
            &mut auth,
            Err(ApiError::RequestFailed(
                "Login failed. Please check your credentials.".to_string(),
            )),
        );
        assert!(!ok);
        assert_eq!(auth.username.value(), "alice");
        assert_eq!(
            auth.error.as_deref(),
            Some("Login failed. Please check your credentials.")
        );
    }

    #[test]
    fn test_esc_on_login_quits() {
        let mut auth = AuthState::login();
        assert_eq!(press(&mut auth, KeyCode::Esc), vec![UiEffect::Quit]);
    }
}
