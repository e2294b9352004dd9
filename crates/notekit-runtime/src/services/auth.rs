use super::{ServiceContext, decode};
use crate::navigation::Route;
use crate::transport::{ApiRequest, RequestOptions};
use crate::{Error, Result};
use notekit_types::{ApiResponse, UserProfile};
use serde::Deserialize;
use serde_json::json;

const PHONE_LENGTH: usize = 11;
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
    pub agreed: bool,
}

impl LoginForm {
    pub fn new(phone: impl Into<String>, password: impl Into<String>, agreed: bool) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
            agreed,
        }
    }

    /// First reason the form cannot be sent, if any.
    pub fn problem(&self) -> Option<&'static str> {
        if self.phone.chars().count() != PHONE_LENGTH {
            Some("Enter an 11-digit phone number")
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            Some("Password must be at least 6 characters")
        } else if !self.agreed {
            Some("Please accept the user agreement")
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.problem().is_none()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoginData {
    user: Option<UserProfile>,
    token: Option<String>,
}

pub struct AuthService {
    ctx: ServiceContext,
}

impl AuthService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Option<UserProfile>> {
        if let Some(problem) = form.problem() {
            self.ctx.notify(problem);
            return Err(Error::InvalidInput(problem.to_string()));
        }

        let request = ApiRequest::post("/auth/login")
            .payload(json!({ "login": form.phone, "password": form.password }))
            .options(RequestOptions::default().with_auth(false).with_toast(false));

        let (data, message) = match self.ctx.send(request).await {
            Ok(ApiResponse::Success { data, message }) => (data, message),
            Ok(ApiResponse::Failure { message, .. }) => {
                self.ctx.notify(&message);
                return Err(Error::Api { message });
            }
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.ctx.notify(&err.user_message());
                return Err(err);
            }
        };

        let login: LoginData = decode(data)?;
        let Some(token) = login.token.filter(|t| !t.is_empty()) else {
            let message = "Sign-in failed".to_string();
            self.ctx.notify(&message);
            return Err(Error::Api { message });
        };

        self.ctx.session.sign_in(&token, login.user.as_ref())?;
        tracing::info!(user = ?login.user.as_ref().map(|u| u.id.as_str()), "signed in");

        self.ctx
            .success(message.as_deref().filter(|m| !m.is_empty()).unwrap_or("Signed in"));
        self.ctx.session.go_to(Route::Home);
        Ok(login.user)
    }

    pub fn logout(&self) -> Result<()> {
        self.ctx.session.sign_out()?;
        tracing::info!("signed out");
        self.ctx.success("Signed out");
        self.ctx.session.go_to(Route::SignIn);
        Ok(())
    }
}
