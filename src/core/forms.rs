use crate::api::{LoginRequest, RegisterRequest};
use crate::error::FormError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// The auth backend takes the email as the login identity.
    pub fn request(&self) -> Result<LoginRequest<'_>, FormError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        Ok(LoginRequest {
            identity: self.email.trim(),
            password: &self.password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    pub fn request(&self) -> Result<RegisterRequest<'_>, FormError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        if self.password != self.password_confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            username: self.username.trim(),
            email: self.email.trim(),
            password: &self.password,
            password_confirm: &self.password_confirm,
        })
    }

    /// Credentials for the automatic login after a successful registration.
    pub fn login(&self) -> LoginForm {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

fn require(name: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(name))
    } else {
        Ok(())
    }
}
