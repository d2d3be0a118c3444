//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod manage_customers;
pub mod password_reset;
pub mod register;
pub mod session_token;
pub mod set_password;
pub mod sign_in;

// Re-exports
pub use check_session::{CheckSessionUseCase, CurrentUser};
pub use config::AuthConfig;
pub use manage_customers::ManageCustomersUseCase;
pub use password_reset::{PasswordResetUseCase, ResetRequestOutput};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session_token::SessionTokenIssuer;
pub use set_password::SetPasswordUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
