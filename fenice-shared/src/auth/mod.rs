/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`jwt`]: Session token generation and validation
/// - [`middleware`]: Bearer-token authentication and the acting [`middleware::FamilyContext`]
/// - [`authorization`]: Capability checks (admin-only operations)
///
/// Families log in with their family name only; there are no passwords.
/// The issued access token is the client's session and carries the
/// family id, username and admin flag.

pub mod authorization;
pub mod jwt;
pub mod middleware;
