/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Login, token refresh and session restore
/// - `cleaning`: Cleaning slots and the cleaning calendar
/// - `tasks`: Shared tasks
/// - `contributions`: Volunteer-hour records and their summary
/// - `resources`: Listing and sign-up plumbing shared by slots and tasks

pub mod auth;
pub mod cleaning;
pub mod contributions;
pub mod health;
pub mod resources;
pub mod tasks;
