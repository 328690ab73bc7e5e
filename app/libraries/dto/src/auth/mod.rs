pub mod identity;
pub mod login;
pub mod signup;
