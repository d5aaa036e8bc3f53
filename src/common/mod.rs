pub mod command_utils;
pub mod password;

pub use command_utils::{CommandRunner, CommandSpec, LocalCommandRunner};
pub use password::{PasswordHasher, ShaCryptHasher};
