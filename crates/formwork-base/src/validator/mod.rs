//! Built-in validators.
//!
//! Every validator carries an English default message that `with_message`
//! replaces. Validators only judge values they understand; anything else
//! passes.

pub mod boolean;
pub mod date;
pub mod num;
pub mod presence;
pub mod text;

pub use boolean::{IsFalse, IsTrue};
pub use date::{LaterThan, SoonerThan};
pub use num::{GreaterThan, LessThan};
pub use presence::{NotBlank, NotEmpty, NotNull};
pub use text::IsEmail;

// Unit-like validator with a fixed default message.
macro_rules! message_validator {
    ($(#[$meta:meta])* $name:ident, $default:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            message: Option<String>,
        }

        impl $name {
            pub const DEFAULT_MESSAGE: &'static str = $default;

            #[must_use]
            pub const fn new() -> Self {
                Self { message: None }
            }

            #[must_use]
            pub fn with_message(mut self, message: impl Into<String>) -> Self {
                self.message = Some(message.into());
                self
            }

            fn message(&self) -> String {
                self.message
                    .clone()
                    .unwrap_or_else(|| Self::DEFAULT_MESSAGE.to_string())
            }
        }
    };
}

pub(crate) use message_validator;
