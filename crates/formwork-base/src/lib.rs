//! Built-in validators and date helpers for formwork field sets.
//!
//! ## Layout
//! - `validator`: presence, boolean, numeric, date, and email checks.
//! - `helper`: hour rounding for date-time defaults.

pub mod helper;
pub mod validator;

pub use formwork_core as core;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        helper::{round_hour, round_hour_now},
        validator::{
            GreaterThan, IsEmail, IsFalse, IsTrue, LaterThan, LessThan, NotBlank, NotEmpty,
            NotNull, SoonerThan,
        },
    };
}
