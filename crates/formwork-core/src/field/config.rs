use crate::{
    validator::{Validator, ValidatorRef},
    value::Value,
};
use std::{fmt, sync::Arc};

///
/// DefaultValue
///
/// Either a stored value (cloned on every read) or a factory evaluated on
/// every read. Both paths hand out an independently owned value, so two
/// defaults never share nested containers.
///

#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(f))
    }

    #[must_use]
    pub fn resolve(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

// Builder methods shared by every config struct.
macro_rules! config_builder {
    ($ty:ty) => {
        impl $ty {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            #[must_use]
            pub fn label(mut self, label: impl Into<String>) -> Self {
                self.label = label.into();
                self
            }

            /// Stored default, cloned on every read.
            #[must_use]
            pub fn default_value(mut self, value: impl Into<Value>) -> Self {
                self.default = Some(DefaultValue::Value(value.into()));
                self
            }

            /// Default produced fresh by `f` on every read.
            #[must_use]
            pub fn default_with<F>(mut self, f: F) -> Self
            where
                F: Fn() -> Value + Send + Sync + 'static,
            {
                self.default = Some(DefaultValue::factory(f));
                self
            }

            #[must_use]
            pub const fn nullable(mut self, nullable: bool) -> Self {
                self.nullable = nullable;
                self
            }

            #[must_use]
            pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
                self.validators.push(Arc::new(validator));
                self
            }

            #[must_use]
            pub fn validator_ref(mut self, validator: ValidatorRef) -> Self {
                self.validators.push(validator);
                self
            }

            #[must_use]
            pub fn validators(mut self, validators: impl IntoIterator<Item = ValidatorRef>) -> Self {
                self.validators.extend(validators);
                self
            }
        }
    };
}

///
/// FieldConfig
///
/// Configuration for scalar fields and field sets.
///

#[derive(Clone, Default)]
pub struct FieldConfig {
    pub label: String,
    pub default: Option<DefaultValue>,
    pub nullable: bool,
    pub validators: Vec<ValidatorRef>,
}

config_builder!(FieldConfig);

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("label", &self.label)
            .field("default", &self.default)
            .field("nullable", &self.nullable)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Field sets take the same knobs as scalar fields.
pub type FieldSetConfig = FieldConfig;

///
/// ArrayFieldConfig
///
/// `initial_length` only applies when no default override is configured.
///

#[derive(Clone, Default)]
pub struct ArrayFieldConfig {
    pub label: String,
    pub default: Option<DefaultValue>,
    pub initial_length: usize,
    pub nullable: bool,
    pub validators: Vec<ValidatorRef>,
}

config_builder!(ArrayFieldConfig);

impl ArrayFieldConfig {
    #[must_use]
    pub const fn initial_length(mut self, len: usize) -> Self {
        self.initial_length = len;
        self
    }
}

impl fmt::Debug for ArrayFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayFieldConfig")
            .field("label", &self.label)
            .field("default", &self.default)
            .field("initial_length", &self.initial_length)
            .field("nullable", &self.nullable)
            .field("validators", &self.validators.len())
            .finish()
    }
}
