use std::any::Any;

/// Trait for errors that may surface while configuring the provider. This just sets up the
/// trait bounds that are required, since we'll typically only expose rather opaque boxed
/// error types, and they may be sent between threads by the plugin host.
pub trait ProviderError: std::error::Error + Send + Sync + 'static + Any {
    fn as_any(&self) -> &dyn Any;
}
impl<T> ProviderError for T
where
    T: std::error::Error + Send + Sync + 'static + Any,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Error = Box<dyn ProviderError>;

impl dyn ProviderError {
    /// convenience function for downcasting the error to a concrete type
    pub fn as_type<T: ProviderError>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// convenience function for checking whether the error is of the given concrete type.
    /// If `is_type::<MyType>()` returns true, then calling `as_type::<MyType>()` will return
    /// `Some`.
    pub fn is_type<T: ProviderError>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl<T> From<T> for Error
where
    T: ProviderError,
{
    fn from(e: T) -> Error {
        Box::new(e)
    }
}
