//! The `utils` module holds the crate's shared error type and the logging
//! initializer used by applications embedding the registry.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::error::RegistryError;
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
        logging::init("bogus");
    }

    #[test]
    fn invalid_argument_message() {
        let err = RegistryError::InvalidArgument("topic name must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: topic name must not be empty"
        );
    }
}
