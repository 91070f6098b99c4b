//! Property-based tests for the credential rules

use proptest::prelude::*;

use twirl::shared::validators::{estimate_entropy, MIN_PASSWORD_ENTROPY};
use twirl::shared::{validate_password, validate_username, SharedError};

proptest! {
    #[test]
    fn test_well_formed_usernames_accepted(name in "[A-Za-z0-9_]{2,15}") {
        let username = validate_username(&name).unwrap();
        prop_assert_eq!(username.as_str(), name.as_str());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed(name in "[a-z]{2,15}", pad in " {0,3}") {
        let padded = format!("{pad}{name}{pad}");
        let username = validate_username(&padded).unwrap();
        prop_assert_eq!(username.as_str(), name.as_str());
    }

    #[test]
    fn test_long_usernames_rejected(name in "[A-Za-z0-9_]{16,40}") {
        prop_assert!(validate_username(&name).is_err());
    }

    #[test]
    fn test_foreign_characters_rejected(
        head in "[a-z]{1,7}",
        bad in "[-.@!#$ ]",
        tail in "[a-z]{1,7}",
    ) {
        let name = format!("{head}{bad}{tail}");
        prop_assert!(validate_username(&name).is_err());
    }

    #[test]
    fn test_short_passwords_rejected(password in "[A-Za-z0-9!@#$%^&*]{0,7}") {
        let result = validate_password(&password);
        let is_validation_error = matches!(result, Err(SharedError::ValidationError { .. }));
        prop_assert!(is_validation_error);
    }

    #[test]
    fn test_entropy_decides_long_passwords(password in "[A-Za-z0-9!@#$%^&*_.-]{8,32}") {
        let strong = estimate_entropy(&password) >= MIN_PASSWORD_ENTROPY;
        match validate_password(&password) {
            Ok(accepted) => {
                prop_assert!(strong);
                prop_assert_eq!(accepted.as_str(), password.as_str());
            }
            Err(SharedError::WeakCredential { .. }) => prop_assert!(!strong),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn test_entropy_non_negative(password in ".{0,40}") {
        prop_assert!(estimate_entropy(&password) >= 0.0);
    }
}
