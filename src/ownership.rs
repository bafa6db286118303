use uuid::Uuid;

use crate::error::ApiError;

/// Implemented by every record that belongs to a user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Single ownership gate for get/update/delete on one record.
///
/// A missing row and a row owned by someone else are both answered with
/// `NotFound`, so a non-owner never learns whether the id exists.
pub fn authorize<T: Owned>(resource: Option<T>, identity: Uuid) -> Result<T, ApiError> {
    match resource {
        Some(r) if r.owner_id() == identity => Ok(r),
        _ => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Thing {
        user_id: Uuid,
    }

    impl Owned for Thing {
        fn owner_id(&self) -> Uuid {
            self.user_id
        }
    }

    #[test]
    fn owner_passes() {
        let me = Uuid::new_v4();
        let thing = Thing { user_id: me };
        assert!(authorize(Some(thing), me).is_ok());
    }

    #[test]
    fn foreign_resource_is_not_found() {
        let me = Uuid::new_v4();
        let thing = Thing {
            user_id: Uuid::new_v4(),
        };
        let err = authorize(Some(thing), me).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn missing_resource_is_not_found() {
        let err = authorize(None::<Thing>, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn foreign_and_missing_are_indistinguishable() {
        let me = Uuid::new_v4();
        let foreign = authorize(
            Some(Thing {
                user_id: Uuid::new_v4(),
            }),
            me,
        )
        .unwrap_err();
        let missing = authorize(None::<Thing>, me).unwrap_err();
        assert_eq!(foreign.status(), missing.status());
        assert_eq!(foreign.code(), missing.code());
    }
}
