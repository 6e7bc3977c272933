use crate::domain::product::use_cases::read::{ProductView, ReadProductParams, ReadProductUseCase};

pub struct ReadProductUseCaseImpl;

impl ReadProductUseCase for ReadProductUseCaseImpl {
    fn execute(&self, params: ReadProductParams) -> ProductView {
        let is_current_user_owner = params.product.is_owned_by(params.acting_user.as_ref());
        ProductView {
            product: params.product,
            is_current_user_owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::model::{DEFAULT_IMAGE_URL, Product};
    use crate::domain::shared::value_objects::{UserId, UserRef};
    use chrono::Utc;
    use uuid::Uuid;

    fn product_owned_by(uid: &str) -> Product {
        Product::from_repository(
            Uuid::new_v4(),
            UserRef::new(uid, "Owner"),
            "Lamp".to_string(),
            "Brass desk lamp".to_string(),
            DEFAULT_IMAGE_URL.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn should_flag_owner_when_acting_user_created_product() {
        let view = ReadProductUseCaseImpl.execute(ReadProductParams {
            product: product_owned_by("uid-1"),
            acting_user: Some(UserId::new("uid-1")),
        });

        assert!(view.is_current_user_owner);
        assert_eq!(view.product.title, "Lamp");
    }

    #[test]
    fn should_not_flag_other_user() {
        let view = ReadProductUseCaseImpl.execute(ReadProductParams {
            product: product_owned_by("uid-1"),
            acting_user: Some(UserId::new("uid-2")),
        });

        assert!(!view.is_current_user_owner);
    }

    #[test]
    fn should_not_flag_anonymous_viewer() {
        let view = ReadProductUseCaseImpl.execute(ReadProductParams {
            product: product_owned_by("uid-1"),
            acting_user: None,
        });

        assert!(!view.is_current_user_owner);
    }
}
