use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::UserId;

pub struct ReadProductParams {
    pub product: Product,
    pub acting_user: Option<UserId>,
}

/// A product as shown to one viewer. `is_current_user_owner` is computed per
/// request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub is_current_user_owner: bool,
}

pub trait ReadProductUseCase: Send + Sync {
    fn execute(&self, params: ReadProductParams) -> ProductView;
}
