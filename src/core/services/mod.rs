pub mod account_service;
pub mod obligation_service;
pub mod task_service;

pub use account_service::AccountService;
pub use obligation_service::{DebtService, IncomeService};
pub use task_service::TaskService;

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] FinanceError),
    #[error("{0}")]
    Invalid(String),
}
