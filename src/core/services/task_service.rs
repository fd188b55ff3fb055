use crate::domain::task::Task;
use crate::storage::FinanceStore;

use super::{ServiceError, ServiceResult};

/// CRUD over the persisted task list. Reminder scheduling happens in the
/// host shell after the task is stored.
pub struct TaskService;

impl TaskService {
    pub fn list(store: &dyn FinanceStore) -> ServiceResult<Vec<Task>> {
        Ok(store.load_tasks()?)
    }

    pub fn add(store: &dyn FinanceStore, task: Task) -> ServiceResult<()> {
        if task.title.trim().is_empty() {
            return Err(ServiceError::Invalid("Task title must not be empty".into()));
        }
        let mut tasks = store.load_tasks()?;
        tasks.push(task);
        store.save_tasks(&tasks)?;
        Ok(())
    }

    pub fn update(store: &dyn FinanceStore, changes: Task) -> ServiceResult<()> {
        let mut tasks = store.load_tasks()?;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == changes.id)
            .ok_or_else(|| ServiceError::Invalid(format!("No task with id `{}`", changes.id)))?;
        *slot = changes;
        store.save_tasks(&tasks)?;
        Ok(())
    }

    pub fn remove(store: &dyn FinanceStore, id: &str) -> ServiceResult<()> {
        let mut tasks = store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(ServiceError::Invalid(format!("No task with id `{id}`")));
        }
        store.save_tasks(&tasks)?;
        Ok(())
    }
}
