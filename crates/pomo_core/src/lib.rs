pub mod alert;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod storage;
pub mod timer;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::Task;

    #[test]
    fn task_has_required_fields() {
        let task = Task::new("demo");

        assert_eq!(task.name, "demo");
        assert_eq!(task.sessions, 0);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::validation("no task selected");
        assert_eq!(err.code(), "validation");
    }
}
